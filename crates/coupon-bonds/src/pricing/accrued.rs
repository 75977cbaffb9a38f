//! Accrued interest per unit of principal.

use coupon_core::types::months_per_period;
use coupon_core::{DayCountBasis, Date};

use crate::coupons::{
    coupon_period_days, next_coupon_date_forward, previous_coupon_date,
    previous_coupon_date_from_maturity,
};
use crate::error::BondResult;

/// Accrued interest of a regular bond, coupon dates counted from issue.
///
/// # Formula
///
/// ```text
/// AI = (coupon_rate / frequency) * days(previous coupon, settlement) / days in period
/// ```
///
/// # Errors
///
/// - `BondError::SettlementBeforeIssue` when settlement precedes the issue date
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::accrued_interest;
/// use coupon_core::{DayCountBasis, Date};
///
/// let issue = Date::from_ymd(1996, 4, 1).unwrap();
/// let settlement = Date::from_ymd(1996, 8, 18).unwrap();
/// let ai = accrued_interest(issue, settlement, 0.05, 2, DayCountBasis::Nasd30360).unwrap();
/// assert!((1000.0 * ai - 19.027778).abs() < 1e-6);
/// ```
pub fn accrued_interest(
    issue: Date,
    settlement: Date,
    coupon_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let previous = previous_coupon_date(issue, settlement, frequency, basis, false)?;
    let next = next_coupon_date_forward(issue, settlement, frequency, basis, false)?;
    let accrued_days = basis.diff_days(previous, settlement) as f64;
    let period_days = coupon_period_days(previous, next, frequency, basis)? as f64;

    Ok(coupon_rate / f64::from(frequency) * accrued_days / period_days)
}

/// Accrued interest of a bond with an odd first coupon period.
///
/// # Rules
///
/// The quasi-coupon period containing settlement is found by stepping back
/// from the first coupon date.
///
/// - Odd short (the quasi period starts before issue): accrual runs from
///   issue over the length of that quasi period.
/// - Odd long (the quasi period starts after issue): the partial quasi period
///   containing settlement, every whole quasi period back to issue, and the
///   fraction of the earliest quasi period after issue are added up.
/// - Quasi period starting exactly at issue: the regular formula.
///
/// # Errors
///
/// - `BondError::SettlementBeforeIssue` when the regular formula applies and
///   settlement precedes the issue date
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
pub fn accrued_interest_odd_first(
    issue: Date,
    settlement: Date,
    first_coupon: Date,
    coupon_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let periodic_rate = coupon_rate / f64::from(frequency);
    let mut reference =
        previous_coupon_date_from_maturity(settlement, first_coupon, frequency, basis)?;

    if reference < issue {
        let accrued = basis.diff_days(issue, settlement) as f64;
        let quasi = basis.diff_days(reference, first_coupon) as f64;
        return Ok(periodic_rate * accrued / quasi);
    }

    if reference > issue {
        let months = months_per_period(frequency)?;
        let mut periods = basis.diff_days(reference, settlement) as f64
            / basis.diff_days(reference, first_coupon) as f64;
        let mut last_reference = reference;
        reference = basis.add_months(reference, -months)?;

        while reference > issue {
            periods += 1.0;
            last_reference = reference;
            reference = basis.add_months(reference, -months)?;
        }

        periods += basis.diff_days(issue, last_reference) as f64
            / basis.diff_days(reference, last_reference) as f64;
        return Ok(periodic_rate * periods);
    }

    accrued_interest(issue, settlement, coupon_rate, frequency, basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_accrued_interest() {
        let ai =
            accrued_interest(d(1996, 4, 1), d(1996, 8, 18), 0.05, 2, DayCountBasis::Nasd30360)
                .unwrap();
        assert_abs_diff_eq!(1000.0 * ai, 19.027778, epsilon = 1e-6);
    }

    #[test]
    fn test_accrued_interest_full_period_on_coupon_date() {
        let ai =
            accrued_interest(d(1996, 4, 1), d(1996, 10, 1), 0.05, 2, DayCountBasis::Nasd30360)
                .unwrap();
        assert_abs_diff_eq!(ai, 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_accrued_interest_before_issue() {
        let result =
            accrued_interest(d(1996, 4, 1), d(1996, 3, 18), 0.05, 2, DayCountBasis::Nasd30360);
        assert!(result.is_err());
    }

    #[test]
    fn test_accrued_odd_first_short() {
        let ai = accrued_interest_odd_first(
            d(1996, 7, 1),
            d(1996, 8, 18),
            d(1996, 10, 1),
            0.05,
            2,
            DayCountBasis::Nasd30360,
        )
        .unwrap();
        assert_abs_diff_eq!(1000.0 * ai, 6.53, epsilon = 0.01);
    }

    #[test]
    fn test_accrued_odd_first_long() {
        let ai = accrued_interest_odd_first(
            d(1992, 7, 1),
            d(1993, 2, 1),
            d(1993, 4, 1),
            0.075,
            2,
            DayCountBasis::ActAct,
        )
        .unwrap();
        assert_abs_diff_eq!(10000.0 * ai, 441.96, epsilon = 0.01);
    }

    #[test]
    fn test_accrued_odd_first_regular_period() {
        let basis = DayCountBasis::Nasd30360;
        let odd =
            accrued_interest_odd_first(d(1996, 4, 1), d(1996, 8, 18), d(1996, 10, 1), 0.05, 2, basis)
                .unwrap();
        let regular = accrued_interest(d(1996, 4, 1), d(1996, 8, 18), 0.05, 2, basis).unwrap();
        assert_eq!(odd, regular);
    }
}
