//! Coupon-date navigation.
//!
//! Coupon dates are found by stepping whole coupon periods (`12 / frequency`
//! months) from an anchor date. Each step is taken from the previous result,
//! so a day clamped to a short month stays clamped on later steps.
//! [`coupon_count_fraction`] is the exception and steps every date directly
//! from maturity. Dates that
//! walk backward from maturity are the "backward" variants, dates that walk
//! forward from the issue date are the "forward" variants.
//!
//! # End-of-month snapping
//!
//! Two next-coupon variants exist and both are kept:
//!
//! - [`next_coupon_date_backward`] always snaps the coupon date to the end of
//!   its month when maturity falls on a month end (COUPNCD-compatible).
//! - [`next_coupon_date_smart`] with `smart_adjust = true` snaps only when
//!   settlement itself falls in February. Regular cash-flow generation uses
//!   this form.

use coupon_core::types::months_per_period;
use coupon_core::{DayCountBasis, Date};

use crate::error::{BondError, BondResult};

/// Steps `periods` coupon periods from `date` (negative steps go backward).
fn step(date: Date, months: i32, periods: i32, basis: DayCountBasis) -> BondResult<Date> {
    Ok(basis.add_months(date, months * periods)?)
}

/// Last coupon date on or before settlement, walking forward from the issue date.
///
/// When settlement precedes the issue date and `force` is set, walks backward
/// from the issue date instead and returns the first date not after settlement.
///
/// # Errors
///
/// - `BondError::SettlementBeforeIssue` when settlement precedes the issue
///   date and `force` is false
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
pub fn previous_coupon_date(
    issue: Date,
    settlement: Date,
    frequency: u32,
    basis: DayCountBasis,
    force: bool,
) -> BondResult<Date> {
    let months = months_per_period(frequency)?;
    let mut previous = issue;

    if settlement < issue {
        if !force {
            return Err(BondError::settlement_before_issue(settlement, issue));
        }
        while settlement < previous {
            previous = step(previous, months, -1, basis)?;
        }
    } else {
        let mut next = issue;
        while next < settlement {
            previous = next;
            next = step(next, months, 1, basis)?;
        }
    }

    Ok(previous)
}

/// Last coupon date on or before settlement, walking backward from maturity.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn previous_coupon_date_from_maturity(
    settlement: Date,
    maturity: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<Date> {
    let months = months_per_period(frequency)?;
    let mut previous = maturity;
    while previous > settlement {
        previous = step(previous, months, -1, basis)?;
    }
    Ok(previous)
}

/// First coupon date on or after settlement, walking forward from the issue date.
///
/// When settlement precedes the issue date and `force` is set, walks backward
/// from the issue date and returns the earliest date still after settlement.
///
/// # Errors
///
/// - `BondError::SettlementBeforeIssue` when settlement precedes the issue
///   date and `force` is false
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
pub fn next_coupon_date_forward(
    issue: Date,
    settlement: Date,
    frequency: u32,
    basis: DayCountBasis,
    force: bool,
) -> BondResult<Date> {
    let months = months_per_period(frequency)?;
    let mut next = issue;

    if settlement < issue {
        if !force {
            return Err(BondError::settlement_before_issue(settlement, issue));
        }
        let mut candidate = issue;
        while settlement < candidate {
            next = candidate;
            candidate = step(candidate, months, -1, basis)?;
        }
    } else {
        while next < settlement {
            next = step(next, months, 1, basis)?;
        }
    }

    Ok(next)
}

/// First coupon date strictly after settlement, walking backward from
/// maturity, snapped to month end whenever maturity is a month end.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn next_coupon_date_backward(
    settlement: Date,
    maturity: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<Date> {
    next_coupon_date_smart(settlement, maturity, frequency, basis, false)
}

/// First coupon date strictly after settlement, walking backward from maturity.
///
/// # Rules
///
/// When maturity is the last day of its month and the stepped date is not,
/// the result is moved to the end of its month. With `smart_adjust` set this
/// only happens when settlement is in February.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn next_coupon_date_smart(
    settlement: Date,
    maturity: Date,
    frequency: u32,
    basis: DayCountBasis,
    smart_adjust: bool,
) -> BondResult<Date> {
    let months = months_per_period(frequency)?;
    let mut previous = maturity;
    let mut next = maturity;

    while previous > settlement {
        next = previous;
        previous = step(previous, months, -1, basis)?;
    }

    let snap = maturity.is_end_of_month()
        && !next.is_end_of_month()
        && (!smart_adjust || settlement.is_month(2));
    if snap {
        next = next.end_of_month()?;
    }

    Ok(next)
}

/// Number of coupons payable after settlement up to and including maturity.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn coupon_count(
    settlement: Date,
    maturity: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<u32> {
    let months = months_per_period(frequency)?;
    let mut count = 0;
    let mut previous = maturity;
    while previous > settlement {
        count += 1;
        previous = step(previous, months, -1, basis)?;
    }
    Ok(count)
}

/// Whole coupon periods from settlement to maturity plus the fraction of the
/// period in which settlement falls.
///
/// # Rules
///
/// - Whole periods are counted backward from maturity while the coupon date
///   is on or after settlement. Each coupon date is stepped directly from
///   maturity, so a month-end maturity keeps month-end coupons.
/// - The fraction is `days(settlement, next coupon) / days in the period`.
/// - When both the next coupon and settlement are in February, and the
///   coupon falls on the month end while settlement does not, the day count
///   is padded to a 30-day February, capped at the count from January 31.
///   The result never increases as settlement moves later.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::coupons::coupon_count_fraction;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(1993, 3, 1).unwrap();
/// let maturity = Date::from_ymd(2007, 1, 1).unwrap();
/// let n = coupon_count_fraction(settlement, maturity, 2, DayCountBasis::Nasd30360).unwrap();
/// assert!((n - (27.0 + 120.0 / 180.0)).abs() < 1e-12);
/// ```
pub fn coupon_count_fraction(
    settlement: Date,
    maturity: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let months = months_per_period(frequency)?;
    let mut count = 0.0;
    let mut periods = 1;
    let mut last = maturity;
    let mut coupon = step(maturity, months, -periods, basis)?;

    while coupon >= settlement {
        count += 1.0;
        last = coupon;
        periods += 1;
        coupon = step(maturity, months, -periods, basis)?;
    }

    let mut days = basis.diff_days(settlement, last);
    let period = coupon_period_days(coupon, last, frequency, basis)?;

    if last.is_month(2)
        && settlement.is_month(2)
        && last.is_end_of_month()
        && !settlement.is_end_of_month()
    {
        let january_end = settlement.add_days(-i64::from(settlement.day()));
        days = (days + 30 - i64::from(last.day())).min(basis.diff_days(january_end, last));
    }

    Ok(count + days as f64 / period as f64)
}

/// Length in days of the coupon period from `start` to `end`.
///
/// 30/360 bases use the nominal `30 * 12 / frequency`; actual bases count
/// calendar days.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn coupon_period_days(
    start: Date,
    end: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<i64> {
    let months = months_per_period(frequency)?;
    if basis.is_actual() {
        Ok(basis.diff_days(start, end))
    } else {
        Ok(i64::from(months) * i64::from(basis.days_per_month()))
    }
}

/// Coupon periods between two dates, whole and fractional.
///
/// # Rules
///
/// - `forward`: step from `start` toward `end`; the remainder is measured
///   from the last whole step to `end` against the next full period.
/// - backward: step from `end` toward `start`; the remainder is measured
///   from `start` to the last whole step against the previous full period.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn quasi_periods(
    start: Date,
    end: Date,
    frequency: u32,
    basis: DayCountBasis,
    forward: bool,
) -> BondResult<f64> {
    let months = months_per_period(frequency)?;
    let mut periods = 0.0;

    if forward {
        let mut current = start;
        let mut next = step(start, months, 1, basis)?;
        while next <= end {
            periods += 1.0;
            current = next;
            next = step(next, months, 1, basis)?;
        }
        let partial = basis.diff_days(current, end) as f64;
        let full = basis.diff_days(current, next) as f64;
        Ok(periods + partial / full)
    } else {
        let mut current = end;
        let mut previous = step(end, months, -1, basis)?;
        while previous >= start {
            periods += 1.0;
            current = previous;
            previous = step(previous, months, -1, basis)?;
        }
        let partial = basis.diff_days(start, current) as f64;
        let full = basis.diff_days(previous, current) as f64;
        Ok(periods + partial / full)
    }
}

/// Discounting periods from `start` to `end`, counted forward from `start`.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn discount_periods(
    start: Date,
    end: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    quasi_periods(start, end, frequency, basis, true)
}
