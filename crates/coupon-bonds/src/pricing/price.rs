//! Bond prices per unit of principal.

use coupon_core::types::cashflows::components::{INTEREST, PRINCIPAL, TIME_FACTOR};
use coupon_core::{CouponError, DayCountBasis, Date};

use super::accrued::{accrued_interest, accrued_interest_odd_first};
use crate::cashflows::{odd_cash_flows, regular_cash_flows};
use crate::coupons::{
    coupon_count, discount_periods, next_coupon_date_backward, previous_coupon_date,
    previous_coupon_date_from_maturity, quasi_periods,
};
use crate::error::BondResult;

// =============================================================================
// TIME-FACTOR FLOWS
// =============================================================================

/// Post-settlement flows of a unit-principal regular bond with the number of
/// coupon periods from settlement to each payment.
#[derive(Debug, Clone)]
pub(crate) struct TimedFlows {
    times: Vec<f64>,
    amounts: Vec<f64>,
    periodic_coupon: f64,
}

impl TimedFlows {
    /// Generates the flows.
    ///
    /// Fails with `CouponError::IndexOutOfRange` when nothing is paid after
    /// settlement.
    pub(crate) fn regular(
        settlement: Date,
        maturity: Date,
        coupon_rate: f64,
        frequency: u32,
        basis: DayCountBasis,
    ) -> BondResult<Self> {
        let cf = regular_cash_flows(settlement, maturity, 1.0, coupon_rate, frequency, basis, true)?;
        if cf.count() < 2 {
            return Err(CouponError::IndexOutOfRange {
                index: 1,
                count: cf.count(),
            }
            .into());
        }

        let principal = cf.component(PRINCIPAL)?;
        let interest = cf.component(INTEREST)?;
        let times = cf.component(TIME_FACTOR)?[1..].to_vec();
        let amounts = principal[1..]
            .iter()
            .zip(&interest[1..])
            .map(|(p, i)| p + i)
            .collect();

        Ok(Self {
            times,
            amounts,
            periodic_coupon: coupon_rate / f64::from(frequency),
        })
    }

    /// Coupon periods to the first payment.
    pub(crate) fn first_time(&self) -> f64 {
        self.times[0]
    }

    /// `(time, amount)` pairs in payment order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.amounts.iter().copied())
    }

    /// Dirty price at a periodic yield.
    ///
    /// A single remaining payment is discounted linearly, more than one are
    /// discounted with compounding.
    pub(crate) fn dirty_price(&self, periodic_yield: f64) -> f64 {
        if self.amounts.len() > 1 {
            self.iter()
                .map(|(t, amount)| amount / (1.0 + periodic_yield).powf(t))
                .sum()
        } else {
            self.amounts[0] / (1.0 + periodic_yield * self.times[0])
        }
    }

    /// Interest accrued since the last coupon, from the first time factor.
    pub(crate) fn accrued(&self) -> f64 {
        self.periodic_coupon * (1.0 - self.first_time())
    }

    /// Price at an annual yield.
    pub(crate) fn price(&self, annual_yield: f64, frequency: u32, clean: bool) -> f64 {
        let dirty = self.dirty_price(annual_yield / f64::from(frequency));
        if clean {
            dirty - self.accrued()
        } else {
            dirty
        }
    }
}

// =============================================================================
// REGULAR BONDS
// =============================================================================

/// Clean price of a regular bond per unit of principal.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when no payment remains after settlement
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::price;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(2008, 2, 15).unwrap();
/// let maturity = Date::from_ymd(2017, 11, 15).unwrap();
/// let p = price(settlement, maturity, 0.0575, 0.065, 2, DayCountBasis::Nasd30360).unwrap();
/// assert!((100.0 * p - 94.634362).abs() < 1e-6);
/// ```
pub fn price(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    price_with_clean(settlement, maturity, coupon_rate, yield_rate, frequency, basis, true)
}

/// Clean or dirty price of a regular bond per unit of principal.
///
/// # Formula
///
/// With `y = yield / frequency` and `t_i` the time factor of payment `i`:
///
/// ```text
/// dirty = sum(CF_i / (1 + y)^t_i)        more than one payment left
/// dirty = CF_1 / (1 + y * t_1)           one payment left
/// clean = dirty - (coupon / frequency) * (1 - t_1)
/// ```
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when no payment remains after settlement
pub fn price_with_clean(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    clean: bool,
) -> BondResult<f64> {
    let flows = TimedFlows::regular(settlement, maturity, coupon_rate, frequency, basis)?;
    Ok(flows.price(yield_rate, frequency, clean))
}

/// Price of a regular bond by the closed-form street formula.
///
/// # Formula
///
/// With `n` coupons remaining, `w` the fraction of a period to the next
/// coupon and `v = 1 + yield / frequency`:
///
/// ```text
/// principal = v^-(n - 1 + w)
/// coupons   = (coupon / yield) * v^(1 - w) * (1 - v^-n)
/// ```
///
/// In the final period the principal and last coupon are discounted with
/// simple interest over the remaining days.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn price_street(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    clean: bool,
) -> BondResult<f64> {
    let freq = f64::from(frequency);
    let previous = previous_coupon_date_from_maturity(settlement, maturity, frequency, basis)?;
    let next = next_coupon_date_backward(settlement, maturity, frequency, basis)?;
    let days_since = basis.diff_days(previous, settlement);
    let days_to_next = basis.diff_days(settlement, next) as f64;
    let year_days = f64::from(basis.days_of_year(settlement));

    let coupons = coupon_count(settlement, maturity, frequency, basis)?;
    let whole = coupons.saturating_sub(u32::from(days_since > 0));

    let (principal_pv, coupon_pv) = if whole > 0 {
        let n = f64::from(coupons);
        let w = if whole < coupons {
            days_to_next / (year_days / freq)
        } else {
            1.0
        };
        let v = 1.0 + yield_rate / freq;
        (
            v.powf(-(n - 1.0 + w)),
            (coupon_rate / yield_rate) * v.powf(1.0 - w) * (1.0 - v.powf(-n)),
        )
    } else {
        let discount = 1.0 + yield_rate * days_to_next / year_days;
        (1.0 / discount, (coupon_rate / freq) / discount)
    };

    let accrued = if clean {
        (coupon_rate / freq) * days_since as f64 / basis.diff_days(previous, next) as f64
    } else {
        0.0
    };

    Ok(principal_pv + coupon_pv - accrued)
}

// =============================================================================
// ODD BONDS
// =============================================================================

/// Price of a bond with an odd first and/or last period, discounting each
/// payment directly.
///
/// # Rules
///
/// - The first payment is `d_1` periods away, where `d_1` counts forward from
///   settlement; each later payment is one period further.
/// - When the last period is odd, the final payment is discounted over the
///   periods from the coupon date preceding the last coupon.
/// - The clean price subtracts odd-first accrued interest when a first
///   coupon is given, regular accrued interest otherwise.
///
/// Odd first and odd last periods are each supported on their own; a bond
/// with both odd is priced with the odd last treatment only.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `BondError::SettlementBeforeIssue` when regular accrued interest is
///   needed and settlement precedes issue
pub fn price_odd_bond(
    settlement: Date,
    issue: Date,
    maturity: Date,
    first_coupon: Option<Date>,
    last_coupon: Option<Date>,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    clean: bool,
) -> BondResult<f64> {
    let cf = odd_cash_flows(
        settlement,
        issue,
        maturity,
        first_coupon,
        last_coupon,
        1.0,
        coupon_rate,
        frequency,
        basis,
        false,
    )?;
    let dates = cf.dates();
    let count = dates.len();
    let v = 1.0 + yield_rate / f64::from(frequency);

    let first_time = if count > 1 {
        discount_periods(settlement, dates[1], frequency, basis)?
    } else {
        1.0
    };

    let mut last_time = None;
    if let Some(last) = last_coupon {
        if discount_periods(last, maturity, frequency, basis)? != 1.0 {
            let start = previous_coupon_date(settlement, last, frequency, basis, false)?;
            last_time = Some(discount_periods(start, maturity, frequency, basis)?);
        }
    }

    let regular_end = if last_time.is_some() { count - 1 } else { count };
    let mut pv = 0.0;
    for (i, &date) in dates.iter().enumerate().take(regular_end).skip(1) {
        pv += v.powf(-((i - 1) as f64 + first_time)) * cf.amount_at(date)?;
    }

    if let Some(last_time) = last_time {
        let final_date = dates[count - 1];
        pv += v.powf(-((count as f64) - 3.0 + last_time)) * cf.amount_at(final_date)?;
    }

    let accrued = match (clean, first_coupon) {
        (false, _) => 0.0,
        (true, Some(first)) => {
            accrued_interest_odd_first(issue, settlement, first, coupon_rate, frequency, basis)?
        }
        (true, None) => accrued_interest(issue, settlement, coupon_rate, frequency, basis)?,
    };

    Ok(pv - accrued)
}

/// Price of a bond with an odd first period, in closed form.
///
/// The bond is priced as a regular bond at the first coupon date, the first
/// coupon (sized by the quasi-periods from issue) is added, and the sum is
/// discounted back to settlement.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when the first coupon is the maturity date
pub fn price_odd_first_bond(
    settlement: Date,
    issue: Date,
    maturity: Date,
    first_coupon: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    clean: bool,
) -> BondResult<f64> {
    let freq = f64::from(frequency);
    let at_first = price_with_clean(
        first_coupon,
        maturity,
        coupon_rate,
        yield_rate,
        frequency,
        basis,
        false,
    )?;
    let first_amount =
        quasi_periods(issue, first_coupon, frequency, basis, false)? * coupon_rate / freq;
    let discount = (1.0 + yield_rate / freq)
        .powf(-discount_periods(settlement, first_coupon, frequency, basis)?);

    let accrued = if clean {
        accrued_interest_odd_first(issue, settlement, first_coupon, coupon_rate, frequency, basis)?
    } else {
        0.0
    };

    Ok((at_first + first_amount) * discount - accrued)
}
