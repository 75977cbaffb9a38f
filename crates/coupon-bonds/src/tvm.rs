//! Time value of money.
//!
//! Closed-form present value, future value and annuity of level payment
//! streams, plus the same measures over non-dated [`CashFlows`] whose entry
//! `i` falls at period `i`.
//!
//! `arrears` selects payments at the end of each period (ordinary annuity);
//! otherwise payments are made at the start (annuity due).

use coupon_core::{CashFlows, CouponError};
use coupon_math::series::geometric_series_sum;
use coupon_math::solvers::{newton_raphson_numerical, SolverConfig};
use coupon_math::MathError;

use crate::error::BondResult;

/// Starting rate of the return searches.
const RATE_GUESS: f64 = 0.10;

fn non_dated_amounts(cash_flows: &CashFlows) -> BondResult<Vec<f64>> {
    if cash_flows.is_dated() {
        return Err(CouponError::dated_mismatch("dated cash flows have no period index").into());
    }
    Ok(cash_flows.totals())
}

fn discounted_sum(amounts: &[f64], rate: f64) -> f64 {
    let discount = 1.0 / (1.0 + rate);
    amounts
        .iter()
        .zip(0..)
        .map(|(amount, i)| amount * discount.powi(i))
        .sum()
}

// =============================================================================
// PRESENT AND FUTURE VALUE
// =============================================================================

/// Present value of `periods` level payments plus a final lump sum.
///
/// # Formula
///
/// ```text
/// arrears:  PV = A * (1 - (1 + r)^-n) / r          + FV * (1 + r)^-n
/// due:      PV = A * (1 + r - (1 + r)^(1 - n)) / r + FV * (1 + r)^-n
/// ```
///
/// `periods` may be fractional.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::tvm::present_value;
///
/// let pv = present_value(0.08 / 12.0, 240.0, 500.0, 0.0, true);
/// assert!((pv - 59777.145851).abs() < 1e-6);
/// ```
#[must_use]
pub fn present_value(rate: f64, periods: f64, annuity: f64, future_value: f64, arrears: bool) -> f64 {
    let growth = 1.0 + rate;
    let payments = if arrears {
        annuity * (1.0 - growth.powf(-periods)) / rate
    } else {
        annuity * (growth - growth.powf(1.0 - periods)) / rate
    };
    payments + future_value * growth.powf(-periods)
}

/// Present value of non-dated cash flows, entry `i` discounted by `i` periods.
///
/// # Errors
///
/// Returns `CouponError::DatedMismatch` for a dated series.
pub fn present_value_of(cash_flows: &CashFlows, rate: f64) -> BondResult<f64> {
    let amounts = non_dated_amounts(cash_flows)?;
    Ok(discounted_sum(&amounts, rate))
}

/// Future value of `periods` level payments plus an initial lump sum.
///
/// # Formula
///
/// ```text
/// arrears:  FV = A * ((1 + r)^n - 1) / r           + PV * (1 + r)^n
/// due:      FV = A * (1 + r) * ((1 + r)^n - 1) / r + PV * (1 + r)^n
/// ```
#[must_use]
pub fn future_value(rate: f64, periods: f64, annuity: f64, present_value: f64, arrears: bool) -> f64 {
    let growth = 1.0 + rate;
    let compounded = growth.powf(periods);
    let payments = if arrears {
        annuity * (compounded - 1.0) / rate
    } else {
        annuity * growth * (compounded - 1.0) / rate
    };
    payments + present_value * compounded
}

/// Value at period `periods` of the first `periods + 1` non-dated entries.
///
/// # Errors
///
/// - `CouponError::DatedMismatch` for a dated series
/// - `CouponError::IndexOutOfRange` when the series has `periods` entries or fewer
pub fn future_value_of(cash_flows: &CashFlows, rate: f64, periods: usize) -> BondResult<f64> {
    let amounts = non_dated_amounts(cash_flows)?;
    if periods >= amounts.len() {
        return Err(CouponError::IndexOutOfRange {
            index: periods,
            count: amounts.len(),
        }
        .into());
    }

    let growth = 1.0 + rate;
    Ok(amounts[..=periods]
        .iter()
        .enumerate()
        .map(|(i, amount)| amount * growth.powf((periods - i) as f64))
        .sum())
}

// =============================================================================
// ANNUITIES
// =============================================================================

/// Level payment that amortizes `present_value` and accumulates
/// `future_value` over `periods`.
#[must_use]
pub fn annuity(rate: f64, periods: u32, present_value: f64, future_value: f64, arrears: bool) -> f64 {
    let n = f64::from(periods);
    let growth = 1.0 + rate;
    let accumulation = (growth.powf(n) - 1.0) / rate;
    if arrears {
        present_value / ((1.0 - growth.powf(-n)) / rate) + future_value / accumulation
    } else {
        present_value / ((growth - growth.powf(1.0 - n)) / rate)
            + future_value / (growth * accumulation)
    }
}

/// Level payment with the same present value as non-dated cash flows.
///
/// # Errors
///
/// Returns `CouponError::DatedMismatch` for a dated series.
pub fn annuity_of(cash_flows: &CashFlows, rate: f64, periods: u32, arrears: bool) -> BondResult<f64> {
    let pv = present_value_of(cash_flows, rate)?;
    Ok(annuity(rate, periods, pv, 0.0, arrears))
}

// =============================================================================
// RATE OF RETURN
// =============================================================================

/// Periodic rate at which the payments, the present value and the future
/// value net to zero.
///
/// # Errors
///
/// - `MathError::InvalidInput` when `periods` exceeds `i32::MAX`
/// - `MathError::ConvergenceFailed` when Newton does not settle
///
/// # Example
///
/// ```rust
/// use coupon_bonds::tvm::internal_rate_of_return;
///
/// let irr = internal_rate_of_return(48, -200.0, 8000.0, 0.0, true).unwrap();
/// assert!((irr - 0.007701).abs() < 1e-6);
/// ```
pub fn internal_rate_of_return(
    periods: u32,
    annuity: f64,
    present_value: f64,
    future_value: f64,
    arrears: bool,
) -> BondResult<f64> {
    let n = i32::try_from(periods)
        .map_err(|_| MathError::invalid_input(format!("{periods} periods is too many")))?;
    let (from, to) = if arrears { (1, n) } else { (0, n - 1) };

    let net = |rate: f64| {
        let discount = 1.0 / (1.0 + rate);
        present_value
            + geometric_series_sum(annuity, discount, from, to)
            + future_value * discount.powi(n)
    };
    let result = newton_raphson_numerical(net, RATE_GUESS, &SolverConfig::newton())?;
    Ok(result.root)
}

/// Periodic rate at which non-dated cash flows have zero present value.
///
/// # Errors
///
/// - `CouponError::DatedMismatch` for a dated series
/// - `MathError::ConvergenceFailed` when Newton does not settle
pub fn internal_rate_of_return_of(cash_flows: &CashFlows) -> BondResult<f64> {
    let amounts = non_dated_amounts(cash_flows)?;
    let result = newton_raphson_numerical(
        |rate| discounted_sum(&amounts, rate),
        RATE_GUESS,
        &SolverConfig::newton(),
    )?;
    Ok(result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BondError;
    use approx::assert_abs_diff_eq;
    use coupon_core::Date;

    #[test]
    fn test_present_value_monthly_annuity() {
        let rate = 0.08 / 12.0;
        assert_abs_diff_eq!(present_value(rate, 240.0, 500.0, 0.0, true), 59777.145851, epsilon = 1e-6);
        assert_abs_diff_eq!(present_value(rate, 240.0, 500.0, 0.0, false), 60175.660157, epsilon = 1e-6);
    }

    #[test]
    fn test_present_value_of_built_flows() {
        let rate = 0.08 / 12.0;
        let arrears = CashFlows::build(240, 0.0, 500.0, 0.0, true);
        assert_abs_diff_eq!(present_value_of(&arrears, rate).unwrap(), 59777.145851, epsilon = 1e-6);
        let due = CashFlows::build(240, 0.0, 500.0, 0.0, false);
        assert_abs_diff_eq!(present_value_of(&due, rate).unwrap(), 60175.660157, epsilon = 1e-6);
    }

    #[test]
    fn test_fractional_periods() {
        assert_abs_diff_eq!(present_value(0.05, 2.5, 10.0, 100.0, true), 111.48298658, epsilon = 1e-8);
        assert_abs_diff_eq!(present_value(0.05, 2.5, 10.0, 100.0, false), 112.63128524, epsilon = 1e-8);
        assert_abs_diff_eq!(future_value(0.05, 2.5, 10.0, 100.0, true), 138.91789658, epsilon = 1e-8);
        assert_abs_diff_eq!(future_value(0.05, 2.5, 10.0, 100.0, false), 140.21515980, epsilon = 1e-8);
    }

    #[test]
    fn test_future_value() {
        let rate = 0.06 / 12.0;
        assert_abs_diff_eq!(future_value(rate, 10.0, 200.0, 500.0, true), 2571.175348, epsilon = 1e-6);
        assert_abs_diff_eq!(future_value(rate, 10.0, 200.0, 500.0, false), 2581.403374, epsilon = 1e-6);
    }

    #[test]
    fn test_future_value_of() {
        let flows = CashFlows::from_amounts(&[100.0, 10.0, 10.0]);
        let value = future_value_of(&flows, 0.1, 2).unwrap();
        assert_abs_diff_eq!(value, 100.0 * 1.21 + 10.0 * 1.1 + 10.0, epsilon = 1e-12);
        assert!(future_value_of(&flows, 0.1, 3).is_err());
    }

    #[test]
    fn test_annuity() {
        let monthly = 0.08 / 12.0;
        assert_abs_diff_eq!(annuity(monthly, 10, 10000.0, 0.0, true), 1037.032089, epsilon = 1e-6);
        assert_abs_diff_eq!(annuity(monthly, 10, 10000.0, 0.0, false), 1030.164327, epsilon = 1e-6);

        let rate = 0.06 / 12.0;
        assert_abs_diff_eq!(annuity(rate, 216, 0.0, 50000.0, true), 129.081161, epsilon = 1e-6);
        assert_abs_diff_eq!(annuity(rate, 216, 0.0, 50000.0, false), 128.438966, epsilon = 1e-6);
    }

    #[test]
    fn test_annuity_of_recovers_payment() {
        let rate = 0.08 / 12.0;
        let flows = CashFlows::build(10, 0.0, 1037.032089, 0.0, true);
        let payment = annuity_of(&flows, rate, 10, true).unwrap();
        assert_abs_diff_eq!(payment, 1037.032089, epsilon = 1e-6);
    }

    #[test]
    fn test_internal_rate_of_return() {
        let irr = internal_rate_of_return(48, -200.0, 8000.0, 0.0, true).unwrap();
        assert_abs_diff_eq!(irr, 0.007701, epsilon = 1e-6);

        let flows = CashFlows::build(48, 8000.0, -200.0, 0.0, true);
        let irr = internal_rate_of_return_of(&flows).unwrap();
        assert_abs_diff_eq!(irr, 0.007701, epsilon = 1e-6);
    }

    #[test]
    fn test_dated_flows_rejected() {
        let flows = CashFlows::dated(Date::from_ymd(2024, 1, 1).unwrap());
        let err = present_value_of(&flows, 0.05).unwrap_err();
        assert!(matches!(err, BondError::Core(CouponError::DatedMismatch { .. })));
        assert!(internal_rate_of_return_of(&flows).is_err());
    }
}
