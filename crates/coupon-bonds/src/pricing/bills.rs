//! Discounted bills.
//!
//! The year fraction is `days(settlement, maturity) / days_of_year(maturity)`
//! under the given basis. Settlement must fall strictly before maturity.

use coupon_core::{DayCountBasis, Date};
use coupon_math::MathError;

use crate::error::{BondError, BondResult};

fn year_fraction(settlement: Date, maturity: Date, basis: DayCountBasis) -> BondResult<f64> {
    if settlement >= maturity {
        return Err(BondError::settlement_after_maturity(settlement, maturity));
    }
    Ok(basis.diff_days(settlement, maturity) as f64 / f64::from(basis.days_of_year(maturity)))
}

/// Price of a discounted bill: `1 / (1 + yield * f)`.
///
/// # Errors
///
/// Returns `BondError::SettlementAfterMaturity` unless settlement precedes maturity.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::price_discounted_bill;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(2013, 11, 14).unwrap();
/// let maturity = Date::from_ymd(2019, 5, 14).unwrap();
/// let p = price_discounted_bill(settlement, maturity, 0.037894586, DayCountBasis::Act360).unwrap();
/// assert!((p - 0.8255850).abs() < 1e-7);
/// ```
pub fn price_discounted_bill(
    settlement: Date,
    maturity: Date,
    yield_rate: f64,
    basis: DayCountBasis,
) -> BondResult<f64> {
    Ok(1.0 / (1.0 + yield_rate * year_fraction(settlement, maturity, basis)?))
}

/// Price of a discounted bill with the discount taxed at `tax_rate`.
///
/// # Errors
///
/// Returns `BondError::SettlementAfterMaturity` unless settlement precedes maturity.
pub fn price_discounted_bill_with_tax(
    settlement: Date,
    maturity: Date,
    yield_rate: f64,
    basis: DayCountBasis,
    tax_rate: f64,
) -> BondResult<f64> {
    let price = price_discounted_bill(settlement, maturity, yield_rate, basis)?;
    Ok(price + (1.0 - price) * tax_rate)
}

/// Price of a discounted bill by the linear formula `1 - yield * f`.
///
/// # Errors
///
/// Returns `BondError::SettlementAfterMaturity` unless settlement precedes maturity.
pub fn price_discounted_bill_linear(
    settlement: Date,
    maturity: Date,
    yield_rate: f64,
    basis: DayCountBasis,
) -> BondResult<f64> {
    Ok(1.0 - yield_rate * year_fraction(settlement, maturity, basis)?)
}

/// Yield of a discounted bill: `(1 - price) / (price * f)`.
///
/// # Errors
///
/// - `BondError::SettlementAfterMaturity` unless settlement precedes maturity
/// - `MathError::DivisionByZero` when `price` or the year fraction is zero
pub fn yield_discounted_bill(
    settlement: Date,
    maturity: Date,
    price: f64,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let denominator = price * year_fraction(settlement, maturity, basis)?;
    if denominator == 0.0 {
        return Err(MathError::DivisionByZero { value: denominator }.into());
    }
    Ok((1.0 - price) / denominator)
}

/// Yield of a discounted bill by the linear formula `(1 - price) / f`.
///
/// # Errors
///
/// - `BondError::SettlementAfterMaturity` unless settlement precedes maturity
/// - `MathError::DivisionByZero` when the year fraction is zero
pub fn yield_discounted_bill_linear(
    settlement: Date,
    maturity: Date,
    price: f64,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let fraction = year_fraction(settlement, maturity, basis)?;
    if fraction == 0.0 {
        return Err(MathError::DivisionByZero { value: fraction }.into());
    }
    Ok((1.0 - price) / fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn after_tax(price: f64) -> f64 {
        (price - 0.2) / (1.0 - 0.2)
    }

    const QUOTES: [(i64, f64, f64); 8] = [
        (91, 0.05, 0.99002),
        (91, 0.04995, 0.99002),
        (182, 0.05248, 0.97932),
        (182, 0.05125, 0.97979),
        (182, 0.05350, 0.97894),
        (364, 0.05373, 0.95878),
        (364, 0.05250, 0.95967),
        (364, 0.05473, 0.95805),
    ];

    #[test]
    fn test_price_discounted_bill_quotes() {
        let basis = DayCountBasis::Act360;
        let base = d(2012, 1, 1);
        for (days, y, quoted) in QUOTES {
            let maturity = basis.add_days(base, days).unwrap();
            let p = price_discounted_bill(base, maturity, y, basis).unwrap();
            assert_abs_diff_eq!(p, after_tax(quoted), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_yield_discounted_bill_quotes() {
        let basis = DayCountBasis::Act360;
        let base = d(2012, 1, 1);
        for (days, y, quoted) in QUOTES {
            let maturity = basis.add_days(base, days).unwrap();
            let result = yield_discounted_bill(base, maturity, after_tax(quoted), basis).unwrap();
            assert_abs_diff_eq!(result, y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_price_discounted_bill_long() {
        let p = price_discounted_bill(d(2013, 11, 14), d(2019, 5, 14), 0.037894586, DayCountBasis::Act360)
            .unwrap();
        assert_abs_diff_eq!(p, 0.8255850, epsilon = 1e-7);
    }

    #[test]
    fn test_price_with_tax() {
        let basis = DayCountBasis::Act360;
        let p = price_discounted_bill_with_tax(d(2013, 9, 11), d(2013, 12, 4), 0.0086, basis, 0.2)
            .unwrap();
        assert_abs_diff_eq!(p, 0.99839788198, epsilon = 1e-9);
        let p = price_discounted_bill_with_tax(d(2013, 11, 14), d(2019, 5, 14), 0.037894586, basis, 0.2)
            .unwrap();
        assert_abs_diff_eq!(p, 0.8604680, epsilon = 1e-7);
    }

    #[test]
    fn test_linear_formulas() {
        let basis = DayCountBasis::Act360;
        let p = price_discounted_bill_linear(d(1992, 2, 7), d(1992, 3, 1), 0.0535, basis).unwrap();
        assert_abs_diff_eq!(p, 0.996581944, epsilon = 1e-9);
        let y = yield_discounted_bill_linear(d(1992, 2, 7), d(1992, 3, 1), 0.996581944, basis).unwrap();
        assert_abs_diff_eq!(y, 0.0535, epsilon = 1e-4);
        let y = yield_discounted_bill_linear(d(2008, 3, 31), d(2008, 6, 1), 0.9845, DayCountBasis::Eur30360)
            .unwrap();
        assert_abs_diff_eq!(y, 0.091417, epsilon = 1e-4);
    }

    #[test]
    fn test_settlement_on_maturity_rejected() {
        let basis = DayCountBasis::Act360;
        let day = d(2013, 12, 4);

        for result in [
            yield_discounted_bill(day, day, 0.99, basis),
            yield_discounted_bill(day, day, 1.0, basis),
            yield_discounted_bill_linear(day, day, 0.99, basis),
            price_discounted_bill(day, day, 0.05, basis),
        ] {
            assert!(matches!(result, Err(BondError::SettlementAfterMaturity { .. })));
        }
    }

    #[test]
    fn test_settlement_after_maturity_rejected() {
        let basis = DayCountBasis::Act360;
        let maturity = d(2013, 12, 4);
        let settlement = maturity.add_days(10);

        let err = price_discounted_bill(settlement, maturity, 0.05, basis).unwrap_err();
        assert_eq!(err, BondError::settlement_after_maturity(settlement, maturity));
        assert!(price_discounted_bill_with_tax(settlement, maturity, 0.05, basis, 0.2).is_err());
        assert!(price_discounted_bill_linear(settlement, maturity, 0.05, basis).is_err());
    }

    #[test]
    fn test_zero_price_rejected() {
        let err = yield_discounted_bill(d(2013, 9, 11), d(2013, 12, 4), 0.0, DayCountBasis::Act360)
            .unwrap_err();
        assert!(matches!(err, BondError::Math(MathError::DivisionByZero { .. })));
    }
}
