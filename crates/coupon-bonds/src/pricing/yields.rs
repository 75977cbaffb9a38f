//! Yield to maturity of regular bonds.

use coupon_core::{DayCountBasis, Date};
use coupon_math::solvers::newton_raphson_numerical;
use log::debug;

use super::price::TimedFlows;
use crate::config::ValuationConfig;
use crate::error::BondResult;

/// Annual yield that reprices a regular bond to `price` (clean).
///
/// Newton's method with a numerical derivative, seeded at 10%.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when no payment remains after settlement
/// - `MathError::ConvergenceFailed` when Newton does not settle
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::yield_to_maturity;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(2008, 6, 5).unwrap();
/// let maturity = Date::from_ymd(2013, 3, 3).unwrap();
/// let y = yield_to_maturity(settlement, maturity, 0.0875, 1.0059, 2, DayCountBasis::Eur30360)
///     .unwrap();
/// assert!((y - 0.0859).abs() < 1e-5);
/// ```
pub fn yield_to_maturity(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    yield_with_config(
        settlement,
        maturity,
        coupon_rate,
        price,
        frequency,
        basis,
        &ValuationConfig::default(),
    )
}

/// Annual yield with explicit solver settings.
///
/// `price` is read as clean or dirty according to `config.clean`.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when no payment remains after settlement
/// - `MathError::ConvergenceFailed` when Newton does not settle within
///   `config.newton_max_iterations`
pub fn yield_with_config(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
    config: &ValuationConfig,
) -> BondResult<f64> {
    let flows = TimedFlows::regular(settlement, maturity, coupon_rate, frequency, basis)?;
    let clean = config.clean;
    let result = newton_raphson_numerical(
        |y| flows.price(y, frequency, clean) - price,
        config.yield_guess,
        &config.newton_config(),
    )?;

    debug!(
        "yield {} for price {price} after {} iterations",
        result.root, result.iterations
    );
    Ok(result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_with_clean;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_yield_eur_quotes() {
        let basis = DayCountBasis::Eur30360;
        let cases = [
            (d(2008, 6, 5), d(2013, 3, 3), 0.0875, 1.0059, 0.0859),
            (d(2008, 6, 5), d(2013, 3, 3), 0.0875, 1.01421, 0.08375),
            (d(2008, 6, 5), d(2013, 3, 3), 0.0875, 1.00956, 0.08495),
            (d(2008, 3, 27), d(2017, 8, 23), 0.0775, 1.03515, 0.07227),
            (d(2008, 3, 27), d(2017, 8, 23), 0.0775, 1.05447, 0.0695),
            (d(2002, 3, 21), d(2007, 2, 28), 0.13, 1.01780, 0.125),
            (d(2002, 3, 21), d(2007, 2, 28), 0.13, 1.00729, 0.1279),
            (d(2009, 3, 27), d(2016, 3, 27), 0.0, 0.53997, 0.09),
        ];
        for (settlement, maturity, coupon, price, expected) in cases {
            let y = yield_to_maturity(settlement, maturity, coupon, price, 2, basis).unwrap();
            assert_abs_diff_eq!(y, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_yield_long_and_short_dated() {
        let basis = DayCountBasis::Eur30360;
        let y = yield_to_maturity(d(2009, 5, 28), d(2028, 12, 14), 0.095, 1.06334, 2, basis)
            .unwrap();
        assert_abs_diff_eq!(y, 0.0881377, epsilon = 1e-4);

        let y = yield_to_maturity(d(2007, 10, 1), d(2008, 1, 12), 0.0925, 1.00039, 2, basis)
            .unwrap();
        assert_abs_diff_eq!(y, 0.08925, epsilon = 1e-4);
    }

    #[test]
    fn test_yield_of_dirty_price() {
        let basis = DayCountBasis::Nasd30360;
        let (settlement, maturity) = (d(2008, 2, 15), d(2017, 11, 15));
        let dirty = price_with_clean(settlement, maturity, 0.0575, 0.065, 2, basis, false).unwrap();
        let config = ValuationConfig::default().with_clean(false);
        let y = yield_with_config(settlement, maturity, 0.0575, dirty, 2, basis, &config).unwrap();
        assert_abs_diff_eq!(y, 0.065, epsilon = 1e-6);
    }

    #[test]
    fn test_yield_iteration_cap() {
        let config = ValuationConfig::default().with_newton_max_iterations(1);
        let err = yield_with_config(
            d(2008, 6, 5),
            d(2013, 3, 3),
            0.0875,
            1.0059,
            2,
            DayCountBasis::Eur30360,
            &config,
        )
        .unwrap_err();
        assert!(err.is_convergence_failure());
    }

    proptest! {
        #[test]
        fn prop_price_yield_round_trip(
            offset in 0i64..3000,
            coupon in 0.0f64..0.12,
            yield_rate in 0.005f64..0.15,
        ) {
            let basis = DayCountBasis::ActAct;
            let settlement = basis.add_days(d(2010, 1, 1), offset).unwrap();
            let maturity = d(2020, 6, 15);
            let p = price_with_clean(settlement, maturity, coupon, yield_rate, 2, basis, true)
                .unwrap();
            let y = yield_to_maturity(settlement, maturity, coupon, p, 2, basis).unwrap();
            let repriced = price_with_clean(settlement, maturity, coupon, y, 2, basis, true)
                .unwrap();
            prop_assert!((repriced - p).abs() < 1e-6);
        }
    }
}
