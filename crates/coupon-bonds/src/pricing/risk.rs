//! Duration and convexity of regular bonds.
//!
//! All measures discount every remaining flow with compounding at
//! `yield / frequency`, including a single final payment, and are normalized
//! by the dirty price computed the same way.

use coupon_core::{DayCountBasis, Date};

use super::price::TimedFlows;
use crate::error::BondResult;

/// Weighted sums over the discounted flows.
struct Moments {
    price: f64,
    weighted: f64,
    squared: f64,
}

fn moments(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    periodic_yield: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<Moments> {
    let flows = TimedFlows::regular(settlement, maturity, coupon_rate, frequency, basis)?;
    let mut m = Moments {
        price: 0.0,
        weighted: 0.0,
        squared: 0.0,
    };

    for (t, amount) in flows.iter() {
        let pv = amount / (1.0 + periodic_yield).powf(t);
        m.price += pv;
        m.weighted += pv * t;
        m.squared += pv * t * (t + 1.0);
    }
    Ok(m)
}

/// Macaulay duration in years.
///
/// # Formula
///
/// ```text
/// D = sum(t_i * CF_i / (1 + y)^t_i) / (frequency * sum(CF_i / (1 + y)^t_i))
/// ```
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when no payment remains after settlement
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::duration_macaulay;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(2008, 1, 1).unwrap();
/// let maturity = Date::from_ymd(2016, 1, 1).unwrap();
/// let d = duration_macaulay(settlement, maturity, 0.08, 0.09, 2, DayCountBasis::ActAct).unwrap();
/// assert!((d - 5.993775).abs() < 1e-6);
/// ```
pub fn duration_macaulay(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let freq = f64::from(frequency);
    let m = moments(settlement, maturity, coupon_rate, yield_rate / freq, frequency, basis)?;
    Ok(m.weighted / (freq * m.price))
}

/// Modified duration: Macaulay duration over `1 + yield / frequency`.
///
/// # Errors
///
/// Fails exactly when [`duration_macaulay`] fails.
pub fn duration_modified(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let macaulay = duration_macaulay(settlement, maturity, coupon_rate, yield_rate, frequency, basis)?;
    Ok(macaulay / (1.0 + yield_rate / f64::from(frequency)))
}

/// Convexity in years squared.
///
/// # Formula
///
/// ```text
/// C = sum(t_i * (t_i + 1) * CF_i / (1 + y)^t_i) / (frequency^2 * P * (1 + y)^2)
/// ```
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::IndexOutOfRange` when no payment remains after settlement
pub fn convexity(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    let freq = f64::from(frequency);
    let y = yield_rate / freq;
    let m = moments(settlement, maturity, coupon_rate, y, frequency, basis)?;
    Ok(m.squared / (freq * freq * m.price * (1.0 + y) * (1.0 + y)))
}
