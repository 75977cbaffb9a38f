//! Effective interest rate of regular bonds.
//!
//! The effective interest rate is the annual rate at which rolling the
//! purchase price forward, period by period, exactly retires the bond: each
//! period the carrying value accrues interest at the rate and is reduced by
//! the coupon and principal paid. The rate is found with the Pegasus solver
//! on `[0, 1]`.

use coupon_core::types::cashflows::components::{INTEREST, PRINCIPAL};
use coupon_core::{DayCountBasis, Date};
use coupon_math::solvers::{pegasus, SolverConfig};
use log::debug;

use super::price::price_with_clean;
use crate::cashflows::regular_cash_flows;
use crate::coupons::{coupon_count_fraction, next_coupon_date_backward};
use crate::error::BondResult;

/// Carrying value left at maturity as a function of the annual effective
/// interest rate.
///
/// The first period may be partial: its coupon and accrual are both scaled
/// by the fraction of a period from settlement to the next coupon.
#[derive(Debug, Clone)]
pub struct EirResidual {
    price: f64,
    frequency: f64,
    first_fraction: f64,
    principal: Vec<f64>,
    interest: Vec<f64>,
}

impl EirResidual {
    /// Prepares the unit-principal flows of a regular bond bought at `price`.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
    pub fn new(
        settlement: Date,
        maturity: Date,
        coupon_rate: f64,
        price: f64,
        frequency: u32,
        basis: DayCountBasis,
    ) -> BondResult<Self> {
        let next_coupon = next_coupon_date_backward(settlement, maturity, frequency, basis)?;
        let first_fraction = coupon_count_fraction(settlement, next_coupon, frequency, basis)?;

        let cf = regular_cash_flows(settlement, maturity, 1.0, coupon_rate, frequency, basis, false)?;
        let start = usize::from(cf.amount(0)? == 0.0);

        Ok(Self {
            price,
            frequency: f64::from(frequency),
            first_fraction,
            principal: cf.component(PRINCIPAL)?.get(start..).unwrap_or_default().to_vec(),
            interest: cf.component(INTEREST)?.get(start..).unwrap_or_default().to_vec(),
        })
    }

    /// Carrying value remaining after the last payment at annual rate `rate`.
    pub fn value(&self, rate: f64) -> f64 {
        let periodic = rate / self.frequency;
        let mut carrying = self.price;

        for (i, (principal, interest)) in self.principal.iter().zip(&self.interest).enumerate() {
            let (coupon, accrual) = if i == 0 {
                (
                    interest * self.first_fraction,
                    periodic * carrying * self.first_fraction,
                )
            } else {
                (*interest, periodic * carrying)
            };
            carrying -= coupon - accrual + principal;
        }
        carrying
    }
}

/// Annual effective interest rate of a regular bond bought at `price`.
///
/// Uses an absolute accuracy of 1e-8 and at most 10000 evaluations.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `MathError::InvalidBracket` when the residual keeps its sign on `[0, 1]`
/// - `MathError::TooManyEvaluations` when the evaluation cap is reached
///
/// # Example
///
/// ```rust
/// use coupon_bonds::pricing::effective_interest_rate;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(2008, 3, 3).unwrap();
/// let maturity = Date::from_ymd(2013, 3, 3).unwrap();
/// let eir = effective_interest_rate(settlement, maturity, 0.0875, 1.00589894, 2, DayCountBasis::Eur30360)
///     .unwrap();
/// assert!((eir - 0.086023538).abs() < 1e-8);
/// ```
pub fn effective_interest_rate(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<f64> {
    effective_interest_rate_with(
        settlement,
        maturity,
        coupon_rate,
        price,
        frequency,
        basis,
        &SolverConfig::pegasus(),
    )
}

/// Annual effective interest rate with explicit Pegasus settings.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `MathError::InvalidBracket` when the residual keeps its sign on `[0, 1]`
/// - `MathError::TooManyEvaluations` when `config.max_iterations` evaluations
///   are used up
pub fn effective_interest_rate_with(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
    config: &SolverConfig,
) -> BondResult<f64> {
    let residual = EirResidual::new(settlement, maturity, coupon_rate, price, frequency, basis)?;
    let result = pegasus(|rate| residual.value(rate), 0.0, 1.0, config)?;

    debug!(
        "effective interest rate {} after {} evaluations",
        result.root, result.iterations
    );
    Ok(result.root)
}

/// Annual effective interest rate of a regular bond bought at the clean
/// price implied by `yield_rate`.
///
/// # Errors
///
/// Fails when pricing the bond or [`effective_interest_rate_with`] fails.
pub fn effective_interest_rate_from_yield(
    settlement: Date,
    maturity: Date,
    coupon_rate: f64,
    yield_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    config: &SolverConfig,
) -> BondResult<f64> {
    let price = price_with_clean(settlement, maturity, coupon_rate, yield_rate, frequency, basis, true)?;
    effective_interest_rate_with(settlement, maturity, coupon_rate, price, frequency, basis, config)
}
