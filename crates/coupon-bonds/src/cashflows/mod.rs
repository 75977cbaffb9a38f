//! Cash flow generation for bonds.
//!
//! Every generator returns a merged, dated [`CashFlows`] whose base date is
//! settlement. Components are built as separate dated series and merged in,
//! so each output date carries a value for every component.
//!
//! | Generator | Components |
//! |-----------|------------|
//! | [`regular_cash_flows`] | `PRINCIPAL`, `INTEREST`, optional `TIME_FACTOR` |
//! | [`odd_cash_flows`] | `PRINCIPAL`, `INTEREST`, optional `TIME_FACTOR` |
//! | [`amortize_effective_interest`] | `PRINCIPAL`, `EFFECTIVE_INTEREST`, `COUPON`, `PREMIUM`, `DISCOUNT` |
//! | [`amortize_straight_line`] | `PRINCIPAL`, `COUPON`, `PREMIUM`, `DISCOUNT` |
//!
//! `TIME_FACTOR` is the number of coupon periods from settlement to each
//! payment, starting from the fractional first period.

mod amortization;

pub use amortization::{
    amortize, amortize_effective_interest, amortize_straight_line, AmortizationMethod,
};

use coupon_core::types::cashflows::components::{INTEREST, PRINCIPAL, TIME_FACTOR};
use coupon_core::{CashFlows, DayCountBasis, Date};
use log::warn;

use crate::coupons::{coupon_count_fraction, next_coupon_date_smart, quasi_periods};
use crate::error::BondResult;
use crate::schedule::{odd_schedule, regular_schedule};

/// Per-component series collected before merging.
struct ComponentSeries {
    principal: CashFlows,
    interest: CashFlows,
    time_factor: Option<CashFlows>,
}

impl ComponentSeries {
    fn new(settlement: Date, with_time_factor: bool) -> Self {
        Self {
            principal: CashFlows::dated(settlement),
            interest: CashFlows::dated(settlement),
            time_factor: with_time_factor.then(|| CashFlows::dated(settlement)),
        }
    }

    fn record_time_factor(&mut self, date: Date, factor: f64) -> BondResult<()> {
        if let Some(series) = self.time_factor.as_mut() {
            series.add_at(date, factor)?;
        }
        Ok(())
    }

    fn into_merged(self, settlement: Date) -> BondResult<CashFlows> {
        let mut merged = CashFlows::merged_dated(settlement);
        merged.merge(&self.principal, PRINCIPAL, false)?;
        merged.merge(&self.interest, INTEREST, false)?;
        if let Some(series) = &self.time_factor {
            merged.merge(series, TIME_FACTOR, false)?;
        }
        Ok(merged)
    }
}

/// Cash flows of a bond paying regular periodic interest.
///
/// # Rules
///
/// - Every schedule date before maturity pays `principal * coupon_rate / frequency`
///   interest and no principal.
/// - Maturity pays the same coupon plus the principal.
/// - `TIME_FACTOR` starts at the coupon-count fraction from settlement to the
///   next coupon date and grows by one per period.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::DateBeforeBase` when maturity precedes settlement
///
/// # Example
///
/// ```rust
/// use coupon_bonds::cashflows::regular_cash_flows;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(1993, 10, 1).unwrap();
/// let maturity = Date::from_ymd(2003, 1, 1).unwrap();
/// let cf = regular_cash_flows(settlement, maturity, 100.0, 0.045, 2, DayCountBasis::ActAct, false)
///     .unwrap();
/// assert_eq!(cf.count(), 20);
/// assert!((cf.amount_at(maturity).unwrap() - 102.25).abs() < 1e-12);
/// ```
pub fn regular_cash_flows(
    settlement: Date,
    maturity: Date,
    principal: f64,
    coupon_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    with_time_factor: bool,
) -> BondResult<CashFlows> {
    let schedule = regular_schedule(settlement, maturity, frequency, basis)?;
    let coupon_amount = principal * coupon_rate / f64::from(frequency);
    let next_coupon = next_coupon_date_smart(settlement, maturity, frequency, basis, true)?;
    let mut factor = coupon_count_fraction(settlement, next_coupon, frequency, basis)?;

    let mut series = ComponentSeries::new(settlement, with_time_factor);
    let interim = schedule.len().saturating_sub(1);

    for &date in &schedule[..interim] {
        series.principal.add_at(date, 0.0)?;
        series.interest.add_at(date, coupon_amount)?;
        series.record_time_factor(date, factor)?;
        factor += 1.0;
    }

    series.principal.add_at(maturity, principal)?;
    series.interest.add_at(maturity, coupon_amount)?;
    series.record_time_factor(maturity, factor)?;

    series.into_merged(settlement)
}

/// Cash flows of a bond with an odd first and/or last coupon period.
///
/// # Rules
///
/// - A first coupon after settlement pays interest scaled by the quasi-periods
///   from issue to the first coupon, counted backward from the first coupon.
/// - Interior dates pay the full coupon.
/// - A last coupon after settlement makes the final period odd: maturity pays
///   interest scaled by the quasi-periods from the last coupon, counted
///   forward.
/// - Principal is paid at maturity.
///
/// # Errors
///
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
/// - `CouponError::DateBeforeBase` when maturity precedes settlement
pub fn odd_cash_flows(
    settlement: Date,
    issue: Date,
    maturity: Date,
    first_coupon: Option<Date>,
    last_coupon: Option<Date>,
    principal: f64,
    coupon_rate: f64,
    frequency: u32,
    basis: DayCountBasis,
    with_time_factor: bool,
) -> BondResult<CashFlows> {
    let schedule = odd_schedule(
        settlement,
        maturity,
        first_coupon,
        last_coupon,
        frequency,
        basis,
    )?;
    let periodic_rate = coupon_rate / f64::from(frequency);
    let coupon_amount = principal * periodic_rate;
    let mut series = ComponentSeries::new(settlement, with_time_factor);
    let mut factor = 0.0;

    match first_coupon {
        Some(first) if first > settlement => {
            if schedule.first() != Some(&first) {
                warn!("odd schedule does not start at first coupon {first}");
            }
            factor = quasi_periods(issue, first, frequency, basis, false)?;
            series.interest.add_at(first, principal * factor * periodic_rate)?;
            series.record_time_factor(first, factor)?;
        }
        _ => {
            if let Some(&date) = schedule.first() {
                factor = coupon_count_fraction(settlement, date, frequency, basis)?;
                series.interest.add_at(date, coupon_amount)?;
                series.record_time_factor(date, factor)?;
            }
        }
    }

    if schedule.len() > 2 {
        for &date in &schedule[1..schedule.len() - 1] {
            factor += 1.0;
            series.interest.add_at(date, coupon_amount)?;
            series.record_time_factor(date, factor)?;
        }
    }

    if schedule.len() > 1 {
        match last_coupon {
            Some(last) if last > settlement => {
                let stub = quasi_periods(last, maturity, frequency, basis, true)?;
                factor += stub;
                series.interest.add_at(maturity, principal * stub * periodic_rate)?;
            }
            _ => {
                factor += 1.0;
                series.interest.add_at(maturity, coupon_amount)?;
            }
        }
        series.record_time_factor(maturity, factor)?;
    }

    series.principal.add_at(maturity, principal)?;
    series.into_merged(settlement)
}
