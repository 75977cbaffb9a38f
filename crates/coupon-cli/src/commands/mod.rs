//! CLI command implementations.
//!
//! Rates are entered as percentages (5.0 for 5%) and prices per 100 of
//! principal; the library works in decimals per 1.00.

pub mod accrued;
pub mod amortize;
pub mod analyze;
pub mod bill;
pub mod cashflows;
pub mod price;
pub mod schedule;
pub mod value;

// Re-export submodules for convenience
pub use accrued::AccruedArgs;
pub use amortize::AmortizeArgs;
pub use analyze::AnalyzeArgs;
pub use bill::BillArgs;
pub use cashflows::CashFlowsArgs;
pub use price::PriceArgs;
pub use schedule::ScheduleArgs;
pub use value::ValueArgs;

use chrono::{Datelike, NaiveDate};
use clap::Args;
use coupon_core::types::validate_frequency as check_frequency;
use coupon_core::{CashFlows, DayCountBasis, Date};

use crate::error::{CliError, CliResult};

/// Header and rows of a merged dated series, one column per component.
pub fn component_records(cf: &CashFlows) -> CliResult<(Vec<String>, Vec<Vec<String>>)> {
    let components = cf.components();
    let header = std::iter::once("DATE".to_string())
        .chain(components.iter().map(ToString::to_string))
        .collect();

    let mut rows = Vec::with_capacity(cf.count());
    for &date in cf.dates() {
        let mut row = vec![date.to_string()];
        for component in &components {
            let amount = cf.amount_at_of(date, component).map_err(coupon_bonds::BondError::from)?;
            row.push(format!("{amount:.6}"));
        }
        rows.push(row);
    }
    Ok((header, rows))
}

/// Terms shared by every regular-bond command.
#[derive(Args, Debug, Clone)]
pub struct BondTerms {
    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Coupons per year: 1, 2, 3, 4, 6 or 12
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Day-count basis: 30/360, 30E/360, ACT/360, ACT/365, ACT/ACT
    #[arg(short, long, default_value = "30/360")]
    pub basis: String,
}

/// [`BondTerms`] parsed and validated, with the coupon as a decimal.
#[derive(Debug, Clone, Copy)]
pub struct Terms {
    pub coupon_rate: f64,
    pub maturity: Date,
    pub settlement: Date,
    pub frequency: u32,
    pub basis: DayCountBasis,
}

impl BondTerms {
    /// Parses and validates the terms.
    pub fn resolve(&self) -> CliResult<Terms> {
        Ok(Terms {
            coupon_rate: validate_coupon(self.coupon)? / 100.0,
            maturity: parse_date(&self.maturity)?,
            settlement: parse_date_or_today(self.settlement.as_deref())?,
            frequency: validate_frequency(self.frequency)?,
            basis: parse_basis(&self.basis)?,
        })
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    let naive = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(s.to_string()))?;

    Date::from_ymd(naive.year(), naive.month(), naive.day())
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
pub fn parse_date_or_today(s: Option<&str>) -> CliResult<Date> {
    s.map_or_else(|| Ok(Date::today()), parse_date)
}

/// Parses an optional date.
pub fn parse_optional_date(s: Option<&str>) -> CliResult<Option<Date>> {
    s.map(parse_date).transpose()
}

/// Parses a day-count basis name such as `30/360` or `ACT/ACT`.
pub fn parse_basis(s: &str) -> CliResult<DayCountBasis> {
    s.parse().map_err(|_| CliError::InvalidBasis(s.to_string()))
}

/// Validates a coupon rate.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=100.0).contains(&coupon) {
        return Err(CliError::InvalidCoupon(coupon));
    }
    Ok(coupon)
}

/// Validates a yield value.
pub fn validate_yield(yield_value: f64) -> CliResult<f64> {
    if !(-10.0..=100.0).contains(&yield_value) {
        return Err(CliError::InvalidYield(yield_value));
    }
    Ok(yield_value)
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !(price > 0.0) {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

/// Validates a coupon frequency.
pub fn validate_frequency(frequency: u32) -> CliResult<u32> {
    check_frequency(frequency).map_err(|_| CliError::InvalidFrequency(frequency))
}
