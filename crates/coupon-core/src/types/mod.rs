//! Domain types: dates, coupon frequencies and cash-flow series.

pub mod cashflows;
mod date;
mod frequency;

pub use cashflows::CashFlows;
pub use date::{last_day_of_month, Date};
pub use frequency::{months_per_period, validate_frequency};
