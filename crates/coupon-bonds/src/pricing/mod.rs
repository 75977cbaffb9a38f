//! Bond valuation per unit of principal.
//!
//! This module provides:
//! - [`price`], [`price_with_clean`], [`price_street`]: regular bonds
//! - [`price_odd_bond`], [`price_odd_first_bond`]: bonds with odd periods
//! - [`accrued_interest`], [`accrued_interest_odd_first`]: accrued interest
//! - [`yield_to_maturity`]: Newton inversion of the regular price
//! - [`duration_macaulay`], [`duration_modified`], [`convexity`]: risk measures
//! - [`effective_interest_rate`]: Pegasus inversion of [`EirResidual`]
//! - Discounted bills and the `*_many` batch forms
//!
//! Rates are annual decimals (`0.05` for 5%) and prices are per 1.00 of
//! principal.

mod accrued;
mod bills;
mod eir;
mod price;
mod risk;
mod vectorized;
mod yields;

pub use accrued::{accrued_interest, accrued_interest_odd_first};
pub use bills::{
    price_discounted_bill, price_discounted_bill_linear, price_discounted_bill_with_tax,
    yield_discounted_bill, yield_discounted_bill_linear,
};
pub use eir::{
    effective_interest_rate, effective_interest_rate_from_yield, effective_interest_rate_with,
    EirResidual,
};
pub use price::{price, price_odd_bond, price_odd_first_bond, price_street, price_with_clean};
pub use risk::{convexity, duration_macaulay, duration_modified};
pub use vectorized::{
    price_discounted_bill_many, price_many, price_with_clean_many, yield_discounted_bill_many,
    yield_many,
};
pub use yields::{yield_to_maturity, yield_with_config};
