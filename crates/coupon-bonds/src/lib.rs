//! # Coupon Bonds
//!
//! Bond schedules, cash flows and valuation for the Coupon bond analytics library.
//!
//! This crate provides:
//!
//! - **Coupon dates**: previous/next coupon navigation and coupon counts
//! - **Schedules**: regular, zero-coupon and odd first/last period schedules
//! - **Cash Flows**: principal, interest and time-factor series; premium and
//!   discount amortization
//! - **Pricing**: clean/dirty price, accrued interest, yield, duration,
//!   convexity, effective interest rate, discounted bills
//! - **Time value of money**: present/future value, annuities, rate of return
//! - **Contracts**: validated batch valuation of bond contracts
//!
//! All prices are per 1.00 of principal and all rates are annual decimals.
//!
//! ## Example
//!
//! ```rust
//! use coupon_bonds::prelude::*;
//! use coupon_core::{DayCountBasis, Date};
//!
//! let settlement = Date::from_ymd(2008, 2, 15).unwrap();
//! let maturity = Date::from_ymd(2017, 11, 15).unwrap();
//! let basis = DayCountBasis::Nasd30360;
//!
//! let clean = price(settlement, maturity, 0.0575, 0.065, 2, basis).unwrap();
//! let ytm = yield_to_maturity(settlement, maturity, 0.0575, clean, 2, basis).unwrap();
//! assert!((ytm - 0.065).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod cashflows;
pub mod config;
pub mod contract;
pub mod coupons;
pub mod error;
pub mod pricing;
pub mod schedule;
pub mod tvm;

/// Prelude module for convenient imports.
pub mod prelude {
    // Cash flows
    pub use crate::cashflows::{
        amortize, amortize_effective_interest, amortize_straight_line, odd_cash_flows,
        regular_cash_flows, AmortizationMethod,
    };

    // Configuration
    pub use crate::config::ValuationConfig;

    // Contracts
    pub use crate::contract::{value_contracts, BondContract, ContractValuation};

    // Coupon dates
    pub use crate::coupons::{
        coupon_count, coupon_count_fraction, next_coupon_date_backward, next_coupon_date_forward,
        previous_coupon_date,
    };

    // Errors
    pub use crate::error::{BondError, BondResult};

    // Pricing
    pub use crate::pricing::{
        accrued_interest, accrued_interest_odd_first, convexity, duration_macaulay,
        duration_modified, effective_interest_rate, price, price_discounted_bill,
        price_odd_bond, price_odd_first_bond, price_street, price_with_clean,
        yield_discounted_bill, yield_to_maturity, EirResidual,
    };

    // Schedules
    pub use crate::schedule::{odd_schedule, regular_schedule, zero_coupon_schedule};
}

// Re-export commonly used types at crate root
pub use config::ValuationConfig;
pub use contract::{BondContract, ContractValuation};
pub use error::{BondError, BondResult};
