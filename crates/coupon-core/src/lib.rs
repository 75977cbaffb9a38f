//! # Coupon Core
//!
//! Foundational types for the Coupon bond analytics library.
//!
//! - **Dates**: a calendar [`Date`] with the month arithmetic used by coupon schedules
//! - **Day Count Bases**: the closed set of [`DayCountBasis`] conventions and the
//!   basis-dependent date arithmetic (`diff_days`, `add_months`, `add_days`, `days_of_year`)
//! - **Cash Flows**: the [`CashFlows`] series, dated or non-dated, with optional named components
//!
//! ## Leap years
//!
//! Month lengths, end-of-month tests and `days_of_year` use the `year % 4 == 0` leap rule.
//! Valuation results depend on it, so it is not replaced by the Gregorian rule.
//!
//! ## Example
//!
//! ```rust
//! use coupon_core::prelude::*;
//!
//! let start = Date::from_ymd(2008, 1, 30).unwrap();
//! let end = Date::from_ymd(2008, 2, 1).unwrap();
//! assert_eq!(DayCountBasis::Nasd30360.diff_days(start, end), 1);
//! assert_eq!(DayCountBasis::ActAct.diff_days(start, end), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DayCountBasis, DayCountParseError};
    pub use crate::error::{CouponError, CouponResult};
    pub use crate::types::cashflows::components;
    pub use crate::types::{months_per_period, CashFlows, Date};
}

// Re-export commonly used types at crate root
pub use daycounts::DayCountBasis;
pub use error::{CouponError, CouponResult};
pub use types::{CashFlows, Date};
