//! # Coupon Math
//!
//! Numerical building blocks for the Coupon bond analytics library.
//!
//! - **Solvers**: Newton's method with a central-difference derivative, and the
//!   Pegasus bracketed secant method
//! - **Differentiation**: symmetric (central) finite differences
//! - **Series**: finite geometric series used by annuity formulas
//!
//! Every solver is bounded by an iteration or evaluation cap and reports
//! non-convergence as a [`MathError`] rather than returning NaN.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod differentiation;
pub mod error;
pub mod series;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::differentiation::central_difference;
    pub use crate::error::{MathError, MathResult};
    pub use crate::series::geometric_series_sum;
    pub use crate::solvers::{newton_raphson_numerical, pegasus, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
