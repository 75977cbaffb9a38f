//! Error types for the Coupon core crate.
//!
//! Every failure raised by date arithmetic, frequency validation and the
//! cash-flow series is a [`CouponError`]. Callers never receive NaN or a
//! silent default in place of one of these.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CouponResult<T> = Result<T, CouponError>;

/// The error type for dates, day-count bases and cash-flow series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CouponError {
    /// Invalid or unrepresentable calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Coupon frequency that does not divide twelve months.
    #[error("Frequency of {frequency} not supported")]
    UnsupportedFrequency {
        /// The rejected payments-per-year value.
        frequency: u32,
    },

    /// Operation that the day-count basis cannot perform.
    #[error("Day count basis {basis} does not support {operation}")]
    UnsupportedBasis {
        /// Name of the basis.
        basis: String,
        /// The operation that was requested.
        operation: String,
    },

    /// Parallel array arguments of unequal length.
    #[error("Array arguments differ in length: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length of the first array argument.
        expected: usize,
        /// Length of the offending argument.
        actual: usize,
    },

    /// Cash flow dated earlier than the series base date.
    #[error("Date {date} cannot be earlier than the cash flow base date {base}")]
    DateBeforeBase {
        /// The rejected date.
        date: String,
        /// The base date of the series.
        base: String,
    },

    /// Merge of dated series with different base dates.
    #[error("Only cash flows with the same base date can be merged: expected {expected}, got {actual}")]
    BaseDateMismatch {
        /// Base date of the receiving series.
        expected: String,
        /// Base date of the merged series.
        actual: String,
    },

    /// Dated and non-dated series used together.
    #[error("Dated/non-dated mismatch: {reason}")]
    DatedMismatch {
        /// Description of the mismatch.
        reason: String,
    },

    /// Component already present and overwrite not requested.
    #[error("Component [{component}] already exists and overwrite is false")]
    ComponentExists {
        /// Name of the component.
        component: String,
    },

    /// Component lookup on a series that does not hold it.
    #[error("Cash flow component {component} is not available")]
    ComponentNotFound {
        /// Name of the component.
        component: String,
    },

    /// Component operation on a series without components.
    #[error("Components are not supported by this cash flow series")]
    ComponentsNotSupported,

    /// Date-indexed operation on a non-dated series.
    #[error("Cash flow is not dated")]
    NotDated,

    /// Index past the end of the series.
    #[error("Cash flow index {index} out of range, only 0 to {count} exclusive are available")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of entries in the series.
        count: usize,
    },

    /// Malformed cash-flow construction or mutation.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the problem.
        reason: String,
    },
}

impl CouponError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unsupported frequency error.
    #[must_use]
    pub fn unsupported_frequency(frequency: u32) -> Self {
        Self::UnsupportedFrequency { frequency }
    }

    /// Creates an unsupported basis error.
    #[must_use]
    pub fn unsupported_basis(basis: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedBasis {
            basis: basis.into(),
            operation: operation.into(),
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Creates a dated/non-dated mismatch error.
    #[must_use]
    pub fn dated_mismatch(reason: impl Into<String>) -> Self {
        Self::DatedMismatch {
            reason: reason.into(),
        }
    }

    /// Creates a component-not-found error.
    #[must_use]
    pub fn component_not_found(component: impl Into<String>) -> Self {
        Self::ComponentNotFound {
            component: component.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cash_flow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }

    /// Returns true for argument-shape errors raised by vectorized entry points.
    #[must_use]
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, Self::LengthMismatch { .. })
    }
}
