//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Unknown day-count basis.
    #[error("Invalid day-count basis: {0}. Use 30/360, 30E/360, ACT/360, ACT/365 or ACT/ACT.")]
    InvalidBasis(String),

    /// Invalid coupon rate.
    #[error("Invalid coupon rate: {0}. Must be between 0 and 100.")]
    InvalidCoupon(f64),

    /// Invalid yield.
    #[error("Invalid yield: {0}. Must be between -10 and 100.")]
    InvalidYield(f64),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// Invalid coupon frequency.
    #[error("Invalid frequency: {0}. Use 1, 2, 3, 4, 6 or 12.")]
    InvalidFrequency(u32),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] coupon_bonds::BondError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
