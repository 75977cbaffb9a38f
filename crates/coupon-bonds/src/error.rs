//! Error types for bond operations.

use coupon_core::CouponError;
use coupon_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during schedule generation and valuation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Settlement precedes the issue date and no backward walk was requested.
    #[error("Settlement date {settlement} is before issue date {issue}")]
    SettlementBeforeIssue {
        /// Settlement date.
        settlement: String,
        /// Issue date.
        issue: String,
    },

    /// Settlement falls on or after maturity.
    #[error("Settlement date {settlement} is not before maturity {maturity}")]
    SettlementAfterMaturity {
        /// Settlement date.
        settlement: String,
        /// Maturity date.
        maturity: String,
    },

    /// Bond contract failed validation.
    #[error("Invalid contract {identifier}: {reason}")]
    InvalidContract {
        /// Contract identifier.
        identifier: String,
        /// Description of what's invalid.
        reason: String,
    },

    /// Invalid valuation configuration.
    #[error("Invalid configuration: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CouponError),

    /// Solver error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates a settlement-before-issue error.
    #[must_use]
    pub fn settlement_before_issue(settlement: impl ToString, issue: impl ToString) -> Self {
        Self::SettlementBeforeIssue {
            settlement: settlement.to_string(),
            issue: issue.to_string(),
        }
    }

    /// Creates a settlement-after-maturity error.
    #[must_use]
    pub fn settlement_after_maturity(settlement: impl ToString, maturity: impl ToString) -> Self {
        Self::SettlementAfterMaturity {
            settlement: settlement.to_string(),
            maturity: maturity.to_string(),
        }
    }

    /// Creates an invalid contract error.
    #[must_use]
    pub fn invalid_contract(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidContract {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true when a root search ran out of iterations or evaluations.
    ///
    /// Such a failure means the inputs were individually valid but produced
    /// no root the solver could reach.
    #[must_use]
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::Math(err) if err.is_convergence_failure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_failure_is_distinct() {
        let err: BondError = MathError::ConvergenceFailed {
            iterations: 10,
            residual: 0.5,
        }
        .into();
        assert!(err.is_convergence_failure());

        let err: BondError = CouponError::unsupported_frequency(5).into();
        assert!(!err.is_convergence_failure());
    }

    #[test]
    fn test_display() {
        let err = BondError::invalid_contract("B1", "frequency 5 does not divide 12");
        assert_eq!(
            err.to_string(),
            "Invalid contract B1: frequency 5 does not divide 12"
        );
    }
}
