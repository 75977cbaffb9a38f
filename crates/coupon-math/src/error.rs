//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by the solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iterative solver hit its iteration cap.
    #[error("Failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final absolute residual.
        residual: f64,
    },

    /// Bracket endpoints do not straddle a root.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Bracketed solver exceeded its function-evaluation budget.
    #[error("Exceeded maximum of {max} function evaluations")]
    TooManyEvaluations {
        /// The evaluation cap.
        max: u32,
    },

    /// Division by zero or a non-finite derivative.
    #[error("Division by zero or near-zero value: {value:.2e}")]
    DivisionByZero {
        /// The offending denominator.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true when the inputs were acceptable but no root was reached
    /// within the configured budget.
    #[must_use]
    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            Self::ConvergenceFailed { .. } | Self::TooManyEvaluations { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(10000, 1e-6);
        assert!(err.to_string().contains("10000 iterations"));
        assert!(err.is_convergence_failure());
    }

    #[test]
    fn test_bad_input_is_not_convergence_failure() {
        let err = MathError::InvalidBracket {
            a: 0.0,
            b: 1.0,
            fa: 1.0,
            fb: 2.0,
        };
        assert!(!err.is_convergence_failure());
        assert!(MathError::TooManyEvaluations { max: 26 }.is_convergence_failure());
    }
}
