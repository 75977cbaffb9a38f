//! Root-finding algorithms.
//!
//! - [`newton_raphson_numerical`]: Newton's method with a central-difference
//!   derivative; the step size doubles as the convergence tolerance
//! - [`pegasus`]: bracketed secant method with Pegasus weighting, for
//!   residuals that are not smooth or monotone everywhere
//!
//! # Choosing a Solver
//!
//! | Solver | Needs | Stops when | Budget |
//! |--------|-------|------------|--------|
//! | Newton | Initial guess | `abs(x1 - x0) <= h` | iterations |
//! | Pegasus | Sign-changing bracket | bracket width or residual small | function evaluations |
//!
//! # Example
//!
//! ```rust
//! use coupon_math::solvers::{newton_raphson_numerical, pegasus, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//!
//! let newton = newton_raphson_numerical(f, 1.0, &SolverConfig::newton()).unwrap();
//! let bracketed = pegasus(f, 0.0, 2.0, &SolverConfig::pegasus()).unwrap();
//!
//! assert!((newton.root - std::f64::consts::SQRT_2).abs() < 1e-6);
//! assert!((bracketed.root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```

mod newton;
mod pegasus;

pub use newton::newton_raphson_numerical;
pub use pegasus::{pegasus, FUNCTION_VALUE_ACCURACY, RELATIVE_ACCURACY};

/// Default Newton step, also its convergence tolerance.
pub const NEWTON_STEP: f64 = 1e-6;

/// Default Newton iteration cap.
pub const NEWTON_MAX_ITERATIONS: u32 = 10_000;

/// Default absolute accuracy of the bracketed solver.
pub const PEGASUS_ACCURACY: f64 = 1e-8;

/// Default function-evaluation cap of the bracketed solver.
pub const PEGASUS_MAX_EVALUATIONS: u32 = 10_000;

/// Configuration for root-finding algorithms.
///
/// For Newton, `tolerance` is the differentiation step `h` and the
/// convergence threshold; `max_iterations` caps the iterations. For Pegasus,
/// `tolerance` is the absolute accuracy and `max_iterations` caps the
/// function evaluations, including the two at the bracket ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations (or evaluations).
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::newton()
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Newton defaults: `h = 1e-6`, 10000 iterations.
    #[must_use]
    pub fn newton() -> Self {
        Self::new(NEWTON_STEP, NEWTON_MAX_ITERATIONS)
    }

    /// Pegasus defaults: accuracy `1e-8`, 10000 evaluations.
    #[must_use]
    pub fn pegasus() -> Self {
        Self::new(PEGASUS_ACCURACY, PEGASUS_MAX_EVALUATIONS)
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Iterations (Newton) or function evaluations (Pegasus) used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(SolverConfig::default(), SolverConfig::newton());
        assert_eq!(SolverConfig::pegasus().max_iterations, 10_000);
    }

    /// Semi-annual bullet priced off a flat yield.
    fn bond_price(yield_rate: f64, coupon: f64, years: i32) -> f64 {
        let periods = years * 2;
        let y = yield_rate / 2.0;
        let mut pv = 0.0;
        for t in 1..=periods {
            pv += coupon / 2.0 / (1.0 + y).powi(t);
        }
        pv + 100.0 / (1.0 + y).powi(periods)
    }

    #[test]
    fn test_yield_solvers_agree() {
        let f = |y: f64| bond_price(y, 6.0, 7) - 98.0;

        let newton = newton_raphson_numerical(f, 0.10, &SolverConfig::newton()).unwrap();
        let bracketed = pegasus(f, 0.0, 1.0, &SolverConfig::pegasus()).unwrap();

        assert!(newton.root > 0.06);
        assert_relative_eq!(newton.root, bracketed.root, epsilon = 1e-7);
    }

    #[test]
    fn test_par_bond_yield_is_coupon() {
        let f = |y: f64| bond_price(y, 5.0, 10) - 100.0;
        let result = newton_raphson_numerical(f, 0.10, &SolverConfig::newton()).unwrap();
        assert_relative_eq!(result.root, 0.05, epsilon = 1e-8);
    }
}
