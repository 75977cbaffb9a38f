//! Pegasus bracketed secant method.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Relative accuracy used alongside the configured absolute accuracy.
pub const RELATIVE_ACCURACY: f64 = 1e-14;

/// Residual magnitude treated as an exact root.
pub const FUNCTION_VALUE_ACCURACY: f64 = 1e-15;

/// Finds a root of `f` in `[lower, upper]` with the Pegasus method.
///
/// A secant step is taken between the two bracket ends. When the new point
/// keeps the sign of the latest end, the retained end's value is scaled by
/// `f1 / (f1 + fx)`.
///
/// # Convergence
///
/// Stops when `abs(f(x)) <= 1e-15`, or when the bracket width drops below
/// `max(1e-14 * abs(x), config.tolerance)`.
///
/// # Errors
///
/// - `MathError::InvalidBracket` when `f(lower)` and `f(upper)` share a sign
/// - `MathError::TooManyEvaluations` when more than `config.max_iterations`
///   evaluations (the two bracket ends included) would be needed
///
/// # Example
///
/// ```rust
/// use coupon_math::solvers::{pegasus, SolverConfig};
///
/// let f = |x: f64| x * x * x - 8.0;
/// let result = pegasus(f, 0.0, 5.0, &SolverConfig::pegasus()).unwrap();
/// assert!((result.root - 2.0).abs() < 1e-8);
/// ```
pub fn pegasus<F>(f: F, lower: f64, upper: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let max = config.max_iterations;
    let mut evaluations = 0_u32;
    let mut evaluate = |x: f64| -> MathResult<f64> {
        if evaluations >= max {
            return Err(MathError::TooManyEvaluations { max });
        }
        evaluations += 1;
        Ok(f(x))
    };

    let mut x0 = lower;
    let mut x1 = upper;
    let mut f0 = evaluate(x0)?;
    if f0 == 0.0 {
        return Ok(done(x0, f0, 1));
    }
    let mut f1 = evaluate(x1)?;
    if f1 == 0.0 {
        return Ok(done(x1, f1, 2));
    }

    if f0 * f1 > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lower,
            b: upper,
            fa: f0,
            fb: f1,
        });
    }

    let mut used = 2;
    loop {
        let x = x1 - (f1 * (x1 - x0)) / (f1 - f0);
        let fx = evaluate(x)?;
        used += 1;

        if fx == 0.0 {
            return Ok(done(x, fx, used));
        }

        if f1 * fx < 0.0 {
            x0 = x1;
            f0 = f1;
        } else {
            f0 *= f1 / (f1 + fx);
        }

        x1 = x;
        f1 = fx;

        if f1.abs() <= FUNCTION_VALUE_ACCURACY {
            return Ok(done(x1, f1, used));
        }

        if (x1 - x0).abs() < (RELATIVE_ACCURACY * x1.abs()).max(config.tolerance) {
            return Ok(done(x1, f1, used));
        }
    }
}

fn done(root: f64, residual: f64, evaluations: u32) -> SolverResult {
    debug!("Pegasus converged to {root} after {evaluations} evaluations");
    SolverResult {
        root,
        iterations: evaluations,
        residual,
    }
}
