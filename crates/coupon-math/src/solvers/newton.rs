//! Newton's method with a numerical derivative.

use log::debug;

use crate::differentiation::central_difference;
use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson with a central-difference derivative.
///
/// Iterates `x1 = x0 - f(x0) / f'(x0)` where `f'` is estimated with step
/// `h = config.tolerance`, stopping once `abs(x1 - x0) <= h`. At least one
/// step is always taken, so a guess that happens to be a root is confirmed
/// rather than returned unexamined.
///
/// # Errors
///
/// - `MathError::DivisionByZero` when the estimated derivative is zero or not
///   finite
/// - `MathError::ConvergenceFailed` after `config.max_iterations` steps, or
///   when an iterate leaves the finite range
///
/// # Example
///
/// ```rust
/// use coupon_math::solvers::{newton_raphson_numerical, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let result = newton_raphson_numerical(f, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-6);
/// ```
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = config.tolerance;
    if !(h > 0.0) {
        return Err(MathError::invalid_input("Newton step must be positive"));
    }

    let mut x = initial_guess;

    for iteration in 1..=config.max_iterations {
        let dfx = central_difference(&f, x, h);
        if dfx == 0.0 || !dfx.is_finite() {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let next = x - f(x) / dfx;
        if !next.is_finite() {
            return Err(MathError::convergence_failed(iteration, f64::INFINITY));
        }

        if (next - x).abs() <= h {
            let residual = f(next);
            debug!("Newton converged to {next} after {iteration} iterations");
            return Ok(SolverResult {
                root: next,
                iterations: iteration,
                residual,
            });
        }

        x = next;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
