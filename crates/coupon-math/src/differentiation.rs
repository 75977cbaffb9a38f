//! Numerical differentiation.

/// Symmetric difference quotient `(f(x + h) - f(x - h)) / 2h`.
///
/// # Example
///
/// ```rust
/// use coupon_math::differentiation::central_difference;
///
/// let slope = central_difference(|x: f64| x * x, 3.0, 1e-6);
/// assert!((slope - 6.0).abs() < 1e-6);
/// ```
#[inline]
pub fn central_difference<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x - h)) / (2.0 * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial() {
        assert_relative_eq!(central_difference(|x| x * x * x, 2.0, 1e-5), 12.0, epsilon = 1e-8);
    }

    #[test]
    fn test_discount_factor() {
        let d = central_difference(|y: f64| 1.0 / (1.0 + y), 0.05, 1e-6);
        assert_relative_eq!(d, -1.0 / (1.05 * 1.05), epsilon = 1e-8);
    }
}
