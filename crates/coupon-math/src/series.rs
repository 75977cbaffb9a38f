//! Finite series.

/// Sum of `base * r^i` for `i` in `from..=to`.
///
/// Returns zero when `from > to`.
///
/// # Example
///
/// ```rust
/// use coupon_math::series::geometric_series_sum;
///
/// assert_eq!(geometric_series_sum(2.0, 3.0, 0, 2), 26.0);
/// ```
#[must_use]
pub fn geometric_series_sum(base: f64, r: f64, from: i32, to: i32) -> f64 {
    let sum: f64 = (from..=to).map(|i| r.powi(i)).sum();
    base * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annuity_discount_sum() {
        let sum = geometric_series_sum(-200.0, 1.0 / 1.1, 1, 48);
        assert_relative_eq!(sum, -1979.385106, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(geometric_series_sum(5.0, 0.5, 3, 2), 0.0);
    }

    #[test]
    fn test_unit_ratio() {
        assert_relative_eq!(geometric_series_sum(10.0, 1.0, 0, 9), 100.0);
    }
}
