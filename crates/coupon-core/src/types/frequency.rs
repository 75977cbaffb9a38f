//! Coupon frequency validation.
//!
//! Frequencies are plain payments-per-year integers. Only positive divisors
//! of twelve produce whole-month coupon periods and are accepted.

use crate::error::{CouponError, CouponResult};

/// Validates a payments-per-year frequency.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` unless `frequency` is a
/// positive divisor of 12.
pub fn validate_frequency(frequency: u32) -> CouponResult<u32> {
    if frequency == 0 || 12 % frequency != 0 {
        return Err(CouponError::unsupported_frequency(frequency));
    }
    Ok(frequency)
}

/// Returns the coupon period length in months, `12 / frequency`.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` for frequencies that do not
/// divide 12.
pub fn months_per_period(frequency: u32) -> CouponResult<i32> {
    validate_frequency(frequency).map(|f| (12 / f) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_frequencies() {
        let months: Vec<i32> = [1, 2, 3, 4, 6, 12]
            .iter()
            .map(|&f| months_per_period(f).unwrap())
            .collect();
        assert_eq!(months, vec![12, 6, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unsupported_frequencies() {
        for f in [0, 5, 7, 8, 24] {
            assert_eq!(
                months_per_period(f),
                Err(CouponError::UnsupportedFrequency { frequency: f })
            );
        }
    }
}
