//! Batch forms of the scalar valuation functions.
//!
//! Every argument slice must have the same length; a mismatch is reported as
//! `CouponError::LengthMismatch` before any element is valued. The first
//! failing element aborts the batch.
//!
//! With the `parallel` feature, [`yield_many`] solves its elements on the
//! rayon thread pool.

use coupon_core::{CouponError, DayCountBasis, Date};

use super::bills::{price_discounted_bill, yield_discounted_bill};
use super::price::price_with_clean;
use super::yields::yield_to_maturity;
use crate::error::BondResult;

fn check_lengths(expected: usize, others: &[usize]) -> BondResult<()> {
    match others.iter().find(|&&len| len != expected) {
        Some(&actual) => Err(CouponError::length_mismatch(expected, actual).into()),
        None => Ok(()),
    }
}

/// Clean prices of regular bonds, element by element.
pub fn price_many(
    settlements: &[Date],
    maturities: &[Date],
    coupon_rates: &[f64],
    yields: &[f64],
    frequencies: &[u32],
    bases: &[DayCountBasis],
) -> BondResult<Vec<f64>> {
    let clean = vec![true; settlements.len()];
    price_with_clean_many(
        settlements,
        maturities,
        coupon_rates,
        yields,
        frequencies,
        bases,
        &clean,
    )
}

/// Clean or dirty prices of regular bonds, element by element.
pub fn price_with_clean_many(
    settlements: &[Date],
    maturities: &[Date],
    coupon_rates: &[f64],
    yields: &[f64],
    frequencies: &[u32],
    bases: &[DayCountBasis],
    clean: &[bool],
) -> BondResult<Vec<f64>> {
    check_lengths(
        settlements.len(),
        &[
            maturities.len(),
            coupon_rates.len(),
            yields.len(),
            frequencies.len(),
            bases.len(),
            clean.len(),
        ],
    )?;

    (0..settlements.len())
        .map(|i| {
            price_with_clean(
                settlements[i],
                maturities[i],
                coupon_rates[i],
                yields[i],
                frequencies[i],
                bases[i],
                clean[i],
            )
        })
        .collect()
}

/// Yields of regular bonds from clean prices, element by element.
pub fn yield_many(
    settlements: &[Date],
    maturities: &[Date],
    coupon_rates: &[f64],
    prices: &[f64],
    frequencies: &[u32],
    bases: &[DayCountBasis],
) -> BondResult<Vec<f64>> {
    check_lengths(
        settlements.len(),
        &[
            maturities.len(),
            coupon_rates.len(),
            prices.len(),
            frequencies.len(),
            bases.len(),
        ],
    )?;

    let solve = |i: usize| {
        yield_to_maturity(
            settlements[i],
            maturities[i],
            coupon_rates[i],
            prices[i],
            frequencies[i],
            bases[i],
        )
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..settlements.len()).into_par_iter().map(solve).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..settlements.len()).map(solve).collect()
    }
}

/// Discounted bill prices, element by element.
pub fn price_discounted_bill_many(
    settlements: &[Date],
    maturities: &[Date],
    yields: &[f64],
    bases: &[DayCountBasis],
) -> BondResult<Vec<f64>> {
    check_lengths(
        settlements.len(),
        &[maturities.len(), yields.len(), bases.len()],
    )?;

    (0..settlements.len())
        .map(|i| price_discounted_bill(settlements[i], maturities[i], yields[i], bases[i]))
        .collect()
}

/// Discounted bill yields, element by element.
pub fn yield_discounted_bill_many(
    settlements: &[Date],
    maturities: &[Date],
    prices: &[f64],
    bases: &[DayCountBasis],
) -> BondResult<Vec<f64>> {
    check_lengths(
        settlements.len(),
        &[maturities.len(), prices.len(), bases.len()],
    )?;

    (0..settlements.len())
        .map(|i| yield_discounted_bill(settlements[i], maturities[i], prices[i], bases[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BondError;
    use approx::assert_abs_diff_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_price_many_matches_scalar() {
        let settlements = [d(2008, 2, 15), d(2013, 3, 25)];
        let maturities = [d(2017, 11, 15), d(2020, 8, 31)];
        let coupons = [0.0575, 0.04125];
        let yields = [0.065, 0.039];
        let freqs = [2, 2];
        let bases = [DayCountBasis::Nasd30360, DayCountBasis::Eur30360];

        let prices = price_many(&settlements, &maturities, &coupons, &yields, &freqs, &bases).unwrap();
        assert_eq!(prices.len(), 2);
        assert_abs_diff_eq!(100.0 * prices[0], 94.634362, epsilon = 1e-6);
        assert_abs_diff_eq!(prices[1], 1.01435903, epsilon = 1e-8);

        let round_trip =
            yield_many(&settlements, &maturities, &coupons, &prices, &freqs, &bases).unwrap();
        assert_abs_diff_eq!(round_trip[0], 0.065, epsilon = 1e-6);
        assert_abs_diff_eq!(round_trip[1], 0.039, epsilon = 1e-6);
    }

    #[test]
    fn test_dirty_flags_apply_per_element() {
        let settlements = [d(2008, 2, 15); 2];
        let maturities = [d(2017, 11, 15); 2];
        let prices = price_with_clean_many(
            &settlements,
            &maturities,
            &[0.0575; 2],
            &[0.065; 2],
            &[2; 2],
            &[DayCountBasis::Nasd30360; 2],
            &[true, false],
        )
        .unwrap();
        assert_abs_diff_eq!(100.0 * (prices[1] - prices[0]), 1.4375, epsilon = 1e-6);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = price_many(
            &[d(2008, 2, 15); 2],
            &[d(2017, 11, 15)],
            &[0.0575; 2],
            &[0.065; 2],
            &[2; 2],
            &[DayCountBasis::Nasd30360; 2],
        )
        .unwrap_err();
        assert_eq!(
            err,
            BondError::Core(CouponError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );

        let err = yield_discounted_bill_many(&[d(2012, 1, 1)], &[d(2012, 4, 1)], &[], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            BondError::Core(CouponError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_bill_batches() {
        let basis = DayCountBasis::Act360;
        let settlements = [d(2013, 11, 14), d(1992, 2, 7)];
        let maturities = [d(2019, 5, 14), d(1992, 3, 1)];
        let prices =
            price_discounted_bill_many(&settlements, &maturities, &[0.037894586, 0.0535], &[basis; 2])
                .unwrap();
        assert_abs_diff_eq!(prices[0], 0.8255850, epsilon = 1e-7);

        let yields = yield_discounted_bill_many(&settlements, &maturities, &prices, &[basis; 2])
            .unwrap();
        assert_abs_diff_eq!(yields[0], 0.037894586, epsilon = 1e-9);
        assert_abs_diff_eq!(yields[1], 0.0535, epsilon = 1e-9);
    }

    #[test]
    fn test_bill_batch_stops_at_matured_element() {
        let basis = DayCountBasis::Act360;
        let settlements = [d(2013, 11, 14), d(2013, 12, 4)];
        let maturities = [d(2019, 5, 14), d(2013, 12, 4)];
        let err = yield_discounted_bill_many(&settlements, &maturities, &[0.99, 0.99], &[basis; 2])
            .unwrap_err();
        assert!(matches!(err, BondError::SettlementAfterMaturity { .. }));
    }
}
