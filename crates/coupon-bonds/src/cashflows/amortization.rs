//! Premium and discount amortization schedules.
//!
//! At settlement the purchase is recorded as `PRINCIPAL = -price`, with the
//! premium (`price > principal`) or discount (`price < principal`) booked
//! against `PREMIUM` or `DISCOUNT`. Each later coupon date moves part of it
//! back so that both components sum to zero by maturity.

use std::fmt;
use std::str::FromStr;

use coupon_core::types::cashflows::components::{
    COUPON, DISCOUNT, EFFECTIVE_INTEREST, INTEREST, PREMIUM, PRINCIPAL,
};
use coupon_core::{CashFlows, DayCountBasis, Date};
use serde::{Deserialize, Serialize};

use super::regular_cash_flows;
use crate::error::{BondError, BondResult};
use crate::pricing::effective_interest_rate;

/// Method used to spread a premium or discount over the life of the bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationMethod {
    /// Carrying value times the periodic effective interest rate.
    EffectiveInterest,
    /// Pro rata by days elapsed since settlement.
    StraightLine,
}

impl fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmortizationMethod::EffectiveInterest => write!(f, "effective-interest"),
            AmortizationMethod::StraightLine => write!(f, "straight-line"),
        }
    }
}

impl FromStr for AmortizationMethod {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "effective-interest" | "eir" | "effective" => Ok(AmortizationMethod::EffectiveInterest),
            "straight-line" | "sl" | "straight" => Ok(AmortizationMethod::StraightLine),
            _ => Err(BondError::config(format!("unknown amortization method: '{s}'"))),
        }
    }
}

/// Amortization schedule by the given method.
///
/// # Errors
///
/// See [`amortize_effective_interest`] and [`amortize_straight_line`].
pub fn amortize(
    method: AmortizationMethod,
    settlement: Date,
    maturity: Date,
    principal: f64,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<CashFlows> {
    match method {
        AmortizationMethod::EffectiveInterest => amortize_effective_interest(
            settlement,
            maturity,
            principal,
            coupon_rate,
            price,
            frequency,
            basis,
        ),
        AmortizationMethod::StraightLine => amortize_straight_line(
            settlement,
            maturity,
            principal,
            coupon_rate,
            price,
            frequency,
            basis,
        ),
    }
}

/// Opening balances booked at settlement.
struct OpeningEntries {
    premium: f64,
    discount: f64,
}

impl OpeningEntries {
    fn new(principal: f64, price: f64) -> Self {
        if price > principal {
            Self {
                premium: price - principal,
                discount: 0.0,
            }
        } else {
            Self {
                premium: 0.0,
                discount: principal - price,
            }
        }
    }
}

/// Amortization using the effective interest rate method.
///
/// # Formula
///
/// On each coupon date, with `r` the periodic effective interest rate and
/// `V` the carrying value before the payment:
///
/// ```text
/// EFFECTIVE_INTEREST = V * r
/// PREMIUM           -= COUPON - EFFECTIVE_INTEREST   (premium bonds)
/// DISCOUNT          += EFFECTIVE_INTEREST - COUPON   (discount bonds)
/// V                  = principal + remaining premium - remaining discount
/// ```
///
/// # Errors
///
/// - `MathError::TooManyEvaluations` if the effective rate does not converge
/// - `MathError::InvalidBracket` if no effective rate exists in `[0, 1]`
/// - `CouponError::UnsupportedFrequency` when `frequency` does not divide 12
pub fn amortize_effective_interest(
    settlement: Date,
    maturity: Date,
    principal: f64,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<CashFlows> {
    let rate = effective_interest_rate(
        settlement,
        maturity,
        coupon_rate,
        price / principal,
        frequency,
        basis,
    )? / f64::from(frequency);
    let flows = regular_cash_flows(
        settlement,
        maturity,
        principal,
        coupon_rate,
        frequency,
        basis,
        false,
    )?;

    let mut principal_cf = CashFlows::dated(settlement);
    let mut interest_cf = CashFlows::dated(settlement);
    let mut coupon_cf = CashFlows::dated(settlement);
    let mut premium_cf = CashFlows::dated(settlement);
    let mut discount_cf = CashFlows::dated(settlement);

    let OpeningEntries {
        mut premium,
        mut discount,
    } = OpeningEntries::new(principal, price);
    let mut carrying_value = price;

    principal_cf.add_at(settlement, -price)?;
    premium_cf.add_at(settlement, premium)?;
    discount_cf.add_at(settlement, -discount)?;

    for &date in flows.dates().iter().skip(1) {
        let coupon = flows.amount_at_of(date, INTEREST)?;
        let interest = carrying_value * rate;

        principal_cf.add_at(date, flows.amount_at_of(date, PRINCIPAL)?)?;
        interest_cf.add_at(date, interest)?;
        coupon_cf.add_at(date, coupon)?;

        if premium > 0.0 {
            premium_cf.add_at(date, -(coupon - interest))?;
            premium -= coupon - interest;
        } else if discount > 0.0 {
            discount_cf.add_at(date, interest - coupon)?;
            discount -= interest - coupon;
        }
        carrying_value = principal + premium - discount;
    }

    let mut merged = CashFlows::merged_dated(settlement);
    merged.merge(&principal_cf, PRINCIPAL, false)?;
    merged.merge(&interest_cf, EFFECTIVE_INTEREST, false)?;
    merged.merge(&coupon_cf, COUPON, false)?;
    merged.merge(&premium_cf, PREMIUM, false)?;
    merged.merge(&discount_cf, DISCOUNT, false)?;
    Ok(merged)
}

/// Amortization using the straight-line method.
///
/// The premium or discount written off by each coupon date is proportional
/// to the days elapsed since settlement over the days to maturity.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn amortize_straight_line(
    settlement: Date,
    maturity: Date,
    principal: f64,
    coupon_rate: f64,
    price: f64,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<CashFlows> {
    let flows = regular_cash_flows(
        settlement,
        maturity,
        principal,
        coupon_rate,
        frequency,
        basis,
        false,
    )?;

    let mut principal_cf = CashFlows::dated(settlement);
    let mut coupon_cf = CashFlows::dated(settlement);
    let mut premium_cf = CashFlows::dated(settlement);
    let mut discount_cf = CashFlows::dated(settlement);

    let OpeningEntries { premium, discount } = OpeningEntries::new(principal, price);
    let total_days = basis.diff_days(settlement, maturity) as f64;
    let mut amortized = 0.0;

    principal_cf.add_at(settlement, -price)?;
    premium_cf.add_at(settlement, premium)?;
    discount_cf.add_at(settlement, -discount)?;

    for &date in flows.dates().iter().skip(1) {
        let elapsed = basis.diff_days(settlement, date) as f64;

        principal_cf.add_at(date, flows.amount_at_of(date, PRINCIPAL)?)?;
        coupon_cf.add_at(date, flows.amount_at_of(date, INTEREST)?)?;

        if premium > 0.0 {
            let to_date = premium * elapsed / total_days;
            premium_cf.add_at(date, -(to_date - amortized))?;
            amortized = to_date;
        } else if discount > 0.0 {
            let to_date = discount * elapsed / total_days;
            discount_cf.add_at(date, to_date - amortized)?;
            amortized = to_date;
        }
    }

    let mut merged = CashFlows::merged_dated(settlement);
    merged.merge(&principal_cf, PRINCIPAL, false)?;
    merged.merge(&coupon_cf, COUPON, false)?;
    merged.merge(&premium_cf, PREMIUM, false)?;
    merged.merge(&discount_cf, DISCOUNT, false)?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn check_premium_schedule(cf: &CashFlows, settlement: Date) {
        assert!(cf.is_dated());
        assert_eq!(cf.base_date(), Some(settlement));

        let dates = cf.dates().to_vec();
        let mut written_off = 0.0;
        for (i, &date) in dates.iter().enumerate().skip(1) {
            written_off += cf.amount_at_of(date, PREMIUM).unwrap();
            assert_eq!(cf.amount_at_of(date, DISCOUNT).unwrap(), 0.0);
            assert_abs_diff_eq!(cf.amount_at_of(date, COUPON).unwrap(), 4.375, epsilon = 1e-6);
            let expected = if i == dates.len() - 1 { 100.0 } else { 0.0 };
            assert_abs_diff_eq!(cf.amount_at_of(date, PRINCIPAL).unwrap(), expected, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(
            cf.amount_at_of(settlement, PREMIUM).unwrap() + written_off,
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_effective_interest_premium() {
        let settlement = d(2008, 3, 3);
        let cf = amortize_effective_interest(
            settlement,
            d(2013, 3, 3),
            100.0,
            0.0875,
            100.589894,
            2,
            DayCountBasis::Eur30360,
        )
        .unwrap();

        check_premium_schedule(&cf, settlement);
        assert!(cf.has_component(EFFECTIVE_INTEREST));
        assert_abs_diff_eq!(cf.amount_at_of(settlement, PRINCIPAL).unwrap(), -100.589894);
    }

    #[test]
    fn test_straight_line_premium() {
        let settlement = d(2008, 3, 3);
        let cf = amortize_straight_line(
            settlement,
            d(2013, 3, 3),
            100.0,
            0.0875,
            100.589894,
            2,
            DayCountBasis::Eur30360,
        )
        .unwrap();

        check_premium_schedule(&cf, settlement);
        assert!(!cf.has_component(EFFECTIVE_INTEREST));
        // Ten equal 180-day periods.
        assert_abs_diff_eq!(
            cf.amount_of(1, PREMIUM).unwrap(),
            -0.0589894,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_straight_line_discount() {
        let settlement = d(2008, 3, 3);
        let cf = amortize(
            AmortizationMethod::StraightLine,
            settlement,
            d(2013, 3, 3),
            100.0,
            0.05,
            95.0,
            2,
            DayCountBasis::Eur30360,
        )
        .unwrap();

        assert_eq!(cf.amount_at_of(settlement, DISCOUNT).unwrap(), -5.0);
        let accreted: f64 = cf.component(DISCOUNT).unwrap()[1..].iter().sum();
        assert_abs_diff_eq!(accreted, 5.0, epsilon = 1e-9);
        assert!(cf.component(PREMIUM).unwrap().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_effective_interest_discount() {
        let settlement = d(2008, 3, 3);
        let cf = amortize(
            AmortizationMethod::EffectiveInterest,
            settlement,
            d(2013, 3, 3),
            100.0,
            0.05,
            95.0,
            2,
            DayCountBasis::Eur30360,
        )
        .unwrap();

        let accreted: f64 = cf.component(DISCOUNT).unwrap()[1..].iter().sum();
        assert_abs_diff_eq!(accreted, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "effective-interest".parse::<AmortizationMethod>().unwrap(),
            AmortizationMethod::EffectiveInterest
        );
        assert_eq!(
            "STRAIGHT_LINE".parse::<AmortizationMethod>().unwrap(),
            AmortizationMethod::StraightLine
        );
        assert!("sum-of-digits".parse::<AmortizationMethod>().is_err());
        assert_eq!(AmortizationMethod::StraightLine.to_string(), "straight-line");
    }
}
