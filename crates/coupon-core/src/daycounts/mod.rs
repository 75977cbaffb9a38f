//! Day-count bases and the date arithmetic they parameterize.
//!
//! A [`DayCountBasis`] is a tagged value carrying two parameters: days per
//! month (30, or actual) and days per year (360, 365, or actual). All
//! basis-dependent arithmetic dispatches on the tag in this module, so the
//! February and end-of-month rules of the different bases sit side by side.
//!
//! # Supported Bases
//!
//! | Basis | Days/month | Days/year | Day difference |
//! |-------|-----------|-----------|----------------|
//! | `NASD_30_360` | 30 | 360 | 30/360 with NASD end-of-February rules |
//! | `EUR_30_360` | 30 | 360 | 30E/360, day 31 clamped per date |
//! | `ACT_360` | actual | 360 | Julian day difference |
//! | `ACT_365` | actual | 365 | Julian day difference |
//! | `ACT_ACT` | actual | actual | Julian day difference |
//!
//! # Usage
//!
//! ```rust
//! use coupon_core::daycounts::DayCountBasis;
//! use coupon_core::types::Date;
//!
//! let start = Date::from_ymd(2012, 2, 29).unwrap();
//! let end = Date::from_ymd(2012, 8, 31).unwrap();
//!
//! assert_eq!(DayCountBasis::Nasd30360.diff_days(start, end), 180);
//! assert_eq!(DayCountBasis::Eur30360.diff_days(start, end), 181);
//! assert_eq!(DayCountBasis::ActAct.days_of_year(end), 366);
//! ```

mod actual;
mod thirty360;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{CouponError, CouponResult};
use crate::types::Date;

/// Sentinel for "count actual days" in the basis parameters.
pub const ACTUAL: i32 = -1;

/// Day-count basis used for date differences and coupon period lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountBasis {
    /// 30/360 with NASD end-of-February adjustments.
    #[serde(rename = "NASD_30_360")]
    Nasd30360,
    /// European 30/360.
    #[serde(rename = "EUR_30_360")]
    Eur30360,
    /// Actual/360.
    #[serde(rename = "ACT_360")]
    Act360,
    /// Actual/365.
    #[serde(rename = "ACT_365")]
    Act365,
    /// Actual/Actual.
    #[serde(rename = "ACT_ACT")]
    ActAct,
}

impl DayCountBasis {
    /// Returns the canonical name of the basis.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountBasis::Nasd30360 => "NASD_30_360",
            DayCountBasis::Eur30360 => "EUR_30_360",
            DayCountBasis::Act360 => "ACT_360",
            DayCountBasis::Act365 => "ACT_365",
            DayCountBasis::ActAct => "ACT_ACT",
        }
    }

    /// Returns all bases.
    #[must_use]
    pub fn all() -> &'static [DayCountBasis] {
        &[
            DayCountBasis::Nasd30360,
            DayCountBasis::Eur30360,
            DayCountBasis::Act360,
            DayCountBasis::Act365,
            DayCountBasis::ActAct,
        ]
    }

    /// Days per month, or [`ACTUAL`].
    #[must_use]
    pub const fn days_per_month(&self) -> i32 {
        match self {
            DayCountBasis::Nasd30360 | DayCountBasis::Eur30360 => 30,
            DayCountBasis::Act360 | DayCountBasis::Act365 | DayCountBasis::ActAct => ACTUAL,
        }
    }

    /// Days per year, or [`ACTUAL`].
    #[must_use]
    pub const fn days_per_year(&self) -> i32 {
        match self {
            DayCountBasis::Nasd30360 | DayCountBasis::Eur30360 | DayCountBasis::Act360 => 360,
            DayCountBasis::Act365 => 365,
            DayCountBasis::ActAct => ACTUAL,
        }
    }

    /// Returns true for bases that count actual calendar days.
    #[must_use]
    pub const fn is_actual(&self) -> bool {
        self.days_per_month() == ACTUAL
    }

    /// Number of days from `start` to `end` under this basis.
    ///
    /// Negative when `start` is after `end`.
    #[must_use]
    pub fn diff_days(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountBasis::Nasd30360 => thirty360::nasd_day_count(start, end),
            DayCountBasis::Eur30360 => thirty360::european_day_count(start, end),
            DayCountBasis::Act360 | DayCountBasis::Act365 | DayCountBasis::ActAct => {
                actual::actual_day_count(start, end)
            }
        }
    }

    /// Adds calendar months, clamping the day to the target month's length.
    ///
    /// Every basis shares this rule.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::InvalidDate` if the resulting date does not exist.
    pub fn add_months(&self, date: Date, months: i32) -> CouponResult<Date> {
        date.add_months(months)
    }

    /// Adds calendar days.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::UnsupportedBasis` for 30/360 bases, which have no
    /// day-addition rule.
    pub fn add_days(&self, date: Date, days: i64) -> CouponResult<Date> {
        if self.is_actual() {
            Ok(date.add_days(days))
        } else {
            Err(CouponError::unsupported_basis(self.name(), "day addition"))
        }
    }

    /// Year length for `year`: the basis' fixed length, or 366/365 by the
    /// `year % 4` rule for actual-year bases.
    #[must_use]
    pub fn days_of_year_for(&self, year: i32) -> i32 {
        match self.days_per_year() {
            ACTUAL if year % 4 == 0 => 366,
            ACTUAL => 365,
            days => days,
        }
    }

    /// Year length for the year of `date`.
    #[must_use]
    pub fn days_of_year(&self, date: Date) -> i32 {
        self.days_of_year_for(date.year())
    }
}

impl std::fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountBasis {
    type Err = DayCountParseError;

    /// Parses a basis from its canonical name or a common alias
    /// ("30/360", "30E/360", "ACT/360", "ACT/365", "ACT/ACT").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");

        match normalized.as_str() {
            "NASD_30_360" | "30/360" | "30/360 US" | "NASD" | "BOND" => {
                Ok(DayCountBasis::Nasd30360)
            }
            "EUR_30_360" | "30E/360" | "EUR" | "EUROBOND" => Ok(DayCountBasis::Eur30360),
            "ACT_360" | "ACT/360" | "ACTUAL/360" => Ok(DayCountBasis::Act360),
            "ACT_365" | "ACT/365" | "ACTUAL/365" => Ok(DayCountBasis::Act365),
            "ACT_ACT" | "ACT/ACT" | "ACTUAL/ACTUAL" => Ok(DayCountBasis::ActAct),
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

/// Error returned when a day-count basis name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown day count basis: '{0}'")]
pub struct DayCountParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_parameters() {
        assert_eq!(DayCountBasis::Nasd30360.days_per_month(), 30);
        assert_eq!(DayCountBasis::Eur30360.days_per_year(), 360);
        assert_eq!(DayCountBasis::Act360.days_per_month(), ACTUAL);
        assert_eq!(DayCountBasis::Act365.days_per_year(), 365);
        assert_eq!(DayCountBasis::ActAct.days_per_year(), ACTUAL);
        assert!(DayCountBasis::ActAct.is_actual());
        assert!(!DayCountBasis::Eur30360.is_actual());
    }

    #[test]
    fn test_diff_days_dispatch() {
        let start = d(2011, 2, 28);
        let end = d(2011, 8, 31);
        assert_eq!(DayCountBasis::Nasd30360.diff_days(start, end), 180);
        assert_eq!(DayCountBasis::Eur30360.diff_days(start, end), 182);
        assert_eq!(DayCountBasis::Act360.diff_days(start, end), 184);
        assert_eq!(DayCountBasis::ActAct.diff_days(end, start), -184);
    }

    #[test]
    fn test_diff_days_same_date_is_zero() {
        for basis in DayCountBasis::all() {
            assert_eq!(basis.diff_days(d(2012, 2, 29), d(2012, 2, 29)), 0);
        }
    }

    #[test]
    fn test_add_days() {
        let base = d(2012, 1, 1);
        assert_eq!(DayCountBasis::Act360.add_days(base, 34).unwrap(), d(2012, 2, 4));
        assert_eq!(DayCountBasis::ActAct.add_days(base, 1597).unwrap(), d(2016, 5, 16));
        assert!(matches!(
            DayCountBasis::Nasd30360.add_days(base, 1),
            Err(CouponError::UnsupportedBasis { .. })
        ));
    }

    #[test]
    fn test_add_months_shared_rule() {
        for basis in DayCountBasis::all() {
            assert_eq!(basis.add_months(d(2008, 1, 31), 1).unwrap(), d(2008, 2, 29));
        }
    }

    #[test]
    fn test_days_of_year() {
        assert_eq!(DayCountBasis::ActAct.days_of_year(d(2012, 6, 1)), 366);
        assert_eq!(DayCountBasis::ActAct.days_of_year(d(2013, 6, 1)), 365);
        assert_eq!(DayCountBasis::ActAct.days_of_year_for(1900), 366);
        assert_eq!(DayCountBasis::Act360.days_of_year(d(1992, 3, 1)), 360);
        assert_eq!(DayCountBasis::Act365.days_of_year(d(2012, 3, 1)), 365);
        assert_eq!(DayCountBasis::Nasd30360.days_of_year(d(2012, 3, 1)), 360);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("NASD_30_360".parse::<DayCountBasis>().unwrap(), DayCountBasis::Nasd30360);
        assert_eq!("eur-30-360".parse::<DayCountBasis>().unwrap(), DayCountBasis::Eur30360);
        assert_eq!("ACT/ACT".parse::<DayCountBasis>().unwrap(), DayCountBasis::ActAct);
        assert!("ACT/252".parse::<DayCountBasis>().is_err());
        for basis in DayCountBasis::all() {
            assert_eq!(basis.to_string().parse::<DayCountBasis>().unwrap(), *basis);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DayCountBasis::Eur30360).unwrap();
        assert_eq!(json, "\"EUR_30_360\"");
        let basis: DayCountBasis = serde_json::from_str("\"ACT_365\"").unwrap();
        assert_eq!(basis, DayCountBasis::Act365);
    }

    fn any_date() -> impl Strategy<Value = Date> {
        (1990i32..2060, 1u32..=12, 1u32..=31).prop_map(|(y, m, day)| {
            let day = day.min(crate::types::last_day_of_month(y, m));
            d(y, m, day)
        })
    }

    proptest! {
        #[test]
        fn prop_diff_days_with_itself_is_zero(date in any_date()) {
            for basis in DayCountBasis::all() {
                prop_assert_eq!(basis.diff_days(date, date), 0);
            }
        }

        #[test]
        fn prop_diff_days_is_antisymmetric(a in any_date(), b in any_date()) {
            for basis in DayCountBasis::all() {
                prop_assert_eq!(basis.diff_days(a, b), -basis.diff_days(b, a));
            }
        }
    }
}
