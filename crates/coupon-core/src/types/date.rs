//! Date type for coupon schedule and valuation calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{CouponError, CouponResult};

/// Returns the last day of `month` in `year`.
///
/// February has 29 days whenever `year % 4 == 0`. Century years are not
/// special-cased.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A calendar date, normalized to year/month/day.
///
/// Newtype around `chrono::NaiveDate`. Equality and ordering are by calendar
/// date only; there is no time-of-day component to strip.
///
/// # Example
///
/// ```rust
/// use coupon_core::types::Date;
///
/// let date = Date::from_ymd(2008, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2008, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CouponResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CouponError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates one date per `(years[i], months[i], days[i])` triple.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::LengthMismatch` if the slices differ in length,
    /// before any date is built.
    pub fn create_all(years: &[i32], months: &[u32], days: &[u32]) -> CouponResult<Vec<Self>> {
        let len = years.len();
        for actual in [months.len(), days.len()] {
            if actual != len {
                return Err(CouponError::length_mismatch(len, actual));
            }
        }
        years
            .iter()
            .zip(months)
            .zip(days)
            .map(|((&y, &m), &d)| Self::from_ymd(y, m, d))
            .collect()
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CouponError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CouponResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CouponError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks the simplified leap-year rule, `year % 4 == 0`.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.year() % 4 == 0
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        last_day_of_month(self.year(), self.month())
    }

    /// Checks whether the date falls in the given month (1-12).
    #[must_use]
    pub fn is_month(&self, month: u32) -> bool {
        self.month() == month
    }

    /// Checks whether two dates share the same month number, regardless of year.
    #[must_use]
    pub fn is_same_month(&self, other: &Date) -> bool {
        self.month() == other.month()
    }

    /// Checks if the date is the last day of its month.
    ///
    /// February 28 always counts, as does February 29 in a `year % 4 == 0`
    /// year. Coupon-date snapping depends on this exact rule.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        match self.month() {
            2 => (self.is_leap_year() && self.day() == 29) || self.day() == 28,
            _ => self.day() == self.days_in_month(),
        }
    }

    /// Returns the last day of the date's month.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::InvalidDate` for February of a century year that
    /// the `year % 4` rule treats as leap but the calendar does not.
    pub fn end_of_month(&self) -> CouponResult<Self> {
        Self::from_ymd(self.year(), self.month(), self.days_in_month())
    }

    /// Adds a number of calendar days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the source day exceeds the length of the target month (e.g. Jan 31 +
    /// 1 month), the day is clamped to the last day of that month.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CouponResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(last_day_of_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the Julian day number of the date.
    #[must_use]
    pub fn julian_day(&self) -> i64 {
        let year = i64::from(self.year());
        let month = i64::from(self.month());
        let day = i64::from(self.day());
        let a = (month - 14) / 12;
        day - 32075 + (1461 * (year + 4800 + a)) / 4 + (367 * (month - 2 - a * 12)) / 12
            - (3 * ((year + 4900 + a) / 100)) / 4
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the first non-weekend date on or after this one.
    #[must_use]
    pub fn next_working_date(&self) -> Self {
        let mut date = *self;
        while date.is_weekend() {
            date = date.add_days(1);
        }
        date
    }

    /// Returns the last non-weekend date on or before this one.
    #[must_use]
    pub fn previous_working_date(&self) -> Self {
        let mut date = *self;
        while date.is_weekend() {
            date = date.add_days(-1);
        }
        date
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CouponError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Date;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Date;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}
