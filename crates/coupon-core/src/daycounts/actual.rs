//! Actual day differences.

use crate::types::Date;

/// Calendar days from `start` to `end`, computed from Julian day numbers.
///
/// Shared by ACT/360, ACT/365 and ACT/ACT; the bases differ only in year length.
pub(super) fn actual_day_count(start: Date, end: Date) -> i64 {
    end.julian_day() - start.julian_day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_actual() {
        assert_eq!(actual_day_count(d(1994, 5, 6), d(1994, 10, 30)), 177);
        assert_eq!(actual_day_count(d(1996, 4, 1), d(1996, 10, 1)), 183);
        assert_eq!(actual_day_count(d(1994, 10, 30), d(1994, 5, 6)), -177);
    }

    #[test]
    fn test_actual_across_leap_day() {
        assert_eq!(actual_day_count(d(2012, 2, 28), d(2012, 3, 1)), 2);
        assert_eq!(actual_day_count(d(2011, 2, 28), d(2011, 3, 1)), 1);
    }
}
