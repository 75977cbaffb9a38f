//! 30/360 day differences.
//!
//! Both variants count every month as 30 days and every year as 360. They
//! differ in how month-end days are moved onto the 30th.

use crate::types::{last_day_of_month, Date};

// =============================================================================
// Helper Functions
// =============================================================================

/// Checks whether a date is the last day of February.
///
/// Uses the `year % 4` leap rule, so Feb 28 of a year divisible by four is
/// not treated as month end here.
#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.day() == last_day_of_month(date.year(), 2)
}

#[inline]
fn thirty_360(y1: i64, m1: i64, d1: i64, y2: i64, m2: i64, d2: i64) -> i64 {
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

// =============================================================================
// NASD 30/360
// =============================================================================

/// Day difference under NASD 30/360.
///
/// The dates are ordered first and the sign of the whole result reflects the
/// original order.
///
/// # Rules
///
/// 1. If D1 and D2 are both the last day of February, change D2 to 30
/// 2. If D1 is the last day of February, change D1 to 30
/// 3. If D2 is 31 and D1 is 30 or 31, change D2 to 30
/// 4. If D1 is 31, change D1 to 30
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
pub(super) fn nasd_day_count(start: Date, end: Date) -> i64 {
    let (sign, first, second) = if start > end {
        (-1, end, start)
    } else {
        (1, start, end)
    };

    let mut d1 = i64::from(first.day());
    let mut d2 = i64::from(second.day());
    let first_feb_eom = is_last_day_of_february(first);

    if first_feb_eom && is_last_day_of_february(second) {
        d2 = 30;
    }
    if first_feb_eom {
        d1 = 30;
    }
    if d2 == 31 && d1 >= 30 {
        d2 = 30;
    }
    if d1 == 31 {
        d1 = 30;
    }

    sign * thirty_360(
        i64::from(first.year()),
        i64::from(first.month()),
        d1,
        i64::from(second.year()),
        i64::from(second.month()),
        d2,
    )
}

// =============================================================================
// European 30/360
// =============================================================================

/// Day difference under European 30/360 (30E/360).
///
/// Day 31 becomes 30 on either date. No February adjustment is made.
pub(super) fn european_day_count(start: Date, end: Date) -> i64 {
    let d1 = i64::from(start.day().min(30));
    let d2 = i64::from(end.day().min(30));

    thirty_360(
        i64::from(start.year()),
        i64::from(start.month()),
        d1,
        i64::from(end.year()),
        i64::from(end.month()),
        d2,
    )
}
