//! Coupon schedule generation.
//!
//! Schedules are ascending date lists built by stepping backward from
//! maturity one coupon period at a time and reversing the result. They are
//! produced per valuation call and not retained.

use coupon_core::types::months_per_period;
use coupon_core::{DayCountBasis, Date};
use log::{debug, warn};

use crate::error::BondResult;

/// Schedule of a zero-coupon bond: the maturity date alone.
#[must_use]
pub fn zero_coupon_schedule(maturity: Date) -> Vec<Date> {
    vec![maturity]
}

/// Coupon dates strictly after settlement, up to and including maturity.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
///
/// # Example
///
/// ```rust
/// use coupon_bonds::schedule::regular_schedule;
/// use coupon_core::{DayCountBasis, Date};
///
/// let settlement = Date::from_ymd(1993, 10, 1).unwrap();
/// let maturity = Date::from_ymd(2003, 1, 1).unwrap();
/// let dates = regular_schedule(settlement, maturity, 2, DayCountBasis::ActAct).unwrap();
/// assert_eq!(dates.len(), 19);
/// assert_eq!(dates[0], Date::from_ymd(1994, 1, 1).unwrap());
/// ```
pub fn regular_schedule(
    settlement: Date,
    maturity: Date,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<Vec<Date>> {
    let months = months_per_period(frequency)?;
    let mut dates = Vec::new();
    let mut date = maturity;

    while date > settlement {
        dates.push(date);
        date = basis.add_months(date, -months)?;
    }
    dates.reverse();

    debug!("regular schedule {settlement} -> {maturity}: {} dates", dates.len());
    Ok(dates)
}

/// Coupon dates of a bond with an irregular first and/or last period.
///
/// # Rules
///
/// - Settlement after maturity yields an empty schedule.
/// - Maturity is always included.
/// - A last coupon after settlement is included and the backward walk
///   continues from it; otherwise the walk starts one period before maturity.
/// - The walk stops on reaching the first coupon, which is then included
///   once, or when the next date would not be after settlement.
///
/// # Errors
///
/// Returns `CouponError::UnsupportedFrequency` when `frequency` does not divide 12.
pub fn odd_schedule(
    settlement: Date,
    maturity: Date,
    first_coupon: Option<Date>,
    last_coupon: Option<Date>,
    frequency: u32,
    basis: DayCountBasis,
) -> BondResult<Vec<Date>> {
    let months = months_per_period(frequency)?;

    if settlement > maturity {
        return Ok(Vec::new());
    }

    let mut dates = vec![maturity];
    let mut previous = match last_coupon {
        Some(last) if last > settlement => {
            dates.push(last);
            basis.add_months(last, -months)?
        }
        Some(last) => last,
        None => basis.add_months(maturity, -months)?,
    };

    while previous > settlement {
        if let Some(first) = first_coupon {
            if previous <= first {
                if previous < first {
                    warn!("backward walk passed first coupon {first} at {previous}");
                }
                if dates.last() != Some(&first) {
                    dates.push(first);
                }
                break;
            }
        }
        dates.push(previous);
        previous = basis.add_months(previous, -months)?;
    }
    dates.reverse();

    debug!("odd schedule {settlement} -> {maturity}: {} dates", dates.len());
    Ok(dates)
}
