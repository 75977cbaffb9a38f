//! Cash-flow series.
//!
//! [`CashFlows`] is a single series type with two capabilities:
//!
//! - **dated**: entries are keyed by a strictly increasing list of dates
//!   that always contains the base date; otherwise entries are indexed by
//!   integer period and are implicitly equally spaced.
//! - **merged**: entries are split into named components (see
//!   [`components`]); the total at an entry is the sum over components, or
//!   the value of a designated total component.
//!
//! Series are mutated while a generator builds them and are read-only
//! afterwards. They are not synchronized; share them across threads only
//! for reading.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::error::{CouponError, CouponResult};
use crate::types::Date;

/// Well-known component names produced by the cash-flow generators.
pub mod components {
    /// Principal repayment (or purchase outlay at settlement).
    pub const PRINCIPAL: &str = "PRINCIPAL";
    /// Coupon interest paid on a schedule date.
    pub const INTEREST: &str = "INTEREST";
    /// Discounting exponent in coupon periods.
    pub const TIME_FACTOR: &str = "TIME_FACTOR";
    /// Coupon received, as used by the amortization tables.
    pub const COUPON: &str = "COUPON";
    /// Premium amortized on a date.
    pub const PREMIUM: &str = "PREMIUM";
    /// Discount accreted on a date.
    pub const DISCOUNT: &str = "DISCOUNT";
    /// Accounting interest under the effective-interest method.
    pub const EFFECTIVE_INTEREST: &str = "EFFECTIVE_INTEREST";
}

#[derive(Debug, Clone, PartialEq)]
enum Values {
    Basic(Vec<f64>),
    Merged {
        columns: BTreeMap<String, Vec<f64>>,
        total: Option<String>,
    },
}

/// A dated or non-dated series of cash-flow amounts, optionally split into
/// named components.
///
/// # Example
///
/// ```rust
/// use coupon_core::types::{CashFlows, Date};
/// use coupon_core::types::cashflows::components::{INTEREST, PRINCIPAL};
///
/// let base = Date::from_ymd(2024, 1, 1).unwrap();
/// let pay = Date::from_ymd(2024, 7, 1).unwrap();
///
/// let mut interest = CashFlows::dated(base);
/// interest.add_at(pay, 2.5).unwrap();
/// let mut principal = CashFlows::dated(base);
/// principal.add_at(pay, 100.0).unwrap();
///
/// let mut flows = CashFlows::merged_dated(base);
/// flows.merge(&interest, INTEREST, false).unwrap();
/// flows.merge(&principal, PRINCIPAL, false).unwrap();
///
/// assert_eq!(flows.count(), 2);
/// assert_eq!(flows.amount_at(pay).unwrap(), 102.5);
/// assert_eq!(flows.amount_at_of(pay, INTEREST).unwrap(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlows {
    base_date: Option<Date>,
    dates: Vec<Date>,
    values: Values,
}

impl Default for CashFlows {
    fn default() -> Self {
        Self::new()
    }
}

impl CashFlows {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates an empty non-dated series.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_date: None,
            dates: Vec::new(),
            values: Values::Basic(Vec::new()),
        }
    }

    /// Creates a non-dated series from period amounts.
    #[must_use]
    pub fn from_amounts(amounts: &[f64]) -> Self {
        Self {
            base_date: None,
            dates: Vec::new(),
            values: Values::Basic(amounts.to_vec()),
        }
    }

    /// Lays out an annuity as `periods + 1` non-dated amounts.
    ///
    /// Every slot holds `pmt`. In arrears, slot 0 is replaced by `pv` and
    /// `fv` is added to the last slot; otherwise `pv` is added to slot 0 and
    /// the last slot is replaced by `fv`.
    #[must_use]
    pub fn build(periods: usize, pv: f64, pmt: f64, fv: f64, arrears: bool) -> Self {
        let mut amounts = vec![pmt; periods + 1];
        if arrears {
            amounts[0] = pv;
            amounts[periods] += fv;
        } else {
            amounts[0] += pv;
            amounts[periods] = fv;
        }
        Self::from_amounts(&amounts)
    }

    /// Creates a dated series holding only its base date, with zero amount.
    #[must_use]
    pub fn dated(base_date: Date) -> Self {
        Self {
            base_date: Some(base_date),
            dates: vec![base_date],
            values: Values::Basic(vec![0.0]),
        }
    }

    /// Creates a dated series from `(date, amount)` pairs. The first date is
    /// the base date; repeated dates accumulate.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::InvalidCashFlow` for an empty slice, and
    /// `CouponError::DateBeforeBase` if a later date precedes the first.
    pub fn from_pairs(pairs: &[(Date, f64)]) -> CouponResult<Self> {
        let (base, _) = pairs
            .first()
            .ok_or_else(|| CouponError::invalid_cash_flow("at least the base date is required"))?;

        let mut flows = Self::dated(*base);
        for &(date, amount) in pairs {
            flows.add_at(date, amount)?;
        }
        Ok(flows)
    }

    /// Creates an empty non-dated series that holds components.
    #[must_use]
    pub fn merged() -> Self {
        Self {
            base_date: None,
            dates: Vec::new(),
            values: Values::Merged {
                columns: BTreeMap::new(),
                total: None,
            },
        }
    }

    /// Creates a dated series that holds components, starting at `base_date`.
    #[must_use]
    pub fn merged_dated(base_date: Date) -> Self {
        Self {
            base_date: Some(base_date),
            dates: vec![base_date],
            values: Values::Merged {
                columns: BTreeMap::new(),
                total: None,
            },
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of entries (dates for a dated series, periods otherwise).
    #[must_use]
    pub fn count(&self) -> usize {
        if self.is_dated() {
            return self.dates.len();
        }
        match &self.values {
            Values::Basic(amounts) => amounts.len(),
            Values::Merged { columns, .. } => columns.values().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Returns true when the series has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns true for a date-indexed series.
    #[must_use]
    pub fn is_dated(&self) -> bool {
        self.base_date.is_some()
    }

    /// Non-dated series are implicitly equally spaced.
    #[must_use]
    pub fn is_equally_spaced(&self) -> bool {
        !self.is_dated()
    }

    /// Returns true when the series holds named components.
    #[must_use]
    pub fn has_components(&self) -> bool {
        matches!(self.values, Values::Merged { .. })
    }

    /// Base date of a dated series.
    #[must_use]
    pub fn base_date(&self) -> Option<Date> {
        self.base_date
    }

    /// Dates of a dated series in ascending order; empty for non-dated series.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Component names in sorted order; empty when the series has none.
    #[must_use]
    pub fn components(&self) -> Vec<&str> {
        match &self.values {
            Values::Basic(_) => Vec::new(),
            Values::Merged { columns, .. } => columns.keys().map(String::as_str).collect(),
        }
    }

    /// Returns true when `component` has been merged in.
    #[must_use]
    pub fn has_component(&self, component: &str) -> bool {
        match &self.values {
            Values::Basic(_) => false,
            Values::Merged { columns, .. } => columns.contains_key(component),
        }
    }

    /// Name of the designated total component, if any.
    #[must_use]
    pub fn total_component(&self) -> Option<&str> {
        match &self.values {
            Values::Basic(_) => None,
            Values::Merged { total, .. } => total.as_deref(),
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    fn check_index(&self, index: usize) -> CouponResult<()> {
        let count = self.count();
        if index < count {
            Ok(())
        } else {
            Err(CouponError::IndexOutOfRange { index, count })
        }
    }

    fn total_unchecked(&self, index: usize) -> f64 {
        match &self.values {
            Values::Basic(amounts) => amounts.get(index).copied().unwrap_or(0.0),
            Values::Merged { columns, total } => match total {
                Some(name) => columns
                    .get(name)
                    .and_then(|column| column.get(index))
                    .copied()
                    .unwrap_or(0.0),
                None => columns
                    .values()
                    .filter_map(|column| column.get(index))
                    .sum(),
            },
        }
    }

    fn position(&self, date: Date) -> CouponResult<Option<usize>> {
        if !self.is_dated() {
            return Err(CouponError::NotDated);
        }
        Ok(self.dates.binary_search(&date).ok())
    }

    /// Total amount at entry `index`.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::IndexOutOfRange` past the last entry.
    pub fn amount(&self, index: usize) -> CouponResult<f64> {
        self.check_index(index)?;
        Ok(self.total_unchecked(index))
    }

    /// Amount of `component` at entry `index`.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::ComponentsNotSupported` for a series without
    /// components, `CouponError::ComponentNotFound` for an unknown component
    /// and `CouponError::IndexOutOfRange` past the last entry.
    pub fn amount_of(&self, index: usize, component: &str) -> CouponResult<f64> {
        self.check_index(index)?;
        let column = self.component(component)?;
        Ok(column.get(index).copied().unwrap_or(0.0))
    }

    /// Total amount at `date`; zero when the date is not in the series.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotDated` for a non-dated series.
    pub fn amount_at(&self, date: Date) -> CouponResult<f64> {
        Ok(self
            .position(date)?
            .map_or(0.0, |index| self.total_unchecked(index)))
    }

    /// Amount of `component` at `date`; zero when the date is not in the series.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotDated` for a non-dated series and the
    /// component errors of [`CashFlows::amount_of`].
    pub fn amount_at_of(&self, date: Date, component: &str) -> CouponResult<f64> {
        let position = self.position(date)?;
        let column = self.component(component)?;
        Ok(position
            .and_then(|index| column.get(index))
            .copied()
            .unwrap_or(0.0))
    }

    /// The full column of a component, aligned with the entries.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::ComponentsNotSupported` or
    /// `CouponError::ComponentNotFound`.
    pub fn component(&self, component: &str) -> CouponResult<&[f64]> {
        match &self.values {
            Values::Basic(_) => Err(CouponError::ComponentsNotSupported),
            Values::Merged { columns, .. } => columns
                .get(component)
                .map(Vec::as_slice)
                .ok_or_else(|| CouponError::component_not_found(component)),
        }
    }

    /// Totals of every entry, in order.
    #[must_use]
    pub fn totals(&self) -> Vec<f64> {
        (0..self.count()).map(|i| self.total_unchecked(i)).collect()
    }

    /// Totals keyed by date.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotDated` for a non-dated series.
    pub fn to_map(&self) -> CouponResult<BTreeMap<Date, f64>> {
        if !self.is_dated() {
            return Err(CouponError::NotDated);
        }
        Ok(self
            .dates
            .iter()
            .enumerate()
            .map(|(i, date)| (*date, self.total_unchecked(i)))
            .collect())
    }

    // =========================================================================
    // Mutation of basic series
    // =========================================================================

    fn basic_amounts_mut(&mut self) -> CouponResult<&mut Vec<f64>> {
        match &mut self.values {
            Values::Basic(amounts) => Ok(amounts),
            Values::Merged { .. } => Err(CouponError::ComponentsNotSupported),
        }
    }

    fn require_non_dated(&self) -> CouponResult<()> {
        if self.is_dated() {
            Err(CouponError::dated_mismatch(
                "index-based mutation of a dated series",
            ))
        } else {
            Ok(())
        }
    }

    /// Appends an amount to a non-dated series.
    ///
    /// # Errors
    ///
    /// Fails on dated series and on series with components.
    pub fn push(&mut self, amount: f64) -> CouponResult<()> {
        self.require_non_dated()?;
        self.basic_amounts_mut()?.push(amount);
        Ok(())
    }

    /// Adds `amount` to period `index`, or appends it when `index` is past the end.
    ///
    /// # Errors
    ///
    /// Fails on dated series and on series with components.
    pub fn add(&mut self, index: usize, amount: f64) -> CouponResult<()> {
        self.require_non_dated()?;
        let amounts = self.basic_amounts_mut()?;
        if index < amounts.len() {
            amounts[index] += amount;
        } else {
            amounts.push(amount);
        }
        Ok(())
    }

    /// Removes period `index`, shifting later periods down.
    ///
    /// # Errors
    ///
    /// Fails on dated series, on series with components and past the end.
    pub fn remove(&mut self, index: usize) -> CouponResult<f64> {
        self.require_non_dated()?;
        self.check_index(index)?;
        Ok(self.basic_amounts_mut()?.remove(index))
    }

    /// Adds `amount` at `date`, accumulating onto an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotDated` for a non-dated series,
    /// `CouponError::DateBeforeBase` for a date before the base date and
    /// `CouponError::ComponentsNotSupported` for a merged series.
    pub fn add_at(&mut self, date: Date, amount: f64) -> CouponResult<()> {
        let base = self.base_date.ok_or(CouponError::NotDated)?;
        if date < base {
            return Err(CouponError::DateBeforeBase {
                date: date.to_string(),
                base: base.to_string(),
            });
        }

        let Values::Basic(amounts) = &mut self.values else {
            return Err(CouponError::ComponentsNotSupported);
        };
        match self.dates.binary_search(&date) {
            Ok(index) => amounts[index] += amount,
            Err(index) => {
                amounts.insert(index, amount);
                self.dates.insert(index, date);
            }
        }
        Ok(())
    }

    /// Removes the entry at `date`, returning its amount if present.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::NotDated`, `CouponError::ComponentsNotSupported`,
    /// or `CouponError::InvalidCashFlow` when asked to remove the base date.
    pub fn remove_at(&mut self, date: Date) -> CouponResult<Option<f64>> {
        if self.base_date == Some(date) {
            return Err(CouponError::invalid_cash_flow(
                "the base date cannot be removed from a dated series",
            ));
        }
        let position = self.position(date)?;
        let Values::Basic(amounts) = &mut self.values else {
            return Err(CouponError::ComponentsNotSupported);
        };
        Ok(position.map(|index| {
            self.dates.remove(index);
            amounts.remove(index)
        }))
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Merges the totals of `other` into this series as `component`.
    ///
    /// Both series must be dated with the same base date, or both non-dated.
    /// Dates of `other` missing here are inserted with zero in every other
    /// component. Merging into an existing component requires `overwrite`
    /// and accumulates onto the existing amounts.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::ComponentsNotSupported` when this series does not
    /// hold components, `CouponError::DatedMismatch`,
    /// `CouponError::BaseDateMismatch` or `CouponError::ComponentExists`.
    pub fn merge(&mut self, other: &CashFlows, component: &str, overwrite: bool) -> CouponResult<()> {
        if !self.has_components() {
            return Err(CouponError::ComponentsNotSupported);
        }
        if self.is_dated() != other.is_dated() {
            return Err(CouponError::dated_mismatch(if self.is_dated() {
                "cannot merge non-dated cash flows into a dated series"
            } else {
                "cannot merge dated cash flows into a non-dated series"
            }));
        }
        if self.has_component(component) {
            if !overwrite {
                return Err(CouponError::ComponentExists {
                    component: component.to_string(),
                });
            }
            debug!("accumulating onto existing component {component}");
        }

        match (self.base_date, other.base_date) {
            (Some(base), Some(other_base)) => {
                if base != other_base {
                    return Err(CouponError::BaseDateMismatch {
                        expected: base.to_string(),
                        actual: other_base.to_string(),
                    });
                }
                self.merge_dated(other, component);
            }
            _ => self.merge_indexed(other, component),
        }
        Ok(())
    }

    fn merge_dated(&mut self, other: &CashFlows, component: &str) {
        let Values::Merged { columns, .. } = &mut self.values else {
            return;
        };

        let len = self.dates.len();
        columns
            .entry(component.to_string())
            .or_insert_with(|| vec![0.0; len]);

        for (i, &date) in other.dates.iter().enumerate() {
            let amount = other.total_unchecked(i);
            let index = match self.dates.binary_search(&date) {
                Ok(index) => index,
                Err(index) => {
                    self.dates.insert(index, date);
                    for column in columns.values_mut() {
                        column.insert(index, 0.0);
                    }
                    index
                }
            };
            if let Some(column) = columns.get_mut(component) {
                column[index] += amount;
            }
        }
    }

    fn merge_indexed(&mut self, other: &CashFlows, component: &str) {
        let len = self.count().max(other.count());
        let Values::Merged { columns, .. } = &mut self.values else {
            return;
        };

        let column = columns.entry(component.to_string()).or_default();
        for (i, amount) in other.totals().into_iter().enumerate() {
            if i < column.len() {
                column[i] += amount;
            } else {
                column.push(amount);
            }
        }
        for column in columns.values_mut() {
            column.resize(len, 0.0);
        }
    }

    /// Designates `component` as the total of each entry.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::ComponentsNotSupported` or
    /// `CouponError::ComponentNotFound` when the component has not been merged.
    pub fn set_total_component(&mut self, component: &str) -> CouponResult<()> {
        match &mut self.values {
            Values::Basic(_) => Err(CouponError::ComponentsNotSupported),
            Values::Merged { columns, total } => {
                if !columns.contains_key(component) {
                    return Err(CouponError::component_not_found(component));
                }
                *total = Some(component.to_string());
                Ok(())
            }
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Attaches dates to a non-dated series; the first date becomes the base.
    /// A dated series is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CouponError::LengthMismatch` when the counts differ and
    /// `CouponError::DateBeforeBase` when a date precedes the first.
    pub fn as_dated(&self, dates: &[Date]) -> CouponResult<CashFlows> {
        if self.is_dated() {
            return Ok(self.clone());
        }
        if self.count() != dates.len() {
            return Err(CouponError::length_mismatch(self.count(), dates.len()));
        }
        let pairs: Vec<(Date, f64)> = dates.iter().copied().zip(self.totals()).collect();
        CashFlows::from_pairs(&pairs)
    }

    /// Copies one component into a basic series of the same kind. The result
    /// is empty (only the base date for a dated series) when the component is
    /// absent.
    #[must_use]
    pub fn extract_component(&self, component: &str) -> CashFlows {
        let column = self.component(component).ok();

        match self.base_date {
            Some(base) => {
                let mut out = CashFlows::dated(base);
                if let Some(column) = column {
                    out.dates = self.dates.clone();
                    out.values = Values::Basic(column.to_vec());
                }
                out
            }
            None => CashFlows::from_amounts(column.unwrap_or_default()),
        }
    }
}

impl fmt::Display for CashFlows {
    /// One line per entry: `YYYY-MM-DD<TAB>amount` for dated series, the
    /// amount alone otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dated() {
            for (i, date) in self.dates.iter().enumerate() {
                writeln!(f, "{date}\t{}", self.total_unchecked(i))?;
            }
        } else {
            for amount in self.totals() {
                writeln!(f, "{amount}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::components::{INTEREST, PRINCIPAL, TIME_FACTOR};
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_basic_add_and_push() {
        let mut cf = CashFlows::from_amounts(&[1.0, 2.0]);
        cf.add(1, 3.0).unwrap();
        cf.add(10, 4.0).unwrap();
        cf.push(5.0).unwrap();
        assert_eq!(cf.totals(), vec![1.0, 5.0, 4.0, 5.0]);
        assert_eq!(cf.remove(0).unwrap(), 1.0);
        assert_eq!(cf.count(), 3);
        assert!(cf.is_equally_spaced());
        assert!(cf.dates().is_empty());
    }

    #[test]
    fn test_basic_rejects_components_and_dates() {
        let cf = CashFlows::from_amounts(&[1.0]);
        assert_eq!(cf.amount_of(0, INTEREST), Err(CouponError::ComponentsNotSupported));
        assert_eq!(cf.amount_at(d(2020, 1, 1)), Err(CouponError::NotDated));
        assert!(matches!(cf.amount(3), Err(CouponError::IndexOutOfRange { index: 3, count: 1 })));
        assert!(cf.to_map().is_err());
    }

    #[test]
    fn test_build_arrears() {
        let cf = CashFlows::build(3, -100.0, 10.0, 50.0, true);
        assert_eq!(cf.totals(), vec![-100.0, 10.0, 10.0, 60.0]);

        let cf = CashFlows::build(3, -100.0, 10.0, 50.0, false);
        assert_eq!(cf.totals(), vec![-90.0, 10.0, 10.0, 50.0]);
    }

    #[test]
    fn test_dated_contains_base() {
        let base = d(2012, 1, 1);
        let cf = CashFlows::dated(base);
        assert_eq!(cf.count(), 1);
        assert_eq!(cf.dates(), &[base]);
        assert_eq!(cf.amount_at(base).unwrap(), 0.0);
        assert!(!cf.is_equally_spaced());
    }

    #[test]
    fn test_dated_add_sorted_and_accumulates() {
        let base = d(2012, 1, 1);
        let mut cf = CashFlows::dated(base);
        cf.add_at(d(2013, 1, 1), 5.0).unwrap();
        cf.add_at(d(2012, 7, 1), 2.0).unwrap();
        cf.add_at(d(2013, 1, 1), 1.0).unwrap();

        assert_eq!(cf.dates(), &[base, d(2012, 7, 1), d(2013, 1, 1)]);
        assert_eq!(cf.amount(2).unwrap(), 6.0);
        assert_eq!(cf.amount_at(d(2012, 3, 1)).unwrap(), 0.0);

        let err = cf.add_at(d(2011, 12, 31), 1.0).unwrap_err();
        assert!(matches!(err, CouponError::DateBeforeBase { .. }));
    }

    #[test]
    fn test_dated_remove() {
        let base = d(2012, 1, 1);
        let mut cf = CashFlows::from_pairs(&[(base, -100.0), (d(2012, 6, 1), 105.0)]).unwrap();
        assert_eq!(cf.remove_at(d(2012, 6, 1)).unwrap(), Some(105.0));
        assert_eq!(cf.remove_at(d(2012, 6, 1)).unwrap(), None);
        assert!(cf.remove_at(base).is_err());
        assert!(cf.add(0, 1.0).is_err());
    }

    #[test]
    fn test_from_pairs_requires_base() {
        assert!(CashFlows::from_pairs(&[]).is_err());
        let err = CashFlows::from_pairs(&[(d(2012, 6, 1), 1.0), (d(2012, 1, 1), 1.0)]).unwrap_err();
        assert!(matches!(err, CouponError::DateBeforeBase { .. }));
    }

    #[test]
    fn test_merged_dated_totals() {
        let base = d(2012, 1, 1);
        let interest = CashFlows::from_pairs(&[(base, 0.0), (d(2012, 7, 1), 2.5), (d(2013, 1, 1), 2.5)]).unwrap();
        let principal = CashFlows::from_pairs(&[(base, 0.0), (d(2013, 1, 1), 100.0)]).unwrap();

        let mut cf = CashFlows::merged_dated(base);
        cf.merge(&interest, INTEREST, false).unwrap();
        cf.merge(&principal, PRINCIPAL, false).unwrap();

        assert_eq!(cf.count(), 3);
        assert_eq!(cf.components(), vec![INTEREST, PRINCIPAL]);
        assert_relative_eq!(cf.amount(2).unwrap(), 102.5);
        assert_relative_eq!(cf.amount_of(1, PRINCIPAL).unwrap(), 0.0);
        assert_relative_eq!(cf.amount_at_of(d(2013, 1, 1), INTEREST).unwrap(), 2.5);

        let map = cf.to_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_relative_eq!(map[&d(2012, 7, 1)], 2.5);
    }

    #[test]
    fn test_merge_inserts_dates_into_every_column() {
        let base = d(2012, 1, 1);
        let first = CashFlows::from_pairs(&[(base, 0.0), (d(2013, 1, 1), 1.0)]).unwrap();
        let second = CashFlows::from_pairs(&[(base, 0.0), (d(2012, 6, 1), 2.0)]).unwrap();

        let mut cf = CashFlows::merged_dated(base);
        cf.merge(&first, PRINCIPAL, false).unwrap();
        cf.merge(&second, INTEREST, false).unwrap();

        assert_eq!(cf.component(PRINCIPAL).unwrap(), &[0.0, 0.0, 1.0]);
        assert_eq!(cf.component(INTEREST).unwrap(), &[0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_merge_errors() {
        let base = d(2012, 1, 1);
        let dated = CashFlows::dated(base);
        let mut cf = CashFlows::merged_dated(base);
        cf.merge(&dated, PRINCIPAL, false).unwrap();

        assert!(matches!(
            cf.merge(&dated, PRINCIPAL, false),
            Err(CouponError::ComponentExists { .. })
        ));
        assert!(cf.merge(&dated, PRINCIPAL, true).is_ok());
        assert!(matches!(
            cf.merge(&CashFlows::dated(d(2012, 1, 2)), INTEREST, false),
            Err(CouponError::BaseDateMismatch { .. })
        ));
        assert!(matches!(
            cf.merge(&CashFlows::from_amounts(&[1.0]), INTEREST, false),
            Err(CouponError::DatedMismatch { .. })
        ));
        assert!(matches!(
            CashFlows::merged().merge(&dated, INTEREST, false),
            Err(CouponError::DatedMismatch { .. })
        ));
        assert_eq!(
            CashFlows::dated(base).merge(&dated, INTEREST, false),
            Err(CouponError::ComponentsNotSupported)
        );
    }

    #[test]
    fn test_merge_overwrite_accumulates() {
        let mut cf = CashFlows::merged();
        cf.merge(&CashFlows::from_amounts(&[1.0, 2.0]), INTEREST, false).unwrap();
        cf.merge(&CashFlows::from_amounts(&[1.0, 1.0, 1.0]), INTEREST, true).unwrap();
        assert_eq!(cf.component(INTEREST).unwrap(), &[2.0, 3.0, 1.0]);
        assert_eq!(cf.count(), 3);
    }

    #[test]
    fn test_total_component() {
        let mut cf = CashFlows::merged();
        cf.merge(&CashFlows::from_amounts(&[1.0, 2.0]), INTEREST, false).unwrap();
        cf.merge(&CashFlows::from_amounts(&[0.5, 1.5]), TIME_FACTOR, false).unwrap();
        assert_relative_eq!(cf.amount(1).unwrap(), 3.5);

        assert!(matches!(
            cf.set_total_component(PRINCIPAL),
            Err(CouponError::ComponentNotFound { .. })
        ));
        cf.set_total_component(INTEREST).unwrap();
        assert_eq!(cf.total_component(), Some(INTEREST));
        assert_relative_eq!(cf.amount(1).unwrap(), 2.0);
    }

    #[test]
    fn test_merged_rejects_direct_mutation() {
        let mut cf = CashFlows::merged_dated(d(2012, 1, 1));
        assert_eq!(cf.add_at(d(2012, 2, 1), 1.0), Err(CouponError::ComponentsNotSupported));
        let mut cf = CashFlows::merged();
        assert_eq!(cf.push(1.0), Err(CouponError::ComponentsNotSupported));
    }

    #[test]
    fn test_as_dated() {
        let cf = CashFlows::from_amounts(&[-100.0, 5.0, 105.0]);
        let dates = [d(2012, 1, 1), d(2012, 7, 1), d(2013, 1, 1)];
        let dated = cf.as_dated(&dates).unwrap();
        assert_eq!(dated.base_date(), Some(dates[0]));
        assert_eq!(dated.amount_at(dates[2]).unwrap(), 105.0);

        assert!(cf.as_dated(&dates[..2]).unwrap_err().is_length_mismatch());
        assert_eq!(dated.as_dated(&[]).unwrap(), dated);
    }

    #[test]
    fn test_extract_component() {
        let base = d(2012, 1, 1);
        let mut cf = CashFlows::merged_dated(base);
        cf.merge(
            &CashFlows::from_pairs(&[(base, 0.0), (d(2012, 7, 1), 2.5)]).unwrap(),
            INTEREST,
            false,
        )
        .unwrap();

        let interest = cf.extract_component(INTEREST);
        assert!(!interest.has_components());
        assert_eq!(interest.dates(), cf.dates());
        assert_eq!(interest.amount_at(d(2012, 7, 1)).unwrap(), 2.5);

        let missing = cf.extract_component(PRINCIPAL);
        assert_eq!(missing.count(), 1);

        let mut indexed = CashFlows::merged();
        indexed.merge(&CashFlows::from_amounts(&[1.0, 2.0]), INTEREST, false).unwrap();
        assert_eq!(indexed.extract_component(INTEREST).totals(), vec![1.0, 2.0]);
        assert!(indexed.extract_component(PRINCIPAL).is_empty());
    }

    #[test]
    fn test_display() {
        let cf = CashFlows::from_pairs(&[(d(2012, 1, 1), -100.0), (d(2012, 7, 1), 105.5)]).unwrap();
        assert_eq!(cf.to_string(), "2012-01-01\t-100\n2012-07-01\t105.5\n");
        assert_eq!(CashFlows::from_amounts(&[1.5, 2.0]).to_string(), "1.5\n2\n");
    }

    proptest! {
        #[test]
        fn prop_dated_dates_strictly_increasing(offsets in prop::collection::vec(0i64..2000, 1..30)) {
            let base = d(2000, 1, 1);
            let mut cf = CashFlows::dated(base);
            for offset in &offsets {
                cf.add_at(base.add_days(*offset), 1.0).unwrap();
            }
            prop_assert_eq!(cf.dates()[0], base);
            prop_assert!(cf.dates().windows(2).all(|w| w[0] < w[1]));
            let total: f64 = cf.totals().iter().sum();
            prop_assert!((total - offsets.len() as f64).abs() < 1e-9);
        }

        #[test]
        fn prop_merged_total_is_sum_of_components(
            a in prop::collection::vec(-1e6f64..1e6, 0..20),
            b in prop::collection::vec(-1e6f64..1e6, 0..20),
        ) {
            let mut cf = CashFlows::merged();
            cf.merge(&CashFlows::from_amounts(&a), INTEREST, false).unwrap();
            cf.merge(&CashFlows::from_amounts(&b), PRINCIPAL, false).unwrap();
            prop_assert_eq!(cf.count(), a.len().max(b.len()));
            for i in 0..cf.count() {
                let expected = a.get(i).copied().unwrap_or(0.0) + b.get(i).copied().unwrap_or(0.0);
                prop_assert!((cf.amount(i).unwrap() - expected).abs() < 1e-6);
            }
        }
    }
}
