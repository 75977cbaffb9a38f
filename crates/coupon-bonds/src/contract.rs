//! Bond contracts valued as a batch.
//!
//! A [`BondContract`] carries the terms a contract engine submits for
//! valuation. Each contract is validated before the numeric layer sees it,
//! and [`value_contracts`] reports failures per contract.

use std::collections::BTreeMap;

use coupon_core::types::months_per_period;
use coupon_core::{DayCountBasis, Date};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};
use crate::pricing::{accrued_interest, price};

/// Key of the accrued interest in [`ContractValuation::misc_amounts`].
pub const ACCRUED_INTEREST: &str = "ACCRUED_INTEREST";

// =============================================================================
// CONTRACT
// =============================================================================

/// Terms of a regular coupon bond held under a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondContract {
    /// Contract identifier.
    pub identifier: String,
    /// Identifier of the underlying security.
    pub security_id: String,
    /// Issue date; coupon dates for accrued interest count from it.
    pub issue_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Annual yield used for valuation.
    pub yield_rate: f64,
    /// Coupons per year.
    pub frequency: u32,
    /// Day-count basis.
    pub basis: DayCountBasis,
}

/// Valuation of one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractValuation {
    /// Contract identifier.
    pub identifier: String,
    /// Clean price per unit of principal.
    pub valuation: f64,
    /// Named side amounts, such as [`ACCRUED_INTEREST`].
    pub misc_amounts: BTreeMap<String, f64>,
}

impl BondContract {
    fn invalid(&self, reason: impl Into<String>) -> BondError {
        BondError::invalid_contract(self.identifier.clone(), reason)
    }

    /// Checks the terms before valuation.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidContract` when an identifier is empty, the
    /// frequency does not divide 12, maturity is not after issue, the coupon
    /// rate is negative, or the yield is not finite.
    pub fn validate(&self) -> BondResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(self.invalid("missing identifier"));
        }
        if self.security_id.trim().is_empty() {
            return Err(self.invalid("missing security id"));
        }
        if months_per_period(self.frequency).is_err() {
            return Err(self.invalid(format!(
                "frequency {} does not divide 12",
                self.frequency
            )));
        }
        if self.maturity_date <= self.issue_date {
            return Err(self.invalid(format!(
                "maturity {} is not after issue {}",
                self.maturity_date, self.issue_date
            )));
        }
        if !(self.coupon_rate >= 0.0) {
            return Err(self.invalid(format!("coupon rate {} is negative", self.coupon_rate)));
        }
        if !self.yield_rate.is_finite() {
            return Err(self.invalid("yield is not finite"));
        }
        Ok(())
    }

    /// Validates and values the contract at `settlement`.
    ///
    /// # Errors
    ///
    /// - `BondError::InvalidContract` when [`validate`](Self::validate) fails
    /// - `BondError::SettlementBeforeIssue` when settlement precedes issue
    /// - `CouponError::IndexOutOfRange` when settlement is on or after maturity
    pub fn value(&self, settlement: Date) -> BondResult<ContractValuation> {
        self.validate()?;

        let valuation = price(
            settlement,
            self.maturity_date,
            self.coupon_rate,
            self.yield_rate,
            self.frequency,
            self.basis,
        )?;
        let accrued = accrued_interest(
            self.issue_date,
            settlement,
            self.coupon_rate,
            self.frequency,
            self.basis,
        )?;

        let mut misc_amounts = BTreeMap::new();
        misc_amounts.insert(ACCRUED_INTEREST.to_string(), accrued);

        Ok(ContractValuation {
            identifier: self.identifier.clone(),
            valuation,
            misc_amounts,
        })
    }
}

fn value_logged(contract: &BondContract, settlement: Date) -> BondResult<ContractValuation> {
    let result = contract.value(settlement);
    if let Err(e) = &result {
        warn!("contract {} not valued: {e}", contract.identifier);
    }
    result
}

/// Values every contract at `settlement`, one result per contract, in input
/// order.
pub fn value_contracts(
    contracts: &[BondContract],
    settlement: Date,
) -> Vec<BondResult<ContractValuation>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        contracts
            .par_iter()
            .map(|contract| value_logged(contract, settlement))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        contracts
            .iter()
            .map(|contract| value_logged(contract, settlement))
            .collect()
    }
}
