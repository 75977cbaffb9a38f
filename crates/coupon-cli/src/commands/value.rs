//! Value command implementation.
//!
//! Values a JSON array of bond contracts at one settlement date. Contracts
//! that fail validation or valuation are reported and skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::contract::{value_contracts, ACCRUED_INTEREST};
use coupon_bonds::BondContract;

use crate::cli::OutputFormat;
use crate::commands::parse_date_or_today;
use crate::error::CliError;
use crate::output::{print_error, print_output};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// JSON file holding an array of contracts
    pub file: PathBuf,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,
}

/// Valuation of one contract, per 100 of principal.
#[derive(Debug, Serialize, Tabled)]
pub struct ValueRow {
    #[tabled(rename = "Contract")]
    pub identifier: String,
    #[tabled(rename = "Security")]
    pub security_id: String,
    #[tabled(rename = "Clean Price")]
    pub valuation: String,
    #[tabled(rename = "Accrued")]
    pub accrued: String,
}

/// Execute the value command.
pub fn execute(args: ValueArgs, format: OutputFormat) -> Result<()> {
    let settlement = parse_date_or_today(args.settlement.as_deref())?;
    let json = std::fs::read_to_string(&args.file)
        .map_err(CliError::from)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let contracts: Vec<BondContract> = serde_json::from_str(&json).map_err(CliError::from)?;

    let mut rows = Vec::with_capacity(contracts.len());
    for (contract, result) in contracts.iter().zip(value_contracts(&contracts, settlement)) {
        match result {
            Ok(valuation) => {
                let accrued = valuation
                    .misc_amounts
                    .get(ACCRUED_INTEREST)
                    .copied()
                    .unwrap_or_default();
                rows.push(ValueRow {
                    identifier: valuation.identifier,
                    security_id: contract.security_id.clone(),
                    valuation: format!("{:.6}", 100.0 * valuation.valuation),
                    accrued: format!("{:.6}", 100.0 * accrued),
                });
            }
            Err(e) => print_error(&format!("{}: {e}", contract.identifier)),
        }
    }

    print_output(&rows, format)
}
