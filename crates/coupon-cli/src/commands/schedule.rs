//! Schedule command implementation.
//!
//! Lists the coupon dates after settlement.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use coupon_bonds::schedule::{odd_schedule, regular_schedule};

use crate::cli::OutputFormat;
use crate::commands::{parse_optional_date, BondTerms};
use crate::output::print_output;

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// First coupon date of an odd first period (YYYY-MM-DD)
    #[arg(long)]
    pub first_coupon: Option<String>,

    /// Last coupon date before an odd final period (YYYY-MM-DD)
    #[arg(long)]
    pub last_coupon: Option<String>,
}

/// One coupon date.
#[derive(Debug, Serialize, Tabled)]
pub struct ScheduleRow {
    #[tabled(rename = "#")]
    pub number: usize,
    #[tabled(rename = "Date")]
    pub date: String,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, format: OutputFormat) -> Result<()> {
    let terms = args.terms.resolve()?;
    let first_coupon = parse_optional_date(args.first_coupon.as_deref())?;
    let last_coupon = parse_optional_date(args.last_coupon.as_deref())?;

    let dates = if first_coupon.is_some() || last_coupon.is_some() {
        odd_schedule(
            terms.settlement,
            terms.maturity,
            first_coupon,
            last_coupon,
            terms.frequency,
            terms.basis,
        )?
    } else {
        regular_schedule(terms.settlement, terms.maturity, terms.frequency, terms.basis)?
    };

    let rows: Vec<ScheduleRow> = dates
        .iter()
        .enumerate()
        .map(|(i, date)| ScheduleRow {
            number: i + 1,
            date: date.to_string(),
        })
        .collect();
    print_output(&rows, format)
}
