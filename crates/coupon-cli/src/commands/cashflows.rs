//! Cash flows command implementation.
//!
//! Principal and interest per payment date, for regular bonds or bonds with
//! odd first or last periods.

use anyhow::Result;
use clap::Args;

use coupon_bonds::cashflows::{odd_cash_flows, regular_cash_flows};

use crate::cli::OutputFormat;
use crate::commands::{component_records, parse_optional_date, BondTerms};
use crate::output::print_records;

/// Arguments for the cashflows command.
#[derive(Args, Debug)]
pub struct CashFlowsArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Issue date (YYYY-MM-DD). Needed for an odd first period.
    #[arg(short, long)]
    pub issue: Option<String>,

    /// First coupon date of an odd first period (YYYY-MM-DD)
    #[arg(long, requires = "issue")]
    pub first_coupon: Option<String>,

    /// Last coupon date before an odd final period (YYYY-MM-DD)
    #[arg(long)]
    pub last_coupon: Option<String>,

    /// Face value (default: 100)
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Add the discounting exponent of each payment
    #[arg(long)]
    pub time_factor: bool,
}

/// Execute the cashflows command.
pub fn execute(args: CashFlowsArgs, format: OutputFormat) -> Result<()> {
    let terms = args.terms.resolve()?;
    let issue = parse_optional_date(args.issue.as_deref())?;
    let first_coupon = parse_optional_date(args.first_coupon.as_deref())?;
    let last_coupon = parse_optional_date(args.last_coupon.as_deref())?;

    let cf = if first_coupon.is_some() || last_coupon.is_some() {
        odd_cash_flows(
            terms.settlement,
            issue.unwrap_or(terms.settlement),
            terms.maturity,
            first_coupon,
            last_coupon,
            args.face,
            terms.coupon_rate,
            terms.frequency,
            terms.basis,
            args.time_factor,
        )?
    } else {
        regular_cash_flows(
            terms.settlement,
            terms.maturity,
            args.face,
            terms.coupon_rate,
            terms.frequency,
            terms.basis,
            args.time_factor,
        )?
    };

    let (header, rows) = component_records(&cf)?;
    print_records(&header, &rows, format)
}
