//! Accrued interest command implementation.

use anyhow::Result;
use clap::Args;

use coupon_bonds::pricing::{accrued_interest, accrued_interest_odd_first};

use crate::cli::OutputFormat;
use crate::commands::{
    parse_basis, parse_date, parse_date_or_today, parse_optional_date, validate_coupon,
    validate_frequency,
};
use crate::output::{print_metrics, KeyValue};

/// Arguments for the accrued command.
#[derive(Args, Debug)]
pub struct AccruedArgs {
    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Issue date (YYYY-MM-DD)
    #[arg(short, long)]
    pub issue: String,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// First coupon date of an odd first period (YYYY-MM-DD)
    #[arg(long)]
    pub first_coupon: Option<String>,

    /// Principal the accrual is quoted on
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Coupons per year: 1, 2, 3, 4, 6 or 12
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Day-count basis: 30/360, 30E/360, ACT/360, ACT/365, ACT/ACT
    #[arg(short, long, default_value = "30/360")]
    pub basis: String,
}

/// Execute the accrued command.
pub fn execute(args: AccruedArgs, format: OutputFormat) -> Result<()> {
    let coupon_rate = validate_coupon(args.coupon)? / 100.0;
    let issue = parse_date(&args.issue)?;
    let settlement = parse_date_or_today(args.settlement.as_deref())?;
    let first_coupon = parse_optional_date(args.first_coupon.as_deref())?;
    let frequency = validate_frequency(args.frequency)?;
    let basis = parse_basis(&args.basis)?;

    let accrued = match first_coupon {
        Some(first) => {
            accrued_interest_odd_first(issue, settlement, first, coupon_rate, frequency, basis)?
        }
        None => accrued_interest(issue, settlement, coupon_rate, frequency, basis)?,
    };

    let results = vec![
        KeyValue::from_f64("Accrued Interest", args.face * accrued, 6),
        KeyValue::from_f64("Face", args.face, 2),
        KeyValue::new("Issue", issue.to_string()),
        KeyValue::new("Settlement", settlement.to_string()),
        KeyValue::new("Basis", basis.to_string()),
    ];
    print_metrics(&results, format)
}
