//! Amortize command implementation.
//!
//! Premium or discount amortization table of a bond bought away from par.

use anyhow::Result;
use clap::Args;

use coupon_bonds::cashflows::{amortize, AmortizationMethod};

use crate::cli::OutputFormat;
use crate::commands::{component_records, validate_price, BondTerms};
use crate::output::print_records;

/// Arguments for the amortize command.
#[derive(Args, Debug)]
pub struct AmortizeArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Purchase price per 100
    #[arg(short, long)]
    pub price: f64,

    /// Face value (default: 100)
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Amortization method: effective-interest or straight-line
    #[arg(long, default_value = "effective-interest")]
    pub method: AmortizationMethod,
}

/// Execute the amortize command.
pub fn execute(args: AmortizeArgs, format: OutputFormat) -> Result<()> {
    let terms = args.terms.resolve()?;
    let price = validate_price(args.price)? / 100.0 * args.face;

    tracing::debug!("amortizing {} at {price} by {}", args.face, args.method);
    let cf = amortize(
        args.method,
        terms.settlement,
        terms.maturity,
        args.face,
        terms.coupon_rate,
        price,
        terms.frequency,
        terms.basis,
    )?;

    let (header, rows) = component_records(&cf)?;
    print_records(&header, &rows, format)
}
