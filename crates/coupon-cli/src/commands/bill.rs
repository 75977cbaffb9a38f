//! Bill command implementation.
//!
//! Price of a discounted bill from its yield, or yield from price.

use anyhow::{bail, Result};
use clap::Args;

use coupon_bonds::pricing::{
    price_discounted_bill, price_discounted_bill_linear, price_discounted_bill_with_tax,
    yield_discounted_bill, yield_discounted_bill_linear,
};

use crate::cli::OutputFormat;
use crate::commands::{parse_basis, parse_date, parse_date_or_today, validate_price, validate_yield};
use crate::output::{print_metrics, KeyValue};

/// Arguments for the bill command.
#[derive(Args, Debug)]
pub struct BillArgs {
    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Settlement date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub settlement: Option<String>,

    /// Yield (as percentage). If provided, calculates price.
    #[arg(short, long, group = "calc_mode")]
    pub yield_value: Option<f64>,

    /// Price per 100. If provided, calculates yield.
    #[arg(short, long, group = "calc_mode")]
    pub price: Option<f64>,

    /// Tax rate on the discount (as percentage); pricing only
    #[arg(long, conflicts_with_all = ["price", "linear"])]
    pub tax: Option<f64>,

    /// Use the linear discount formula instead of the hyperbolic one
    #[arg(long)]
    pub linear: bool,

    /// Day-count basis: 30/360, 30E/360, ACT/360, ACT/365, ACT/ACT
    #[arg(short, long, default_value = "ACT/360")]
    pub basis: String,
}

/// Execute the bill command.
pub fn execute(args: BillArgs, format: OutputFormat) -> Result<()> {
    let maturity = parse_date(&args.maturity)?;
    let settlement = parse_date_or_today(args.settlement.as_deref())?;
    let basis = parse_basis(&args.basis)?;

    let mut results = match (args.yield_value, args.price) {
        (Some(y), _) => {
            let yield_rate = validate_yield(y)? / 100.0;
            let price = match (args.linear, args.tax) {
                (true, _) => {
                    price_discounted_bill_linear(settlement, maturity, yield_rate, basis)?
                }
                (false, Some(tax)) => price_discounted_bill_with_tax(
                    settlement,
                    maturity,
                    yield_rate,
                    basis,
                    tax / 100.0,
                )?,
                (false, None) => price_discounted_bill(settlement, maturity, yield_rate, basis)?,
            };
            vec![
                KeyValue::from_f64("Price", 100.0 * price, 6),
                KeyValue::from_percent("Yield", yield_rate),
            ]
        }
        (None, Some(p)) => {
            let price = validate_price(p)? / 100.0;
            let yield_rate = if args.linear {
                yield_discounted_bill_linear(settlement, maturity, price, basis)?
            } else {
                yield_discounted_bill(settlement, maturity, price, basis)?
            };
            vec![
                KeyValue::from_percent("Yield", yield_rate),
                KeyValue::from_f64("Price", 100.0 * price, 6),
            ]
        }
        (None, None) => bail!("provide --yield-value to price or --price to solve for yield"),
    };

    results.extend([
        KeyValue::new("Settlement", settlement.to_string()),
        KeyValue::new("Maturity", maturity.to_string()),
        KeyValue::new("Basis", basis.to_string()),
        KeyValue::new("Formula", if args.linear { "linear" } else { "hyperbolic" }),
    ]);
    if let Some(tax) = args.tax {
        results.push(KeyValue::from_percent("Tax Rate", tax / 100.0));
    }
    print_metrics(&results, format)
}
