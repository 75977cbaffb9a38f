//! Analyze command implementation.
//!
//! Duration, convexity and effective interest rate of a regular bond.

use anyhow::{bail, Result};
use clap::Args;

use coupon_bonds::pricing::{
    convexity, duration_macaulay, duration_modified, effective_interest_rate_with,
    price_with_clean, yield_with_config,
};
use coupon_bonds::ValuationConfig;

use crate::cli::OutputFormat;
use crate::commands::price::describe;
use crate::commands::{validate_price, validate_yield, BondTerms};
use crate::output::{print_header, print_metrics, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Yield to maturity (as percentage)
    #[arg(short, long, group = "calc_mode")]
    pub yield_value: Option<f64>,

    /// Clean price per 100; the yield is solved from it
    #[arg(short, long, group = "calc_mode")]
    pub price: Option<f64>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat, config: &ValuationConfig) -> Result<()> {
    let terms = args.terms.resolve()?;
    let clean_config = config.with_clean(true);

    let (yield_rate, price) = match (args.yield_value, args.price) {
        (Some(y), _) => {
            let yield_rate = validate_yield(y)? / 100.0;
            let price = price_with_clean(
                terms.settlement,
                terms.maturity,
                terms.coupon_rate,
                yield_rate,
                terms.frequency,
                terms.basis,
                true,
            )?;
            (yield_rate, price)
        }
        (None, Some(p)) => {
            let price = validate_price(p)? / 100.0;
            let yield_rate = yield_with_config(
                terms.settlement,
                terms.maturity,
                terms.coupon_rate,
                price,
                terms.frequency,
                terms.basis,
                &clean_config,
            )?;
            (yield_rate, price)
        }
        (None, None) => bail!("provide --yield-value or --price"),
    };

    let (settlement, maturity, c, f, basis) = (
        terms.settlement,
        terms.maturity,
        terms.coupon_rate,
        terms.frequency,
        terms.basis,
    );
    let macaulay = duration_macaulay(settlement, maturity, c, yield_rate, f, basis)?;
    let modified = duration_modified(settlement, maturity, c, yield_rate, f, basis)?;
    let convex = convexity(settlement, maturity, c, yield_rate, f, basis)?;
    let eir = effective_interest_rate_with(
        settlement,
        maturity,
        c,
        price,
        f,
        basis,
        &config.eir_config(),
    )?;

    let mut results = vec![
        KeyValue::from_f64("Modified Duration", modified, 6),
        KeyValue::from_f64("Macaulay Duration", macaulay, 6),
        KeyValue::from_f64("Convexity", convex, 6),
        KeyValue::from_percent("Effective Interest Rate", eir),
        KeyValue::from_percent("Yield", yield_rate),
        KeyValue::from_f64("Clean Price", 100.0 * price, 6),
    ];
    results.extend(describe(&terms));

    if format == OutputFormat::Table {
        print_header("Bond Analytics");
    }
    print_metrics(&results, format)
}
