//! Price command implementation.
//!
//! Calculates bond price from yield or yield from price. Bonds with an odd
//! first or last coupon period are priced when those dates are given.

use anyhow::{bail, Result};
use clap::Args;

use coupon_bonds::pricing::{accrued_interest, price_odd_bond, price_with_clean, yield_with_config};
use coupon_bonds::ValuationConfig;
use coupon_core::Date;

use crate::cli::OutputFormat;
use crate::commands::{parse_optional_date, validate_price, validate_yield, BondTerms, Terms};
use crate::output::{print_metrics, print_warning, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub terms: BondTerms,

    /// Issue date (YYYY-MM-DD). Needed for odd periods and accrued interest.
    #[arg(short, long)]
    pub issue: Option<String>,

    /// First coupon date of an odd first period (YYYY-MM-DD)
    #[arg(long, requires = "issue")]
    pub first_coupon: Option<String>,

    /// Last coupon date before an odd final period (YYYY-MM-DD)
    #[arg(long, requires = "issue")]
    pub last_coupon: Option<String>,

    /// Yield to maturity (as percentage). If provided, calculates price.
    #[arg(short, long, group = "calc_mode")]
    pub yield_value: Option<f64>,

    /// Price per 100. If provided, calculates yield.
    #[arg(short, long, group = "calc_mode")]
    pub price: Option<f64>,

    /// Read --price as a dirty price
    #[arg(long)]
    pub dirty: bool,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat, config: &ValuationConfig) -> Result<()> {
    let terms = args.terms.resolve()?;
    let issue = parse_optional_date(args.issue.as_deref())?;
    let first_coupon = parse_optional_date(args.first_coupon.as_deref())?;
    let last_coupon = parse_optional_date(args.last_coupon.as_deref())?;

    let mut results = match (args.yield_value, args.price) {
        (Some(y), _) => {
            let yield_rate = validate_yield(y)? / 100.0;
            match (issue, first_coupon.is_some() || last_coupon.is_some()) {
                (Some(issue), true) => {
                    if first_coupon.is_some() && last_coupon.is_some() {
                        print_warning("both periods odd; pricing with the odd last period only");
                    }
                    odd_price(&terms, issue, first_coupon, last_coupon, yield_rate)?
                }
                _ => regular_price(&terms, issue, yield_rate)?,
            }
        }
        (None, Some(p)) => {
            if first_coupon.is_some() || last_coupon.is_some() {
                bail!("yield from price is only available for regular bonds");
            }
            let price = validate_price(p)? / 100.0;
            let config = config.with_clean(!args.dirty);
            let ytm = yield_with_config(
                terms.settlement,
                terms.maturity,
                terms.coupon_rate,
                price,
                terms.frequency,
                terms.basis,
                &config,
            )?;
            let label = if args.dirty { "Dirty Price" } else { "Clean Price" };
            vec![
                KeyValue::from_percent("Yield", ytm),
                KeyValue::from_f64(label, 100.0 * price, 6),
            ]
        }
        (None, None) => bail!("provide --yield-value to price or --price to solve for yield"),
    };

    results.extend(describe(&terms));
    print_metrics(&results, format)
}

fn regular_price(terms: &Terms, issue: Option<Date>, yield_rate: f64) -> Result<Vec<KeyValue>> {
    let price = |clean| {
        price_with_clean(
            terms.settlement,
            terms.maturity,
            terms.coupon_rate,
            yield_rate,
            terms.frequency,
            terms.basis,
            clean,
        )
    };
    let clean = price(true)?;
    let dirty = price(false)?;

    let mut results = vec![
        KeyValue::from_f64("Clean Price", 100.0 * clean, 6),
        KeyValue::from_f64("Dirty Price", 100.0 * dirty, 6),
        KeyValue::from_percent("Yield", yield_rate),
    ];
    if let Some(issue) = issue {
        let accrued = accrued_interest(
            issue,
            terms.settlement,
            terms.coupon_rate,
            terms.frequency,
            terms.basis,
        )?;
        results.push(KeyValue::from_f64("Accrued Interest", 100.0 * accrued, 6));
    }
    Ok(results)
}

fn odd_price(
    terms: &Terms,
    issue: Date,
    first_coupon: Option<Date>,
    last_coupon: Option<Date>,
    yield_rate: f64,
) -> Result<Vec<KeyValue>> {
    let price = |clean| {
        price_odd_bond(
            terms.settlement,
            issue,
            terms.maturity,
            first_coupon,
            last_coupon,
            terms.coupon_rate,
            yield_rate,
            terms.frequency,
            terms.basis,
            clean,
        )
    };
    let clean = price(true)?;
    let dirty = price(false)?;

    Ok(vec![
        KeyValue::from_f64("Clean Price", 100.0 * clean, 6),
        KeyValue::from_f64("Dirty Price", 100.0 * dirty, 6),
        KeyValue::from_percent("Yield", yield_rate),
        KeyValue::from_f64("Accrued Interest", 100.0 * (dirty - clean), 6),
    ])
}

/// Bond details appended after the computed values.
pub fn describe(terms: &Terms) -> Vec<KeyValue> {
    vec![
        KeyValue::from_percent("Coupon", terms.coupon_rate),
        KeyValue::new("Settlement", terms.settlement.to_string()),
        KeyValue::new("Maturity", terms.maturity.to_string()),
        KeyValue::new("Frequency", terms.frequency.to_string()),
        KeyValue::new("Basis", terms.basis.to_string()),
    ]
}
