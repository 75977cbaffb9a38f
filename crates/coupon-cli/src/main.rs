//! Coupon CLI - bond cash flows and valuation from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Price a bond
//! coupon price --coupon 5.75 --maturity 2017-11-15 --settlement 2008-02-15 --yield 6.5
//!
//! # Yield from a clean price
//! coupon price --coupon 5.75 --maturity 2017-11-15 --settlement 2008-02-15 --price 94.634362
//!
//! # Duration, convexity and effective interest rate
//! coupon analyze --coupon 8 --maturity 2016-01-01 --settlement 2008-01-01 --yield 9 --basis ACT/ACT
//!
//! # Amortization table
//! coupon amortize --coupon 8.75 --maturity 2013-03-03 --settlement 2008-03-03 --price 100.589894
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coupon_bonds::ValuationConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<ValuationConfig> {
    match &cli.config {
        Some(path) => {
            let config = ValuationConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            tracing::debug!("valuation settings from {}: {:?}", path.display(), config);
            Ok(config)
        }
        None => Ok(ValuationConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, format, &config)?,
        Commands::Analyze(args) => commands::analyze::execute(args, format, &config)?,
        Commands::Accrued(args) => commands::accrued::execute(args, format)?,
        Commands::Bill(args) => commands::bill::execute(args, format)?,
        Commands::Schedule(args) => commands::schedule::execute(args, format)?,
        Commands::Cashflows(args) => commands::cashflows::execute(args, format)?,
        Commands::Amortize(args) => commands::amortize::execute(args, format)?,
        Commands::Value(args) => commands::value::execute(args, format)?,
    }

    Ok(())
}
