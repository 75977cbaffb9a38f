//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    AccruedArgs, AmortizeArgs, AnalyzeArgs, BillArgs, CashFlowsArgs, PriceArgs, ScheduleArgs,
    ValueArgs,
};

/// Coupon - bond cash flows and valuation from the command line
#[derive(Parser)]
#[command(name = "coupon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Valuation settings file (JSON)
    #[arg(long, env = "COUPON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log solver progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a bond given yield or calculate yield from price
    Price(PriceArgs),

    /// Analyze a bond (duration, convexity, effective interest rate)
    Analyze(AnalyzeArgs),

    /// Accrued interest from issue to settlement
    Accrued(AccruedArgs),

    /// Price or yield of a discounted bill
    Bill(BillArgs),

    /// List the coupon dates after settlement
    Schedule(ScheduleArgs),

    /// Principal, interest and time-factor cash flows
    Cashflows(CashFlowsArgs),

    /// Premium or discount amortization table
    Amortize(AmortizeArgs),

    /// Value a batch of bond contracts from a JSON file
    Value(ValueArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Minimal output (just the value)
    Minimal,
}
