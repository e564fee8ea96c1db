mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::fta::{FtaMarketsArgs, FtaSavingsArgs};
use commands::incentives::{IncentiveShareArgs, ResolveIncentivesArgs};
use commands::pricing::QuoteArgs;
use commands::proforma::ProformaArgs;
use commands::regulatory::CbamRateArgs;

/// Export pricing and incentive calculations
#[derive(Parser)]
#[command(
    name = "agni",
    version,
    about = "Export pricing and incentive calculations",
    long_about = "A CLI for Indian export pricing with decimal precision. Computes \
                  export quotes with RoDTEP/DBK/GST incentives, GI premium and CBAM \
                  surcharge, resolves incentives per HS code, FTA duty savings and \
                  pro-forma quotations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an export quote (net cost, margin, GI premium, CBAM)
    Quote(QuoteArgs),
    /// Resolve RoDTEP/DBK/GST benefits for an HS code from a schedule
    ResolveIncentives(ResolveIncentivesArgs),
    /// Express incentive amounts as a percentage of base cost
    IncentiveShare(IncentiveShareArgs),
    /// Read the CBAM rate from a regulatory matrix
    CbamRate(CbamRateArgs),
    /// Duty savings under an FTA for one market
    FtaSavings(FtaSavingsArgs),
    /// Rank all FTA markets by duty savings
    FtaMarkets(FtaMarketsArgs),
    /// Build a pro-forma quotation
    Proforma(ProformaArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::pricing::run_quote(args),
        Commands::ResolveIncentives(args) => commands::incentives::run_resolve_incentives(args),
        Commands::IncentiveShare(args) => commands::incentives::run_incentive_share(args),
        Commands::CbamRate(args) => commands::regulatory::run_cbam_rate(args),
        Commands::FtaSavings(args) => commands::fta::run_fta_savings(args),
        Commands::FtaMarkets(args) => commands::fta::run_fta_markets(args),
        Commands::Proforma(args) => commands::proforma::run_proforma(args),
        Commands::Version => {
            println!("agni {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
