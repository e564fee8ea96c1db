use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use agni_pricing_core::fta::savings::{self, FtaSavingsInput, DEFAULT_SHIPMENT_VALUE};

use crate::input;

/// Arguments for FTA duty savings against one market
#[derive(Args)]
pub struct FtaSavingsArgs {
    /// Partner country (e.g. "United Kingdom")
    #[arg(long)]
    pub country: Option<String>,

    /// Shipment value
    #[arg(long)]
    pub value: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for ranking all FTA markets
#[derive(Args)]
pub struct FtaMarketsArgs {
    /// Shipment value
    #[arg(long)]
    pub value: Option<Decimal>,
}

pub fn run_fta_savings(args: FtaSavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fta_input: FtaSavingsInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FtaSavingsInput {
            country: args
                .country
                .clone()
                .ok_or("--country is required (or provide --input)")?,
            shipment_value: args.value.unwrap_or(DEFAULT_SHIPMENT_VALUE),
            markets: None,
        }
    };
    let result = savings::fta_savings(&fta_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fta_markets(args: FtaMarketsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ranked = savings::rank_fta_markets(args.value.unwrap_or(DEFAULT_SHIPMENT_VALUE))?;
    Ok(serde_json::json!({ "results": ranked }))
}
