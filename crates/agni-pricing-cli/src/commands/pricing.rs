use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use agni_pricing_core::deep_link::seed::DeepLinkSeed;
use agni_pricing_core::incentives::advisory::AdvisoryInsight;
use agni_pricing_core::pricing::quote::{
    self, IncentiveAmounts, PricingInput, DEFAULT_MARGIN_RATE,
};
use agni_pricing_core::regulatory::matrix::RegulatoryMatrix;
use agni_pricing_core::resource::DataFormat;
use agni_pricing_core::{GiStatus, ProductCategory};

use crate::input;

/// Arguments for an export quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Base unit (FOB) cost
    #[arg(long)]
    pub base_cost: Option<Decimal>,

    /// Freight and logistics cost
    #[arg(long)]
    pub logistics: Option<Decimal>,

    /// RoDTEP benefit amount
    #[arg(long)]
    pub rodtep: Option<Decimal>,

    /// Duty drawback benefit amount
    #[arg(long)]
    pub dbk: Option<Decimal>,

    /// GST refund benefit amount
    #[arg(long)]
    pub gst: Option<Decimal>,

    /// Margin on net cost (e.g. 0.15 for 15%)
    #[arg(long)]
    pub margin_rate: Option<Decimal>,

    /// GI registration status (REGISTERED or NONE)
    #[arg(long)]
    pub gi_status: Option<GiStatus>,

    /// Destination country
    #[arg(long)]
    pub destination: Option<String>,

    /// Product category (Carbon_Intensive or General_Goods)
    #[arg(long)]
    pub category: Option<ProductCategory>,

    /// CBAM surcharge rate (e.g. 0.085)
    #[arg(long)]
    pub cbam_rate: Option<Decimal>,

    /// Regulatory matrix file supplying the CBAM rate
    #[arg(long)]
    pub matrix: Option<String>,

    /// Advisory response file supplying the incentive amounts
    #[arg(long)]
    pub advisory: Option<String>,

    /// Deep-link query string (e.g. "base_cost=9000&gi_status=REGISTERED")
    #[arg(long)]
    pub deep_link: Option<String>,

    /// Print the display breakdown instead of the full envelope
    #[arg(long)]
    pub breakdown: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut pricing_input: PricingInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        quote_from_flags(&args)?
    };

    if let Some(ref path) = args.matrix {
        let text = input::file::read_text(path)?;
        let matrix = RegulatoryMatrix::from_text(&text, DataFormat::from_path(path))?;
        pricing_input.cbam_rate = matrix.cbam_rate()?;
    }

    if let Some(ref path) = args.advisory {
        let insight: AdvisoryInsight = input::file::read_input(path)?;
        pricing_input.incentive_rates = insight.incentive_amounts();
    }

    if let Some(ref query) = args.deep_link {
        DeepLinkSeed::parse(query)?.apply(&mut pricing_input);
    }

    if args.breakdown {
        let result = quote::compute_quote(&pricing_input)?;
        return Ok(serde_json::to_value(result.line_items())?);
    }

    let result = quote::analyze_quote(&pricing_input)?;
    Ok(serde_json::to_value(result)?)
}

fn quote_from_flags(args: &QuoteArgs) -> Result<PricingInput, Box<dyn std::error::Error>> {
    // A deep link may carry the base cost on its own.
    let base_cost = match args.base_cost {
        Some(cost) => cost,
        None if args.deep_link.is_some() => Decimal::ZERO,
        None => return Err("--base-cost is required (or provide --input)".into()),
    };

    Ok(PricingInput {
        base_cost,
        logistics: args.logistics.unwrap_or(Decimal::ZERO),
        incentive_rates: IncentiveAmounts {
            rodtep: args.rodtep.unwrap_or(Decimal::ZERO),
            dbk: args.dbk.unwrap_or(Decimal::ZERO),
            gst: args.gst.unwrap_or(Decimal::ZERO),
        },
        margin_rate: args.margin_rate.unwrap_or(DEFAULT_MARGIN_RATE),
        gi_status: args.gi_status.unwrap_or_default(),
        destination: args.destination.clone().unwrap_or_default(),
        product_category: args.category.unwrap_or_default(),
        cbam_rate: args.cbam_rate.unwrap_or(Decimal::ZERO),
    })
}
