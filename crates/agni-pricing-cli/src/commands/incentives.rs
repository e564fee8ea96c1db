use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use agni_pricing_core::incentives::advisory::AdvisoryInsight;
use agni_pricing_core::incentives::schedule::{self, IncentiveSchedule, ResolveRequest};
use agni_pricing_core::incentives::share::{self, IncentiveShareInput};
use agni_pricing_core::resource::DataFormat;

use crate::input;

/// Arguments for resolving incentive benefits from a schedule
#[derive(Args)]
pub struct ResolveIncentivesArgs {
    /// Incentive schedule file (JSON or YAML)
    #[arg(long)]
    pub schedule: String,

    /// HS code (8 or 10 digits)
    #[arg(long)]
    pub hs_code: Option<String>,

    /// Base unit (FOB) cost
    #[arg(long)]
    pub base_cost: Option<Decimal>,

    /// Freight and logistics cost
    #[arg(long)]
    pub logistics: Option<Decimal>,

    /// Emit the advisory response shape instead of the envelope
    #[arg(long)]
    pub advisory_format: bool,

    /// Path to JSON/YAML request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for incentive share of base cost
#[derive(Args)]
pub struct IncentiveShareArgs {
    /// Base unit (FOB) cost
    #[arg(long)]
    pub base_cost: Option<Decimal>,

    /// RoDTEP benefit amount
    #[arg(long)]
    pub rodtep: Option<Decimal>,

    /// Duty drawback benefit amount
    #[arg(long)]
    pub dbk: Option<Decimal>,

    /// GST refund benefit amount
    #[arg(long)]
    pub gst: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_resolve_incentives(
    args: ResolveIncentivesArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ResolveRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ResolveRequest {
            hs_code: args
                .hs_code
                .clone()
                .ok_or("--hs-code is required (or provide --input)")?,
            base_cost: args
                .base_cost
                .ok_or("--base-cost is required (or provide --input)")?,
            logistics: args.logistics.unwrap_or(Decimal::ZERO),
        }
    };

    let text = input::file::read_text(&args.schedule)?;
    let incentive_schedule =
        IncentiveSchedule::from_text(&text, DataFormat::from_path(&args.schedule))?;
    let result = schedule::resolve_incentives(&incentive_schedule, &request)?;

    if args.advisory_format {
        return Ok(serde_json::to_value(AdvisoryInsight::from_resolution(
            &result.result,
        ))?);
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_incentive_share(args: IncentiveShareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let share_input: IncentiveShareInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        IncentiveShareInput {
            base_cost: args
                .base_cost
                .ok_or("--base-cost is required (or provide --input)")?,
            rodtep_benefit: args.rodtep.unwrap_or(Decimal::ZERO),
            dbk_benefit: args.dbk.unwrap_or(Decimal::ZERO),
            gst_benefit: args.gst.unwrap_or(Decimal::ZERO),
        }
    };
    let result = share::calculate_incentive_share(&share_input)?;
    Ok(serde_json::to_value(result)?)
}
