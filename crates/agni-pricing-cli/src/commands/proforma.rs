use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use agni_pricing_core::deep_link::seed::DeepLinkSeed;
use agni_pricing_core::pricing::quote::{IncentiveAmounts, PricingInput};
use agni_pricing_core::proforma::quotation::{
    self, Incoterm, ProformaInput, DEFAULT_EXCHANGE_RATE, DEFAULT_PAYMENT_TERMS,
    DEFAULT_VALIDITY_DAYS,
};
use agni_pricing_core::{Currency, GiStatus};

use crate::input;

/// Arguments for a pro-forma quotation
#[derive(Args)]
pub struct ProformaArgs {
    /// HS code of the quoted product
    #[arg(long)]
    pub hs_code: Option<String>,

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

    /// GI registration status (REGISTERED or NONE)
    #[arg(long)]
    pub gi_status: Option<GiStatus>,

    /// Incoterm (EXW, FOB, CFR, CIF, DAP, DDP)
    #[arg(long)]
    pub incoterm: Option<Incoterm>,

    /// INR per USD
    #[arg(long)]
    pub exchange_rate: Option<Decimal>,

    /// Days the quotation stays valid
    #[arg(long)]
    pub validity_days: Option<u32>,

    /// Payment terms printed on the quotation
    #[arg(long)]
    pub payment_terms: Option<String>,

    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub issue_date: Option<NaiveDate>,

    /// Deep-link query string seeding HS code, base cost and GI status
    #[arg(long)]
    pub deep_link: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_proforma(args: ProformaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let proforma_input: ProformaInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        proforma_from_flags(&args)?
    };
    let result = quotation::build_proforma(&proforma_input)?;
    Ok(serde_json::to_value(result)?)
}

fn proforma_from_flags(args: &ProformaArgs) -> Result<ProformaInput, Box<dyn std::error::Error>> {
    let seed = match args.deep_link {
        Some(ref query) => DeepLinkSeed::parse(query)?,
        None => DeepLinkSeed::default(),
    };

    let mut quote = PricingInput::new(
        args.base_cost.unwrap_or(Decimal::ZERO),
        args.logistics.unwrap_or(Decimal::ZERO),
    );
    quote.incentive_rates = IncentiveAmounts {
        rodtep: args.rodtep.unwrap_or(Decimal::ZERO),
        dbk: args.dbk.unwrap_or(Decimal::ZERO),
        gst: args.gst.unwrap_or(Decimal::ZERO),
    };
    quote.gi_status = args.gi_status.unwrap_or_default();
    seed.apply(&mut quote);

    if quote.base_cost.is_zero() {
        return Err("--base-cost is required (or provide --input / --deep-link)".into());
    }

    let hs_code = args
        .hs_code
        .clone()
        .or(seed.hs_code)
        .ok_or("--hs-code is required (or provide --input / --deep-link)")?;

    Ok(ProformaInput {
        quote,
        hs_code,
        issue_date: args
            .issue_date
            .unwrap_or_else(|| Local::now().date_naive()),
        incoterm: args.incoterm.unwrap_or_default(),
        exchange_rate: args.exchange_rate.unwrap_or(DEFAULT_EXCHANGE_RATE),
        target_currency: Currency::USD,
        validity_days: args.validity_days.unwrap_or(DEFAULT_VALIDITY_DAYS),
        payment_terms: args
            .payment_terms
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_TERMS.to_string()),
    })
}
