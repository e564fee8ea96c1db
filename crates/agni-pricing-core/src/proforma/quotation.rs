//! Pro-forma quotation assembly.
//!
//! Wraps a computed quote with the commercial terms a buyer sees: incoterm,
//! target-currency value at the quoted exchange rate, payment terms, a
//! quote number and a validity date.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AgniError;
use crate::pricing::quote::{compute_quote, PricingInput, PricingResult};
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Rate};
use crate::AgniResult;

/// INR per unit of target currency used when none is quoted.
pub const DEFAULT_EXCHANGE_RATE: Rate = dec!(83.5);

pub const DEFAULT_VALIDITY_DAYS: u32 = 30;

pub const DEFAULT_PAYMENT_TERMS: &str = "30% Advance, 70% against BL";

/// Incoterm on the quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Incoterm {
    EXW,
    #[default]
    FOB,
    CFR,
    CIF,
    DAP,
    DDP,
}

impl std::fmt::Display for Incoterm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Incoterm::EXW => "EXW",
            Incoterm::FOB => "FOB",
            Incoterm::CFR => "CFR",
            Incoterm::CIF => "CIF",
            Incoterm::DAP => "DAP",
            Incoterm::DDP => "DDP",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Incoterm {
    type Err = AgniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXW" => Ok(Incoterm::EXW),
            "FOB" => Ok(Incoterm::FOB),
            "CFR" => Ok(Incoterm::CFR),
            "CIF" => Ok(Incoterm::CIF),
            "DAP" => Ok(Incoterm::DAP),
            "DDP" => Ok(Incoterm::DDP),
            other => Err(AgniError::InvalidInput {
                field: "incoterm".into(),
                reason: format!("Unsupported incoterm '{other}'"),
            }),
        }
    }
}

/// Input for a pro-forma quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProformaInput {
    pub quote: PricingInput,
    pub hs_code: String,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub incoterm: Incoterm,
    /// Home-currency (INR) units per one target-currency unit.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Rate,
    #[serde(default = "default_target_currency")]
    pub target_currency: Currency,
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
    #[serde(default = "default_payment_terms")]
    pub payment_terms: String,
}

fn default_exchange_rate() -> Rate {
    DEFAULT_EXCHANGE_RATE
}

fn default_target_currency() -> Currency {
    Currency::USD
}

fn default_validity_days() -> u32 {
    DEFAULT_VALIDITY_DAYS
}

fn default_payment_terms() -> String {
    DEFAULT_PAYMENT_TERMS.into()
}

/// Assembled quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProformaQuotation {
    pub quote_number: String,
    pub hs_code: String,
    pub incoterm: Incoterm,
    pub pricing: PricingResult,
    /// Final quote in home currency, rounded to whole rupees.
    pub total_inr: Money,
    /// Final quote in target currency, rounded to 2 dp.
    pub total_target: Money,
    pub target_currency: Currency,
    pub exchange_rate: Rate,
    pub payment_terms: String,
    pub issue_date: NaiveDate,
    pub validity_date: NaiveDate,
}

/// `QTN-YYYYMMDD-XXXX`, where XXXX is the HS chapter/heading.
pub fn quote_number(issue_date: NaiveDate, hs_code: &str) -> String {
    let code = hs_code.trim();
    let heading: String = code.chars().take(4).collect();
    format!("QTN-{}-{}", issue_date.format("%Y%m%d"), heading)
}

/// Build a pro-forma quotation from a pricing input and commercial terms.
pub fn build_proforma(input: &ProformaInput) -> AgniResult<ComputationOutput<ProformaQuotation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.exchange_rate <= Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "exchange_rate".into(),
            reason: "Exchange rate must be positive".into(),
        });
    }
    if input.hs_code.trim().is_empty() {
        return Err(AgniError::InvalidInput {
            field: "hs_code".into(),
            reason: "HS code is required on a quotation".into(),
        });
    }
    if input.validity_days == 0 {
        warnings.push("Validity of 0 days: quotation expires on issue".into());
    }

    let pricing = compute_quote(&input.quote)?;
    if pricing.final_quote < Decimal::ZERO {
        warnings.push(format!(
            "Final quote is negative ({}); quotation is not issuable",
            pricing.final_quote
        ));
    }

    let total_inr = pricing.final_quote.round_dp(0);
    let total_target = pricing
        .final_quote
        .checked_div(input.exchange_rate)
        .ok_or_else(|| AgniError::InvalidInput {
            field: "exchange_rate".into(),
            reason: "Converted total exceeds the representable decimal range".into(),
        })?
        .round_dp(2);
    let validity_date = input
        .issue_date
        .checked_add_days(Days::new(u64::from(input.validity_days)))
        .ok_or_else(|| AgniError::InvalidInput {
            field: "validity_days".into(),
            reason: "Validity date falls outside the supported calendar range".into(),
        })?;

    let quotation = ProformaQuotation {
        quote_number: quote_number(input.issue_date, &input.hs_code),
        hs_code: input.hs_code.trim().to_string(),
        incoterm: input.incoterm,
        pricing,
        total_inr,
        total_target,
        target_currency: input.target_currency.clone(),
        exchange_rate: input.exchange_rate,
        payment_terms: input.payment_terms.clone(),
        issue_date: input.issue_date,
        validity_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Pro-forma quotation: export quote converted at quoted exchange rate",
        input,
        warnings,
        elapsed,
        quotation,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::quote::IncentiveAmounts;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_input() -> ProformaInput {
        let mut quote = PricingInput::new(dec!(1000), dec!(150));
        quote.incentive_rates = IncentiveAmounts {
            rodtep: dec!(40),
            dbk: dec!(30),
            gst: dec!(20),
        };
        ProformaInput {
            quote,
            hs_code: "10063020".into(),
            issue_date: date(2026, 1, 15),
            incoterm: Incoterm::FOB,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            target_currency: Currency::USD,
            validity_days: DEFAULT_VALIDITY_DAYS,
            payment_terms: DEFAULT_PAYMENT_TERMS.into(),
        }
    }

    #[test]
    fn test_quote_number_format() {
        assert_eq!(quote_number(date(2026, 1, 15), "10063020"), "QTN-20260115-1006");
        assert_eq!(quote_number(date(2026, 1, 15), "091"), "QTN-20260115-091");
    }

    #[test]
    fn test_usd_conversion() {
        let out = build_proforma(&base_input()).unwrap();
        let q = &out.result;
        assert_eq!(q.pricing.final_quote, dec!(1219));
        assert_eq!(q.total_inr, dec!(1219));
        // 1219 / 83.5 = 14.598...
        assert_eq!(q.total_target, dec!(14.60));
    }

    #[test]
    fn test_validity_date() {
        let out = build_proforma(&base_input()).unwrap();
        assert_eq!(out.result.validity_date, date(2026, 2, 14));
    }

    #[test]
    fn test_validity_beyond_calendar_rejected() {
        let mut input = base_input();
        input.validity_days = 4_000_000_000;
        let err = build_proforma(&input).unwrap_err();
        assert!(
            matches!(err, AgniError::InvalidInput { ref field, .. } if field == "validity_days")
        );
    }

    #[test]
    fn test_tiny_exchange_rate_overflow_rejected() {
        let mut input = base_input();
        input.quote = PricingInput::new(dec!(100000000000000000000), Decimal::ZERO);
        input.exchange_rate = Decimal::new(1, 21);
        let err = build_proforma(&input).unwrap_err();
        assert!(
            matches!(err, AgniError::InvalidInput { ref field, .. } if field == "exchange_rate")
        );
    }

    #[test]
    fn test_zero_exchange_rate_rejected() {
        let mut input = base_input();
        input.exchange_rate = Decimal::ZERO;
        assert!(matches!(
            build_proforma(&input),
            Err(AgniError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_invalid_pricing_propagates() {
        let mut input = base_input();
        input.quote.base_cost = Decimal::ZERO;
        assert!(build_proforma(&input).is_err());
    }

    #[test]
    fn test_defaults_from_json() {
        let input: ProformaInput = serde_json::from_str(
            r#"{
                "quote": { "base_cost": "1000", "logistics": "150" },
                "hs_code": "10063020",
                "issue_date": "2026-01-15"
            }"#,
        )
        .unwrap();
        assert_eq!(input.incoterm, Incoterm::FOB);
        assert_eq!(input.exchange_rate, dec!(83.5));
        assert_eq!(input.target_currency, Currency::USD);
        assert_eq!(input.validity_days, 30);
    }

    #[test]
    fn test_incoterm_parse() {
        assert_eq!("cif".parse::<Incoterm>().unwrap(), Incoterm::CIF);
        assert!("XYZ".parse::<Incoterm>().is_err());
    }
}
