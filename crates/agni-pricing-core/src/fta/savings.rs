//! Free Trade Agreement duty savings.
//!
//! Duty rates here are percentages (10 = 10%), matching how agreement
//! schedules are published. Savings on a shipment are
//! `(standard_rate - duty_rate) x value / 100`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AgniError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::AgniResult;

/// Shipment value used when none is given.
pub const DEFAULT_SHIPMENT_VALUE: Money = dec!(50000);

/// One partner market under a trade agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtaMarket {
    pub country: String,
    pub agreement_name: String,
    /// Preferential duty under the agreement, in percent.
    pub duty_rate: Decimal,
    /// MFN duty without the agreement, in percent.
    pub standard_rate: Decimal,
    pub status: String,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_checklist: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_year: Option<i32>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// India's agreement partners tracked by the dashboard.
pub fn fta_markets() -> Vec<FtaMarket> {
    vec![
        FtaMarket {
            country: "New Zealand".into(),
            agreement_name: "India-NZ FTA (2025)".into(),
            duty_rate: Decimal::ZERO,
            standard_rate: dec!(10),
            status: "100% DUTY-FREE ACCESS".into(),
            sectors: strings(&["Textiles", "Leather", "Gems", "Engineering"]),
            special_flags: strings(&["AYUSH Recognition", "Quarantine Protocol V2"]),
            special_checklist: strings(&[
                "Phytosanitary Certificate Verification",
                "Bio-Security Audit Level 4",
                "AYUSH Wellness Certification",
                "Eco-Packaging Compliance",
            ]),
            projection_year: Some(2025),
        },
        FtaMarket {
            country: "Australia".into(),
            agreement_name: "ECTA (Economic Cooperation)".into(),
            duty_rate: Decimal::ZERO,
            standard_rate: dec!(12.5),
            status: "ZERO-TARIFF LABOR SECTORS".into(),
            sectors: strings(&["Textiles", "Leather", "Footwear", "Furniture"]),
            special_flags: Vec::new(),
            special_checklist: Vec::new(),
            projection_year: None,
        },
        FtaMarket {
            country: "UAE".into(),
            agreement_name: "CEPA (Comprehensive Partnership)".into(),
            duty_rate: Decimal::ZERO,
            standard_rate: dec!(8),
            status: "ACTIVE 0% THRESHOLD".into(),
            sectors: strings(&["Gems & Jewelry", "Food Security", "Machinery"]),
            special_flags: strings(&["Direct-to-UAE Logistics Incentive"]),
            special_checklist: Vec::new(),
            projection_year: None,
        },
        FtaMarket {
            country: "Oman".into(),
            agreement_name: "India-Oman CEPA".into(),
            duty_rate: Decimal::ZERO,
            standard_rate: dec!(7.5),
            status: "DUTY-FREE STRATEGIC HUB".into(),
            sectors: strings(&["Petrochemicals", "Agriculture", "Steel"]),
            special_flags: Vec::new(),
            special_checklist: Vec::new(),
            projection_year: None,
        },
        FtaMarket {
            country: "United Kingdom".into(),
            agreement_name: "UK-India CETA (2026)".into(),
            duty_rate: dec!(0.5),
            standard_rate: dec!(15),
            status: "99% TARIFF-FREE PROJECTION".into(),
            sectors: strings(&["Services", "Pharma", "Automotive"]),
            special_flags: Vec::new(),
            special_checklist: Vec::new(),
            projection_year: Some(2026),
        },
    ]
}

/// Input for a savings calculation against one market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtaSavingsInput {
    pub country: String,
    #[serde(default = "default_shipment_value")]
    pub shipment_value: Money,
    /// Replaces the built-in market table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markets: Option<Vec<FtaMarket>>,
}

fn default_shipment_value() -> Money {
    DEFAULT_SHIPMENT_VALUE
}

/// Duty comparison for one market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtaSavings {
    pub country: String,
    pub agreement_name: String,
    pub status: String,
    pub shipment_value: Money,
    pub standard_duty: Money,
    pub preferential_duty: Money,
    pub duty_savings: Money,
    /// Savings as a percentage of shipment value.
    pub margin_gain_pct: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<String>,
}

fn savings_for(market: &FtaMarket, value: Money) -> FtaSavings {
    let standard_duty = market.standard_rate * value / Decimal::ONE_HUNDRED;
    let preferential_duty = market.duty_rate * value / Decimal::ONE_HUNDRED;
    FtaSavings {
        country: market.country.clone(),
        agreement_name: market.agreement_name.clone(),
        status: market.status.clone(),
        shipment_value: value,
        standard_duty,
        preferential_duty,
        duty_savings: standard_duty - preferential_duty,
        margin_gain_pct: market.standard_rate - market.duty_rate,
        checklist: market.special_checklist.clone(),
    }
}

fn validate_value(value: Money) -> AgniResult<()> {
    if value < Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "shipment_value".into(),
            reason: "Shipment value cannot be negative".into(),
        });
    }
    Ok(())
}

/// Duty savings from shipping under the agreement with `input.country`.
pub fn fta_savings(input: &FtaSavingsInput) -> AgniResult<ComputationOutput<FtaSavings>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_value(input.shipment_value)?;

    let markets = input.markets.clone().unwrap_or_else(fta_markets);
    let wanted = input.country.trim();
    let market = markets
        .iter()
        .find(|m| m.country.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| AgniError::NotFound(format!("No FTA market for '{wanted}'")))?;

    if market.duty_rate > market.standard_rate {
        warnings.push(format!(
            "Preferential rate ({}%) exceeds standard rate ({}%) for {}",
            market.duty_rate, market.standard_rate, market.country
        ));
    }
    if let Some(year) = market.projection_year {
        warnings.push(format!(
            "{} terms are projected for {year}; confirm the agreement is in force",
            market.agreement_name
        ));
    }

    let result = savings_for(market, input.shipment_value);
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "FTA duty savings: (standard rate - preferential rate) x value / 100",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Savings against every built-in market, best first.
pub fn rank_fta_markets(shipment_value: Money) -> AgniResult<Vec<FtaSavings>> {
    validate_value(shipment_value)?;
    let mut ranked: Vec<FtaSavings> = fta_markets()
        .iter()
        .map(|m| savings_for(m, shipment_value))
        .collect();
    ranked.sort_by(|a, b| b.duty_savings.cmp(&a.duty_savings));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(country: &str) -> FtaSavingsInput {
        FtaSavingsInput {
            country: country.into(),
            shipment_value: DEFAULT_SHIPMENT_VALUE,
            markets: None,
        }
    }

    #[test]
    fn test_new_zealand_savings() {
        let out = fta_savings(&input("New Zealand")).unwrap();
        // (10 - 0) * 50000 / 100 = 5000
        assert_eq!(out.result.duty_savings, dec!(5000));
        assert_eq!(out.result.checklist.len(), 4);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_uk_partial_preference() {
        let out = fta_savings(&input("united kingdom")).unwrap();
        // (15 - 0.5) * 50000 / 100 = 7250
        assert_eq!(out.result.duty_savings, dec!(7250));
        assert_eq!(out.result.preferential_duty, dec!(250));
        assert_eq!(out.result.margin_gain_pct, dec!(14.5));
    }

    #[test]
    fn test_active_agreement_has_no_warnings() {
        let out = fta_savings(&input("UAE")).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.duty_savings, dec!(4000));
    }

    #[test]
    fn test_unknown_market() {
        let result = fta_savings(&input("Brazil"));
        assert!(matches!(result, Err(AgniError::NotFound(_))));
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut i = input("Oman");
        i.shipment_value = dec!(-1);
        assert!(fta_savings(&i).is_err());
    }

    #[test]
    fn test_default_value_from_json() {
        let i: FtaSavingsInput = serde_json::from_str(r#"{"country":"Oman"}"#).unwrap();
        assert_eq!(i.shipment_value, dec!(50000));
        let out = fta_savings(&i).unwrap();
        assert_eq!(out.result.duty_savings, dec!(3750));
    }

    #[test]
    fn test_ranking_best_first() {
        let ranked = rank_fta_markets(dec!(100000)).unwrap();
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].country, "United Kingdom");
        assert_eq!(ranked[4].country, "Oman");
    }

    #[test]
    fn test_custom_market_table() {
        let mut i = input("Mauritius");
        i.markets = Some(vec![FtaMarket {
            country: "Mauritius".into(),
            agreement_name: "CECPA".into(),
            duty_rate: dec!(2),
            standard_rate: dec!(6),
            status: "ACTIVE".into(),
            sectors: Vec::new(),
            special_flags: Vec::new(),
            special_checklist: Vec::new(),
            projection_year: None,
        }]);
        let out = fta_savings(&i).unwrap();
        assert_eq!(out.result.duty_savings, dec!(2000));
    }
}
