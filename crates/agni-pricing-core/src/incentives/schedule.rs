//! Per-HS-code export incentive schedule and benefit resolution.
//!
//! Covers:
//! 1. **HS lookup** -- exact code, then 8-digit prefix for longer codes.
//! 2. **Benefit amounts** -- base cost x RoDTEP / Drawback / GST refund rate.
//! 3. **Competitive FOB** -- cost + logistics - RoDTEP - Drawback. The GST
//!    refund is realized later and is not passed through to the buyer.
//! 4. **Policy gate** -- high-sensitivity (restricted) items get no benefits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::AgniError;
use crate::resource::{parse_resource, DataFormat};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AgniResult;

/// Length of the HS prefix used for fallback matching.
const HS_PREFIX_LEN: usize = 8;

/// Compliance tag attached to every resolved product.
pub const COMPLIANCE_STATUS: &str = "READY_V1.1";

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Regulatory sensitivity of an HS line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sensitivity {
    #[default]
    Normal,
    High,
}

/// Incentive rates for one HS code. Rates are fractions of base cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductIncentive {
    pub hs_code: String,
    pub description: String,
    #[serde(default)]
    pub rodtep_rate: Rate,
    #[serde(default)]
    pub dbk_rate: Rate,
    #[serde(default)]
    pub gst_refund_rate: Rate,
    #[serde(default)]
    pub sensitivity: Sensitivity,
}

/// The full schedule, as loaded from a data resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncentiveSchedule {
    pub products: Vec<ProductIncentive>,
}

impl IncentiveSchedule {
    pub fn from_text(text: &str, format: DataFormat) -> AgniResult<Self> {
        let schedule: IncentiveSchedule = parse_resource(text, format)?;
        schedule.validate()?;
        Ok(schedule)
    }

    fn validate(&self) -> AgniResult<()> {
        for (i, p) in self.products.iter().enumerate() {
            if p.hs_code.trim().is_empty() {
                return Err(AgniError::InvalidInput {
                    field: format!("products[{i}].hs_code"),
                    reason: "HS code cannot be empty".into(),
                });
            }
            let rates = [
                ("rodtep_rate", p.rodtep_rate),
                ("dbk_rate", p.dbk_rate),
                ("gst_refund_rate", p.gst_refund_rate),
            ];
            for (name, rate) in rates {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(AgniError::InvalidInput {
                        field: format!("products[{i}].{name}"),
                        reason: "Rate must be a fraction between 0 and 1".into(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Find the schedule line for an HS code.
    ///
    /// Exact match wins. Codes of 8 or more digits fall back to the first
    /// line sharing their 8-digit prefix.
    pub fn find(&self, hs_code: &str) -> AgniResult<&ProductIncentive> {
        let code = hs_code.trim();
        if let Some(p) = self.products.iter().find(|p| p.hs_code == code) {
            return Ok(p);
        }
        if let Some(prefix) = code.get(..HS_PREFIX_LEN) {
            if let Some(p) = self.products.iter().find(|p| p.hs_code.starts_with(prefix)) {
                return Ok(p);
            }
        }
        Err(AgniError::NotFound(format!(
            "Incentive data for HS code {code} not found"
        )))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Request to resolve benefit amounts for one shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub hs_code: String,
    pub base_cost: Money,
    #[serde(default)]
    pub logistics: Money,
}

/// Advisory verdict for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Go,
    Hold,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Go => write!(f, "GO"),
            Verdict::Hold => write!(f, "HOLD"),
        }
    }
}

/// Resolved benefits for one product and shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveResolution {
    pub hs_code: String,
    pub product_name: String,
    pub verdict: Verdict,
    pub base_cost: Money,
    pub logistics: Money,
    pub rodtep_benefit: Money,
    pub dbk_benefit: Money,
    pub gst_benefit: Money,
    pub total_incentives: Money,
    /// Lowest safe FOB: cost + logistics - RoDTEP - Drawback.
    pub competitive_fob: Money,
    pub compliance_status: String,
}

/// Resolve absolute benefit amounts for a shipment from the schedule.
pub fn resolve_incentives(
    schedule: &IncentiveSchedule,
    request: &ResolveRequest,
) -> AgniResult<ComputationOutput<IncentiveResolution>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if request.base_cost <= Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "base_cost".into(),
            reason: "Base cost must be positive".into(),
        });
    }
    if request.logistics < Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "logistics".into(),
            reason: "Logistics cost cannot be negative".into(),
        });
    }

    let gross = request
        .base_cost
        .checked_add(request.logistics)
        .ok_or_else(|| AgniError::InvalidInput {
            field: "logistics".into(),
            reason: "Base cost plus logistics exceeds the representable decimal range".into(),
        })?;

    let product = schedule.find(&request.hs_code)?;
    if product.hs_code != request.hs_code.trim() {
        warnings.push(format!(
            "No exact match for HS {}; using {} by 8-digit prefix",
            request.hs_code.trim(),
            product.hs_code
        ));
    }

    let resolution = if product.sensitivity == Sensitivity::High {
        warnings.push(
            "Policy warning: restricted/high-risk item; incentives may be denied".into(),
        );
        IncentiveResolution {
            hs_code: product.hs_code.clone(),
            product_name: product.description.clone(),
            verdict: Verdict::Hold,
            base_cost: request.base_cost,
            logistics: request.logistics,
            rodtep_benefit: Decimal::ZERO,
            dbk_benefit: Decimal::ZERO,
            gst_benefit: Decimal::ZERO,
            total_incentives: Decimal::ZERO,
            competitive_fob: gross,
            compliance_status: COMPLIANCE_STATUS.into(),
        }
    } else {
        let rodtep_benefit = request.base_cost * product.rodtep_rate;
        let dbk_benefit = request.base_cost * product.dbk_rate;
        let gst_benefit = request.base_cost * product.gst_refund_rate;
        let total_incentives = rodtep_benefit
            .checked_add(dbk_benefit)
            .and_then(|sum| sum.checked_add(gst_benefit))
            .ok_or_else(|| AgniError::InvalidInput {
                field: "base_cost".into(),
                reason: "Combined benefits exceed the representable decimal range".into(),
            })?;
        let competitive_fob = gross - rodtep_benefit - dbk_benefit;

        if total_incentives > request.base_cost * dec!(0.25) {
            warnings.push(format!(
                "Combined benefits ({total_incentives}) exceed 25% of base cost; verify schedule rates"
            ));
        }

        IncentiveResolution {
            hs_code: product.hs_code.clone(),
            product_name: product.description.clone(),
            verdict: Verdict::Go,
            base_cost: request.base_cost,
            logistics: request.logistics,
            rodtep_benefit,
            dbk_benefit,
            gst_benefit,
            total_incentives,
            competitive_fob,
            compliance_status: COMPLIANCE_STATUS.into(),
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Incentive resolution: base cost x scheme rate per HS code",
        request,
        warnings,
        elapsed,
        resolution,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> IncentiveSchedule {
        IncentiveSchedule {
            products: vec![
                ProductIncentive {
                    hs_code: "10063020".into(),
                    description: "Basmati Rice".into(),
                    rodtep_rate: dec!(0.045),
                    dbk_rate: dec!(0.015),
                    gst_refund_rate: dec!(0.18),
                    sensitivity: Sensitivity::Normal,
                },
                ProductIncentive {
                    hs_code: "0910301000".into(),
                    description: "Turmeric, dried".into(),
                    rodtep_rate: dec!(0.02),
                    dbk_rate: dec!(0.01),
                    gst_refund_rate: dec!(0.05),
                    sensitivity: Sensitivity::Normal,
                },
                ProductIncentive {
                    hs_code: "93019000".into(),
                    description: "Military weapons".into(),
                    rodtep_rate: dec!(0.03),
                    dbk_rate: dec!(0.01),
                    gst_refund_rate: dec!(0.18),
                    sensitivity: Sensitivity::High,
                },
            ],
        }
    }

    fn request(hs: &str) -> ResolveRequest {
        ResolveRequest {
            hs_code: hs.into(),
            base_cost: dec!(1000),
            logistics: dec!(200),
        }
    }

    #[test]
    fn test_basmati_benefits() {
        let out = resolve_incentives(&schedule(), &request("10063020")).unwrap();
        let r = &out.result;
        assert_eq!(r.rodtep_benefit, dec!(45));
        assert_eq!(r.dbk_benefit, dec!(15));
        assert_eq!(r.gst_benefit, dec!(180));
        assert_eq!(r.total_incentives, dec!(240));
        // (1000 + 200) - (45 + 15) = 1140
        assert_eq!(r.competitive_fob, dec!(1140));
        assert_eq!(r.verdict, Verdict::Go);
        assert_eq!(r.compliance_status, "READY_V1.1");
    }

    #[test]
    fn test_prefix_fallback_for_long_codes() {
        let out = resolve_incentives(&schedule(), &request("1006302010")).unwrap();
        assert_eq!(out.result.hs_code, "10063020");
        assert!(out.warnings.iter().any(|w| w.contains("8-digit prefix")));
    }

    #[test]
    fn test_prefix_match_against_longer_schedule_code() {
        let s = schedule();
        let found = s.find("09103010").unwrap();
        assert_eq!(found.description, "Turmeric, dried");
    }

    #[test]
    fn test_short_code_has_no_fallback() {
        let err = schedule().find("100630").unwrap_err();
        assert!(matches!(err, AgniError::NotFound(_)));
    }

    #[test]
    fn test_unknown_code_not_found() {
        let result = resolve_incentives(&schedule(), &request("99999999"));
        assert!(matches!(result, Err(AgniError::NotFound(_))));
    }

    #[test]
    fn test_high_sensitivity_denies_benefits() {
        let out = resolve_incentives(&schedule(), &request("93019000")).unwrap();
        let r = &out.result;
        assert_eq!(r.verdict, Verdict::Hold);
        assert_eq!(r.total_incentives, Decimal::ZERO);
        assert_eq!(r.competitive_fob, dec!(1200));
        assert!(out.warnings.iter().any(|w| w.contains("Policy warning")));
    }

    #[test]
    fn test_verdict_display_matches_wire_name() {
        assert_eq!(Verdict::Go.to_string(), "GO");
        assert_eq!(Verdict::Hold.to_string(), "HOLD");
        assert_eq!(serde_json::to_value(Verdict::Hold).unwrap(), "HOLD");
    }

    #[test]
    fn test_oversized_cost_is_rejected_not_panicking() {
        let mut req = request("10063020");
        req.base_cost = Decimal::MAX;
        req.logistics = Decimal::MAX;
        let err = resolve_incentives(&schedule(), &req).unwrap_err();
        assert!(matches!(err, AgniError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_base_cost_rejected() {
        let mut req = request("10063020");
        req.base_cost = Decimal::ZERO;
        assert!(resolve_incentives(&schedule(), &req).is_err());
    }

    #[test]
    fn test_rates_below_threshold_do_not_warn() {
        let out = resolve_incentives(&schedule(), &request("10063020")).unwrap();
        // 240 / 1000 = 24%, below the 25% threshold
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_schedule_from_yaml() {
        let yaml = r#"
products:
  - hs_code: "10063020"
    description: Basmati Rice
    rodtep_rate: 0.045
    dbk_rate: 0.015
    gst_refund_rate: 0.18
  - hs_code: "93019000"
    description: Military weapons
    sensitivity: HIGH
"#;
        let s = IncentiveSchedule::from_text(yaml, DataFormat::Yaml).unwrap();
        assert_eq!(s.products.len(), 2);
        assert_eq!(s.products[1].sensitivity, Sensitivity::High);
        assert_eq!(s.products[1].rodtep_rate, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_rejects_percentage_rates() {
        let json = r#"{"products":[{"hs_code":"1","description":"x","rodtep_rate":4.5}]}"#;
        let result = IncentiveSchedule::from_text(json, DataFormat::Json);
        assert!(matches!(result, Err(AgniError::InvalidInput { .. })));
    }
}
