//! Advisory response shape, as returned by the profitability endpoint.
//!
//! Only the fields the quote calculator consumes are modelled; unknown
//! fields are ignored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::IncentiveResolution;
use crate::types::Money;

#[cfg(feature = "pricing")]
use crate::pricing::quote::IncentiveAmounts;

/// `metrics` block of an advisory response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryMetrics {
    #[serde(default)]
    pub base_cost: Money,
    #[serde(default)]
    pub logistics: Money,
    #[serde(default)]
    pub rodtep_benefit: Money,
    #[serde(default)]
    pub dbk_benefit: Money,
    #[serde(default)]
    pub gst_benefit: Money,
    #[serde(default)]
    pub net_cost: Money,
    #[serde(default)]
    pub total_incentives: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_status: Option<String>,
}

/// Product insight returned for an HS code lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryInsight {
    pub hs_code: String,
    pub product_name: String,
    pub verdict: String,
    pub metrics: AdvisoryMetrics,
}

impl AdvisoryInsight {
    /// Build the advisory shape from a locally resolved schedule line.
    pub fn from_resolution(r: &IncentiveResolution) -> Self {
        AdvisoryInsight {
            hs_code: r.hs_code.clone(),
            product_name: r.product_name.clone(),
            verdict: r.verdict.to_string(),
            metrics: AdvisoryMetrics {
                base_cost: r.base_cost,
                logistics: r.logistics,
                rodtep_benefit: r.rodtep_benefit,
                dbk_benefit: r.dbk_benefit,
                gst_benefit: r.gst_benefit,
                net_cost: r.competitive_fob,
                total_incentives: r.total_incentives,
                compliance_status: Some(r.compliance_status.clone()),
            },
        }
    }

    /// Sum of the per-scheme benefits, ignoring the reported total.
    pub fn benefit_sum(&self) -> Money {
        self.metrics.rodtep_benefit + self.metrics.dbk_benefit + self.metrics.gst_benefit
    }

    /// True when the reported total disagrees with the per-scheme amounts.
    pub fn total_mismatch(&self) -> bool {
        (self.benefit_sum() - self.metrics.total_incentives).abs() > Decimal::new(1, 2)
    }

    /// Per-scheme amounts for the quote calculator.
    #[cfg(feature = "pricing")]
    pub fn incentive_amounts(&self) -> IncentiveAmounts {
        IncentiveAmounts {
            rodtep: self.metrics.rodtep_benefit,
            dbk: self.metrics.dbk_benefit,
            gst: self.metrics.gst_benefit,
        }
    }
}
