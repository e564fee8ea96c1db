//! Incentive amounts expressed as a percentage of base cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AgniError;
use crate::types::Money;
use crate::AgniResult;

/// `amount / base_cost * 100`, guarded against a zero base cost.
pub fn incentive_share(amount: Money, base_cost: Money) -> AgniResult<Decimal> {
    if base_cost.is_zero() {
        return Err(AgniError::DivisionByZero {
            context: "incentive share of base cost".into(),
        });
    }
    Ok(amount / base_cost * Decimal::ONE_HUNDRED)
}

/// Input for a per-scheme share breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveShareInput {
    pub base_cost: Money,
    #[serde(default)]
    pub rodtep_benefit: Money,
    #[serde(default)]
    pub dbk_benefit: Money,
    #[serde(default)]
    pub gst_benefit: Money,
}

/// Percentages of base cost, per scheme and combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveShare {
    pub rodtep_pct: Decimal,
    pub dbk_pct: Decimal,
    pub gst_pct: Decimal,
    pub total_pct: Decimal,
}

pub fn calculate_incentive_share(input: &IncentiveShareInput) -> AgniResult<IncentiveShare> {
    let total = input.rodtep_benefit + input.dbk_benefit + input.gst_benefit;
    Ok(IncentiveShare {
        rodtep_pct: incentive_share(input.rodtep_benefit, input.base_cost)?,
        dbk_pct: incentive_share(input.dbk_benefit, input.base_cost)?,
        gst_pct: incentive_share(input.gst_benefit, input.base_cost)?,
        total_pct: incentive_share(total, input.base_cost)?,
    })
}
