//! Export quote calculation.
//!
//! Covers:
//! 1. **Total incentives** -- RoDTEP + Drawback + GST refund, as absolute amounts.
//! 2. **Net cost** -- base cost + logistics - total incentives (no clamping).
//! 3. **Margin** -- net cost x margin rate.
//! 4. **GI premium** -- 20% of net cost for GI-registered products.
//! 5. **Carbon cost** -- base cost x CBAM rate for carbon-intensive goods
//!    shipped into the EU zone.
//! 6. **Final quote** -- net cost + margin + GI premium + carbon cost.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::eu_zone::cbam_applies;
use crate::error::AgniError;
use crate::types::{with_metadata, ComputationOutput, GiStatus, Money, ProductCategory, Rate};
use crate::AgniResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Recommended margin on net cost.
pub const DEFAULT_MARGIN_RATE: Rate = dec!(0.15);

/// Brand premium on net cost for GI-registered products.
pub const GI_PREMIUM_RATE: Rate = dec!(0.20);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Policy benefit amounts, in the same currency unit as the base cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveAmounts {
    /// Remission of Duties and Taxes on Exported Products.
    #[serde(default)]
    pub rodtep: Money,
    /// Duty drawback.
    #[serde(default)]
    pub dbk: Money,
    /// GST refund realization.
    #[serde(default)]
    pub gst: Money,
}

impl IncentiveAmounts {
    /// Sum of the three benefits, `None` on decimal overflow.
    pub fn total(&self) -> Option<Money> {
        self.rodtep.checked_add(self.dbk)?.checked_add(self.gst)
    }
}

/// Input for a single quote recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Unit FOB cost. Must be positive.
    pub base_cost: Money,
    /// Freight and logistics addend.
    #[serde(default)]
    pub logistics: Money,
    /// Absolute benefit amounts resolved upstream per HS code.
    #[serde(default)]
    pub incentive_rates: IncentiveAmounts,
    /// Fractional margin applied to net cost.
    #[serde(default = "default_margin_rate")]
    pub margin_rate: Rate,
    #[serde(default)]
    pub gi_status: GiStatus,
    /// Destination country name.
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub product_category: ProductCategory,
    /// Fractional CBAM surcharge rate from the regulatory matrix.
    #[serde(default)]
    pub cbam_rate: Rate,
}

fn default_margin_rate() -> Rate {
    DEFAULT_MARGIN_RATE
}

impl PricingInput {
    /// A plain quote with no incentives, GI premium or carbon exposure.
    pub fn new(base_cost: Money, logistics: Money) -> Self {
        PricingInput {
            base_cost,
            logistics,
            incentive_rates: IncentiveAmounts::default(),
            margin_rate: DEFAULT_MARGIN_RATE,
            gi_status: GiStatus::None,
            destination: String::new(),
            product_category: ProductCategory::GeneralGoods,
            cbam_rate: Decimal::ZERO,
        }
    }
}

/// Derived quote figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub total_incentives: Money,
    pub net_cost: Money,
    pub margin: Money,
    pub gi_premium: Money,
    pub carbon_cost: Money,
    pub final_quote: Money,
}

/// One displayable line of a quote breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Money,
}

impl PricingResult {
    /// Breakdown lines for display. Optional terms that do not apply are
    /// left out so every view renders from the same figures.
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut items = vec![
            LineItem {
                label: "Govt. incentives (RoDTEP/DBK/GST)".into(),
                amount: -self.total_incentives,
            },
            LineItem {
                label: "Net cost".into(),
                amount: self.net_cost,
            },
            LineItem {
                label: "Recommended margin".into(),
                amount: self.margin,
            },
        ];
        if !self.gi_premium.is_zero() {
            items.push(LineItem {
                label: "GI brand premium".into(),
                amount: self.gi_premium,
            });
        }
        if !self.carbon_cost.is_zero() {
            items.push(LineItem {
                label: "CBAM carbon cost".into(),
                amount: self.carbon_cost,
            });
        }
        items.push(LineItem {
            label: "Final quote".into(),
            amount: self.final_quote,
        });
        items
    }
}

// ---------------------------------------------------------------------------
// Core calculation
// ---------------------------------------------------------------------------

/// Compute a quote from cost, incentives and the optional GI / CBAM terms.
///
/// Pure and deterministic: the same input always produces the same result.
pub fn compute_quote(input: &PricingInput) -> AgniResult<PricingResult> {
    validate_pricing_input(input)?;
    let applies = cbam_applies(&input.destination, input.product_category);

    let total_incentives = input
        .incentive_rates
        .total()
        .ok_or_else(|| out_of_range("incentive_rates"))?;
    let net_cost = input
        .base_cost
        .checked_add(input.logistics)
        .and_then(|gross| gross.checked_sub(total_incentives))
        .ok_or_else(|| out_of_range("net_cost"))?;
    let margin = net_cost
        .checked_mul(input.margin_rate)
        .ok_or_else(|| out_of_range("margin_rate"))?;

    let gi_premium = match input.gi_status {
        GiStatus::Registered => net_cost
            .checked_mul(GI_PREMIUM_RATE)
            .ok_or_else(|| out_of_range("gi_premium"))?,
        GiStatus::None => Decimal::ZERO,
    };

    let carbon_cost = if applies {
        input
            .base_cost
            .checked_mul(input.cbam_rate)
            .ok_or_else(|| out_of_range("cbam_rate"))?
    } else {
        Decimal::ZERO
    };

    let final_quote = [margin, gi_premium, carbon_cost]
        .into_iter()
        .try_fold(net_cost, |acc, term| acc.checked_add(term))
        .ok_or_else(|| out_of_range("final_quote"))?;

    Ok(PricingResult {
        total_incentives,
        net_cost,
        margin,
        gi_premium,
        carbon_cost,
        final_quote,
    })
}

/// Compute a quote and wrap it in the standard envelope with
/// reasonableness warnings.
pub fn analyze_quote(input: &PricingInput) -> AgniResult<ComputationOutput<PricingResult>> {
    let start = Instant::now();
    let result = compute_quote(input)?;
    let mut warnings: Vec<String> = Vec::new();

    if result.total_incentives > input.base_cost {
        warnings.push(format!(
            "Total incentives ({}) exceed base cost ({}); verify benefit amounts",
            result.total_incentives, input.base_cost
        ));
    }
    if result.net_cost < Decimal::ZERO {
        warnings.push(format!(
            "Net cost is negative ({}); incentives outweigh cost and logistics",
            result.net_cost
        ));
    }
    if result.final_quote < Decimal::ZERO {
        warnings.push(format!(
            "Final quote is negative ({}); not a quotable price",
            result.final_quote
        ));
    }
    if input.margin_rate > dec!(0.50) {
        warnings.push(format!(
            "Margin rate ({}) exceeds 50%; quote may be uncompetitive",
            input.margin_rate
        ));
    }
    if !input.cbam_rate.is_zero()
        && !cbam_applies(&input.destination, input.product_category)
    {
        warnings.push(format!(
            "CBAM rate supplied but not applicable for {} goods to '{}'",
            input.product_category, input.destination
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Export quote: cost + logistics - incentives, margin, GI premium, CBAM",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn out_of_range(field: &str) -> AgniError {
    AgniError::InvalidInput {
        field: field.into(),
        reason: "Value exceeds the representable decimal range".into(),
    }
}

fn validate_pricing_input(input: &PricingInput) -> AgniResult<()> {
    if input.base_cost <= Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "base_cost".into(),
            reason: "Base cost must be positive".into(),
        });
    }
    if input.logistics < Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "logistics".into(),
            reason: "Logistics cost cannot be negative".into(),
        });
    }
    let incentives = [
        ("incentive_rates.rodtep", input.incentive_rates.rodtep),
        ("incentive_rates.dbk", input.incentive_rates.dbk),
        ("incentive_rates.gst", input.incentive_rates.gst),
    ];
    for (field, amount) in incentives {
        if amount < Decimal::ZERO {
            return Err(AgniError::InvalidInput {
                field: field.into(),
                reason: "Incentive amount cannot be negative".into(),
            });
        }
    }
    if input.margin_rate < Decimal::ZERO {
        return Err(AgniError::InvalidInput {
            field: "margin_rate".into(),
            reason: "Margin rate cannot be negative".into(),
        });
    }
    // The rate is only read when the surcharge applies.
    let applies = cbam_applies(&input.destination, input.product_category);
    if applies && (input.cbam_rate < Decimal::ZERO || input.cbam_rate > Decimal::ONE) {
        return Err(AgniError::InvalidInput {
            field: "cbam_rate".into(),
            reason: "CBAM rate must be between 0 and 1".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
