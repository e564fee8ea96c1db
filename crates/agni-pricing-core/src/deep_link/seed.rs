//! Seeding a quote from deep-link query parameters.
//!
//! Links from the sourcing terminal carry `hs_code`, `base_cost`,
//! `product_name` and `gi_status`. A leading `?` and unknown keys are
//! ignored; the last occurrence of a repeated key wins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::form_urlencoded;

use crate::error::AgniError;
use crate::pricing::quote::PricingInput;
use crate::types::{GiStatus, Money};
use crate::AgniResult;

/// Values recovered from a deep link. Absent parameters stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkSeed {
    pub hs_code: Option<String>,
    pub base_cost: Option<Money>,
    pub product_name: Option<String>,
    pub gi_status: Option<GiStatus>,
}

impl DeepLinkSeed {
    /// Parse a URL query string such as `?hs_code=091030&base_cost=9000`.
    pub fn parse(query: &str) -> AgniResult<Self> {
        let query = query.trim().trim_start_matches('?');
        let mut seed = DeepLinkSeed::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            match &*key {
                "hs_code" | "hscode" if !value.is_empty() => {
                    seed.hs_code = Some(value.to_string());
                }
                "product_name" if !value.is_empty() => {
                    seed.product_name = Some(value.to_string());
                }
                "base_cost" if !value.is_empty() => {
                    let cost = Decimal::from_str(value).map_err(|_| AgniError::InvalidInput {
                        field: "base_cost".into(),
                        reason: format!("'{value}' is not a number"),
                    })?;
                    seed.base_cost = Some(cost);
                }
                "gi_status" if !value.is_empty() => {
                    seed.gi_status = Some(GiStatus::from_str(value)?);
                }
                _ => {}
            }
        }

        Ok(seed)
    }

    /// Override the matching fields of a pricing input.
    pub fn apply(&self, input: &mut PricingInput) {
        if let Some(cost) = self.base_cost {
            input.base_cost = cost;
        }
        if let Some(status) = self.gi_status {
            input.gi_status = status;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &DeepLinkSeed::default()
    }
}
