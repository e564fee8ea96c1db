use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AgniError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.15 = 15%). Never as percentages.
pub type Rate = Decimal;

/// Currency code for quotation and conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    AED,
    AUD,
    NZD,
    Other(String),
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::INR => write!(f, "INR"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
            Currency::GBP => write!(f, "GBP"),
            Currency::AED => write!(f, "AED"),
            Currency::AUD => write!(f, "AUD"),
            Currency::NZD => write!(f, "NZD"),
            Currency::Other(code) => write!(f, "{code}"),
        }
    }
}

/// Geographical Indication registration status of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiStatus {
    Registered,
    #[default]
    None,
}

impl fmt::Display for GiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GiStatus::Registered => write!(f, "REGISTERED"),
            GiStatus::None => write!(f, "NONE"),
        }
    }
}

impl FromStr for GiStatus {
    type Err = AgniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGISTERED" => Ok(GiStatus::Registered),
            "NONE" | "" => Ok(GiStatus::None),
            other => Err(AgniError::InvalidInput {
                field: "gi_status".into(),
                reason: format!("Expected REGISTERED or NONE, got '{other}'"),
            }),
        }
    }
}

/// Product category used to decide CBAM applicability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Carbon_Intensive")]
    CarbonIntensive,
    #[default]
    #[serde(rename = "General_Goods")]
    GeneralGoods,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::CarbonIntensive => write!(f, "Carbon_Intensive"),
            ProductCategory::GeneralGoods => write!(f, "General_Goods"),
        }
    }
}

impl FromStr for ProductCategory {
    type Err = AgniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "carbon_intensive" => Ok(ProductCategory::CarbonIntensive),
            "general_goods" => Ok(ProductCategory::GeneralGoods),
            other => Err(AgniError::InvalidInput {
                field: "product_category".into(),
                reason: format!("Expected Carbon_Intensive or General_Goods, got '{other}'"),
            }),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
