//! Regulatory constants matrix.
//!
//! The matrix is a static resource keyed by constant name. The only key the
//! quote calculator needs is `cbam_tax_rate_percent`, which despite its name
//! holds a fractional rate (0.085 = 8.5%). Other keys are kept verbatim and
//! can be looked up by name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AgniError;
use crate::resource::{parse_resource, DataFormat};
use crate::types::Rate;
use crate::AgniResult;

/// Parsed regulatory matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryMatrix {
    /// CBAM surcharge as a fraction of base cost.
    pub cbam_tax_rate_percent: Rate,
    /// Remaining constants, untouched.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// Resolved CBAM rate, as reported by `agni cbam-rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CbamRateOutput {
    pub cbam_rate: Rate,
    pub cbam_rate_pct: Decimal,
}

impl RegulatoryMatrix {
    pub fn from_text(text: &str, format: DataFormat) -> AgniResult<Self> {
        parse_resource(text, format)
    }

    /// The CBAM rate, checked to be a fraction in [0, 1].
    pub fn cbam_rate(&self) -> AgniResult<Rate> {
        let rate = self.cbam_tax_rate_percent;
        if rate < Decimal::ZERO {
            return Err(AgniError::ConfigError(
                "cbam_tax_rate_percent cannot be negative".into(),
            ));
        }
        if rate > Decimal::ONE {
            return Err(AgniError::ConfigError(format!(
                "cbam_tax_rate_percent must be a fraction (0.085 = 8.5%), got {rate}"
            )));
        }
        Ok(rate)
    }

    /// Look up any constant by key.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        if key == "cbam_tax_rate_percent" {
            return serde_json::to_value(self.cbam_tax_rate_percent).ok();
        }
        self.other.get(key).cloned()
    }

    pub fn cbam_rate_output(&self) -> AgniResult<CbamRateOutput> {
        let cbam_rate = self.cbam_rate()?;
        Ok(CbamRateOutput {
            cbam_rate,
            cbam_rate_pct: cbam_rate * Decimal::ONE_HUNDRED,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MATRIX_JSON: &str = r#"{
        "cbam_tax_rate_percent": 0.085,
        "icegate_schema_version": "1.6",
        "rodtep_cap_pct": 4.3
    }"#;

    #[test]
    fn test_parse_json_matrix() {
        let m = RegulatoryMatrix::from_text(MATRIX_JSON, DataFormat::Json).unwrap();
        assert_eq!(m.cbam_rate().unwrap(), dec!(0.085));
        assert_eq!(m.other.len(), 2);
    }

    #[test]
    fn test_parse_yaml_matrix() {
        let yaml = "cbam_tax_rate_percent: 0.085\nicegate_schema_version: \"1.6\"\n";
        let m = RegulatoryMatrix::from_text(yaml, DataFormat::Yaml).unwrap();
        assert_eq!(m.cbam_rate().unwrap(), dec!(0.085));
        assert_eq!(
            m.get("icegate_schema_version"),
            Some(serde_json::Value::String("1.6".into()))
        );
    }

    #[test]
    fn test_missing_cbam_key_rejected() {
        let result = RegulatoryMatrix::from_text(r#"{"other": 1}"#, DataFormat::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_percentage_value_rejected() {
        let m = RegulatoryMatrix::from_text(r#"{"cbam_tax_rate_percent": 8.5}"#, DataFormat::Json)
            .unwrap();
        assert!(matches!(m.cbam_rate(), Err(AgniError::ConfigError(_))));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let m = RegulatoryMatrix::from_text(r#"{"cbam_tax_rate_percent": -0.1}"#, DataFormat::Json)
            .unwrap();
        assert!(m.cbam_rate().is_err());
    }

    #[test]
    fn test_rate_output_in_percent() {
        let m = RegulatoryMatrix::from_text(MATRIX_JSON, DataFormat::Json).unwrap();
        let out = m.cbam_rate_output().unwrap();
        assert_eq!(out.cbam_rate_pct, dec!(8.5));
    }

    #[test]
    fn test_unknown_key_lookup() {
        let m = RegulatoryMatrix::from_text(MATRIX_JSON, DataFormat::Json).unwrap();
        assert!(m.get("does_not_exist").is_none());
        assert!(m.get("cbam_tax_rate_percent").is_some());
    }
}
