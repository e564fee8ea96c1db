use clap::Args;
use serde_json::Value;

use agni_pricing_core::regulatory::matrix::RegulatoryMatrix;
use agni_pricing_core::resource::DataFormat;

use crate::input;

/// Arguments for reading the CBAM rate from a regulatory matrix
#[derive(Args)]
pub struct CbamRateArgs {
    /// Regulatory matrix file (JSON or YAML)
    #[arg(long)]
    pub matrix: String,

    /// Look up another constant by key instead
    #[arg(long)]
    pub key: Option<String>,
}

pub fn run_cbam_rate(args: CbamRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let text = input::file::read_text(&args.matrix)?;
    let matrix = RegulatoryMatrix::from_text(&text, DataFormat::from_path(&args.matrix))?;

    if let Some(ref key) = args.key {
        let value = matrix
            .get(key)
            .ok_or_else(|| format!("Key '{}' not found in {}", key, args.matrix))?;
        return Ok(serde_json::json!({ "key": key, "value": value }));
    }

    Ok(serde_json::to_value(matrix.cbam_rate_output()?)?)
}
