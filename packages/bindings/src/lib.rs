use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use agni_pricing_core::resource::DataFormat;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_quote(input_json: String) -> NapiResult<String> {
    let input: agni_pricing_core::pricing::quote::PricingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        agni_pricing_core::pricing::quote::compute_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_quote(input_json: String) -> NapiResult<String> {
    let input: agni_pricing_core::pricing::quote::PricingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        agni_pricing_core::pricing::quote::analyze_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quote_breakdown(input_json: String) -> NapiResult<String> {
    let input: agni_pricing_core::pricing::quote::PricingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        agni_pricing_core::pricing::quote::compute_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output.line_items()).map_err(to_napi_error)
}

#[napi]
pub fn parse_deep_link(query: String) -> NapiResult<String> {
    let seed = agni_pricing_core::deep_link::seed::DeepLinkSeed::parse(&query)
        .map_err(to_napi_error)?;
    serde_json::to_string(&seed).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Incentives & regulatory
// ---------------------------------------------------------------------------

#[napi]
pub fn resolve_incentives(schedule_json: String, request_json: String) -> NapiResult<String> {
    let schedule = agni_pricing_core::incentives::schedule::IncentiveSchedule::from_text(
        &schedule_json,
        DataFormat::Json,
    )
    .map_err(to_napi_error)?;
    let request: agni_pricing_core::incentives::schedule::ResolveRequest =
        serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let output = agni_pricing_core::incentives::schedule::resolve_incentives(&schedule, &request)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn incentive_share(input_json: String) -> NapiResult<String> {
    let input: agni_pricing_core::incentives::share::IncentiveShareInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = agni_pricing_core::incentives::share::calculate_incentive_share(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn cbam_rate(matrix_json: String) -> NapiResult<String> {
    let matrix = agni_pricing_core::regulatory::matrix::RegulatoryMatrix::from_text(
        &matrix_json,
        DataFormat::Json,
    )
    .map_err(to_napi_error)?;
    let output = matrix.cbam_rate_output().map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// FTA & quotation
// ---------------------------------------------------------------------------

#[napi]
pub fn fta_savings(input_json: String) -> NapiResult<String> {
    let input: agni_pricing_core::fta::savings::FtaSavingsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = agni_pricing_core::fta::savings::fta_savings(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn fta_markets(shipment_value: String) -> NapiResult<String> {
    let value = Decimal::from_str(&shipment_value).map_err(to_napi_error)?;
    let output = agni_pricing_core::fta::savings::rank_fta_markets(value).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_proforma(input_json: String) -> NapiResult<String> {
    let input: agni_pricing_core::proforma::quotation::ProformaInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = agni_pricing_core::proforma::quotation::build_proforma(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
