use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use mortgage_core::compare::CompareInput;
use mortgage_core::loan::LoanInput;
use mortgage_core::presets::Preset;
use mortgage_core::schedule::MortgageOutput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Unvalidated engine call; never fails on range problems.
#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::schedule::calculate_mortgage(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::schedule::analyze_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// PMI
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PmiRequest {
    loan_amount: Decimal,
    home_price: Decimal,
}

#[napi]
pub fn estimate_pmi(input_json: String) -> NapiResult<String> {
    let req: PmiRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let premium = mortgage_core::pmi::estimate_pmi(req.loan_amount, req.home_price);
    serde_json::to_string(&premium).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// Takes a `MortgageOutput` as produced by `calculateMortgage`.
#[napi]
pub fn yearly_schedule(output_json: String) -> NapiResult<String> {
    let output: MortgageOutput = serde_json::from_str(&output_json).map_err(to_napi_error)?;
    let rows = mortgage_core::reporting::yearly_schedule(&output.amortization_schedule);
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn balance_chart(output_json: String) -> NapiResult<String> {
    let output: MortgageOutput = serde_json::from_str(&output_json).map_err(to_napi_error)?;
    let points = mortgage_core::reporting::balance_chart(&output.amortization_schedule);
    serde_json::to_string(&points).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let input: CompareInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::compare::analyze_comparison(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PresetRequest {
    input: LoanInput,
    preset: Preset,
}

#[napi]
pub fn apply_preset(input_json: String) -> NapiResult<String> {
    let req: PresetRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let adjusted = mortgage_core::presets::apply_preset(&req.input, req.preset);
    serde_json::to_string(&adjusted).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PmiModeRequest {
    input: LoanInput,
    mode: mortgage_core::pmi::PmiMode,
}

/// Returns the loan input with `pmi` re-estimated (auto) or pinned (manual).
#[napi]
pub fn apply_pmi_mode(input_json: String) -> NapiResult<String> {
    let req: PmiModeRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&req.input.with_pmi_mode(req.mode)).map_err(to_napi_error)
}
