use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use loan_calc_core::amortisation::{emi, schedule, LoanInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Strict: invalid input throws in JavaScript
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_amortisation_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_amortisation_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Fail-soft: form text in, `{"emi": null, "rows": []}` for anything invalid
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedule(principal: String, annual_rate_pct: String, term_years: String) -> NapiResult<String> {
    let parse = |s: &str| Decimal::from_str(s.trim()).ok();
    let result = match (parse(&principal), parse(&annual_rate_pct), parse(&term_years)) {
        (Some(p), Some(r), Some(y)) => schedule::compute_schedule(p, r, y),
        _ => schedule::AmortisationSchedule::empty(),
    };
    serde_json::to_string(&result).map_err(to_napi_error)
}
