use napi::Result as NapiResult;
use napi_derive::napi;

use goodbuy_analysis::statement::{AnalysisSession, FinancialStatement, RawBusinessRecord};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Input carrying a chronological statement history (most recent last).
#[derive(serde::Deserialize)]
struct HistoryInput {
    statements: Vec<RawBusinessRecord>,
}

fn session_from(input_json: &str) -> NapiResult<AnalysisSession> {
    let input: HistoryInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let mut session = AnalysisSession::new();
    for record in &input.statements {
        session.import(record);
    }
    Ok(session)
}

// ---------------------------------------------------------------------------
// Single-statement operations
// ---------------------------------------------------------------------------

#[napi]
pub fn build_statement(input_json: String) -> NapiResult<String> {
    let raw: RawBusinessRecord = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (statement, warnings) = goodbuy_analysis::statement::build_statement(&raw);
    serde_json::to_string(&serde_json::json!({
        "statement": statement,
        "warnings": warnings,
    }))
    .map_err(to_napi_error)
}

#[napi]
pub fn compute_ratios(input_json: String) -> NapiResult<String> {
    let statement: FinancialStatement =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let ratios = goodbuy_analysis::ratios::compute_ratios(&statement);
    serde_json::to_string(&ratios).map_err(to_napi_error)
}

#[napi]
pub fn score_health(input_json: String) -> NapiResult<String> {
    let ratios: goodbuy_analysis::ratios::FinancialRatios =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let score = goodbuy_analysis::health::score_health(&ratios);
    serde_json::to_string(&score).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// History-aware operations
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_cash_flow(input_json: String) -> NapiResult<String> {
    let session = session_from(&input_json)?;
    let statement = session
        .latest()
        .ok_or_else(|| napi::Error::from_reason("At least one statement is required"))?;
    let analysis =
        goodbuy_analysis::cash_flow::analyze_cash_flow(statement, session.statements());
    serde_json::to_string(&analysis).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct TrendBindingInput {
    statements: Vec<RawBusinessRecord>,
    metric: goodbuy_analysis::trend::TrendMetric,
}

#[napi]
pub fn analyze_trend(input_json: String) -> NapiResult<String> {
    let input: TrendBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut session = AnalysisSession::new();
    for record in &input.statements {
        session.import(record);
    }
    let trend = goodbuy_analysis::trend::analyze_trend(session.statements(), input.metric)
        .map_err(to_napi_error)?;
    serde_json::to_string(&trend).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ForecastBindingInput {
    statements: Vec<RawBusinessRecord>,
    horizon_months: Option<u32>,
}

#[napi]
pub fn project_forecast(input_json: String) -> NapiResult<String> {
    let input: ForecastBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut session = AnalysisSession::new();
    for record in &input.statements {
        session.import(record);
    }
    let latest = session
        .latest()
        .ok_or_else(|| napi::Error::from_reason("At least one statement is required"))?;
    let forecast = goodbuy_analysis::forecast::project(
        latest,
        session.statements(),
        input
            .horizon_months
            .unwrap_or(goodbuy_analysis::forecast::DEFAULT_HORIZON_MONTHS),
    );
    serde_json::to_string(&forecast).map_err(to_napi_error)
}

#[napi]
pub fn build_report(input_json: String) -> NapiResult<String> {
    let session = session_from(&input_json)?;
    let report = goodbuy_analysis::report::build_report(&session).map_err(to_napi_error)?;
    serde_json::to_string(&report).map_err(to_napi_error)
}
