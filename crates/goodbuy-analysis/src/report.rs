//! Report assembler: the full analysis bundle for one business.
//!
//! Composes the latest statement with its ratios, health score, cash-flow
//! analysis, default-horizon forecast, and every available trend. Trend
//! analysis needs two periods; with fewer the report carries an empty trend
//! list rather than failing, deliberately unlike a direct
//! [`crate::trend::analyze_trend`] call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cash_flow::{analyze_cash_flow_with_policy, CashFlowAnalysis};
use crate::error::AnalysisError;
use crate::forecast::{project_with_policy, Forecast, DEFAULT_HORIZON_MONTHS};
use crate::health::{score_health_with_policy, HealthScore};
use crate::policy::ScoringPolicy;
use crate::ratios::{compute_ratios, FinancialRatios};
use crate::statement::{AnalysisSession, FinancialStatement};
use crate::trend::{analyze_trend_with_policy, TrendAnalysis, TrendMetric};
use crate::AnalysisResult;

/// Complete analysis of the most recent statement in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub statement: FinancialStatement,
    pub ratios: FinancialRatios,
    pub health_score: HealthScore,
    pub cash_flow: CashFlowAnalysis,
    pub forecast: Forecast,
    /// One entry per metric; empty when fewer than two periods exist.
    pub trends: Vec<TrendAnalysis>,
    /// Advisory warnings accumulated while importing statements.
    pub warnings: Vec<String>,
    pub engine_version: String,
    pub generated_at: DateTime<Utc>,
}

/// Assemble a report for `session` under the default policy and horizon.
/// Fails only when the session holds no statements at all.
pub fn build_report(session: &AnalysisSession) -> AnalysisResult<AnalysisReport> {
    build_report_with_policy(session, &ScoringPolicy::default())
}

pub fn build_report_with_policy(
    session: &AnalysisSession,
    policy: &ScoringPolicy,
) -> AnalysisResult<AnalysisReport> {
    let statement = session
        .latest()
        .ok_or_else(|| AnalysisError::InvalidInput {
            field: "statements".into(),
            reason: "At least one statement is required".into(),
        })?
        .clone();

    let ratios = compute_ratios(&statement);
    let health_score = score_health_with_policy(&ratios, policy);
    let cash_flow = analyze_cash_flow_with_policy(&statement, session.statements(), policy);
    let forecast = project_with_policy(
        &statement,
        session.statements(),
        DEFAULT_HORIZON_MONTHS,
        policy,
    );

    // With two or more periods every metric succeeds; with fewer, an empty
    // list is the contract.
    let trends = if session.len() >= 2 {
        TrendMetric::ALL
            .iter()
            .filter_map(|m| analyze_trend_with_policy(session.statements(), *m, policy).ok())
            .collect()
    } else {
        Vec::new()
    };

    Ok(AnalysisReport {
        statement,
        ratios,
        health_score,
        cash_flow,
        forecast,
        trends,
        warnings: session.warnings().to_vec(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: Utc::now(),
    })
}

// ===========================================================================
// Tests
// ===========================================================================
