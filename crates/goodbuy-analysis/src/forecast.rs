//! Forecaster: forward revenue/profit projection with scenario bands.
//!
//! Projects the most recent statement over a month horizon using a compound
//! monthly growth assumption. The growth rate comes from the last two
//! periods of history when available, else from a supplied prior-period
//! revenue, else from the policy's industry-neutral default. Confidence is
//! a bounded heuristic over data depth and completeness, clamped to the
//! policy's [20, 95] band: some information is always assumed, and no
//! forecast is ever certain.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::policy::ScoringPolicy;
use crate::statement::FinancialStatement;
use crate::types::{Money, Rate, Score};

/// Horizon applied when the caller does not request one.
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One projection band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioBand {
    pub revenue: Money,
    pub profit: Money,
}

/// Optimistic / realistic / pessimistic bands around the base projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub optimistic: ScenarioBand,
    pub realistic: ScenarioBand,
    pub pessimistic: ScenarioBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub horizon_months: u32,
    pub projected_revenue: Money,
    pub projected_profit: Money,
    /// Always within the policy's confidence bounds, [20, 95] by default.
    pub confidence: Score,
    pub scenarios: ScenarioAnalysis,
    /// Human-readable basis for the projection. Never empty.
    pub assumptions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_percent(rate: Rate) -> Decimal {
    (rate * dec!(100)).round_dp(1).normalize()
}

/// Annual growth assumption and the assumption text explaining it.
fn growth_assumption(
    latest: &FinancialStatement,
    history: &[FinancialStatement],
    policy: &ScoringPolicy,
) -> (Rate, String) {
    if history.len() >= 2 {
        let previous = &history[history.len() - 2];
        if previous.revenue > Decimal::ZERO {
            let g = (latest.revenue - previous.revenue) / previous.revenue;
            let clamped = g.clamp(policy.min_annual_growth, policy.max_annual_growth);
            return (
                clamped,
                format!(
                    "Based on historical revenue growth of {}% per year",
                    as_percent(clamped)
                ),
            );
        }
    }
    if let Some(prior) = latest.prior_revenue {
        if prior > Decimal::ZERO {
            let g = (latest.revenue - prior) / prior;
            let clamped = g.clamp(policy.min_annual_growth, policy.max_annual_growth);
            return (
                clamped,
                format!(
                    "Based on year-over-year revenue growth of {}%",
                    as_percent(clamped)
                ),
            );
        }
    }
    (
        policy.default_annual_growth,
        format!(
            "Using industry-average growth assumption of {}% per year",
            as_percent(policy.default_annual_growth)
        ),
    )
}

fn confidence(
    latest: &FinancialStatement,
    history: &[FinancialStatement],
    policy: &ScoringPolicy,
) -> Score {
    let mut c = policy.confidence_base;

    if history.len() >= 2 {
        c += dec!(15);
        let extra = Decimal::from(history.len() - 2) * dec!(5);
        c += extra.min(dec!(15));
    }
    if latest.total_assets > Decimal::ZERO && latest.gross_profit > Decimal::ZERO {
        c += dec!(10);
    }
    if latest.revenue == Decimal::ZERO {
        c -= dec!(20);
    }

    c.clamp(policy.confidence_min, policy.confidence_max)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project `latest` forward by `horizon_months` under the default policy.
/// `history` is the full session (oldest first, may be empty or include
/// `latest` as its last entry).
pub fn project(
    latest: &FinancialStatement,
    history: &[FinancialStatement],
    horizon_months: u32,
) -> Forecast {
    project_with_policy(latest, history, horizon_months, &ScoringPolicy::default())
}

pub fn project_with_policy(
    latest: &FinancialStatement,
    history: &[FinancialStatement],
    horizon_months: u32,
    policy: &ScoringPolicy,
) -> Forecast {
    let (annual_growth, growth_basis) = growth_assumption(latest, history, policy);

    let monthly_rate = annual_growth / MONTHS_PER_YEAR;
    let factor = (Decimal::ONE + monthly_rate).powi(i64::from(horizon_months));

    let projected_revenue = latest.revenue * factor;
    let projected_profit = latest.net_income * factor;

    let up = Decimal::ONE + policy.optimistic_spread;
    let down = Decimal::ONE - policy.pessimistic_spread;
    let scenarios = ScenarioAnalysis {
        optimistic: ScenarioBand {
            revenue: projected_revenue * up,
            profit: projected_profit * up,
        },
        realistic: ScenarioBand {
            revenue: projected_revenue,
            profit: projected_profit,
        },
        pessimistic: ScenarioBand {
            revenue: projected_revenue * down,
            profit: projected_profit * down,
        },
    };

    let assumptions = vec![
        growth_basis,
        format!("Projection horizon of {horizon_months} months"),
        format!(
            "Optimistic and pessimistic scenarios at +{}%/-{}% of the realistic projection",
            as_percent(policy.optimistic_spread),
            as_percent(policy.pessimistic_spread)
        ),
    ];

    Forecast {
        horizon_months,
        projected_revenue,
        projected_profit,
        confidence: confidence(latest, history, policy),
        scenarios,
        assumptions,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
