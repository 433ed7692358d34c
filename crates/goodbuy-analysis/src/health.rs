//! Health scorer: ratios to a weighted 0-100 score, risk tier, and
//! qualitative read-out.
//!
//! Each of the five categories (profitability, liquidity, efficiency,
//! leverage, growth) is scored 0-100 by linear interpolation between a
//! floor and a ceiling on its underlying ratios. The overall score is the
//! policy-weighted combination, clamped to [0, 100], and the risk tier
//! falls out of the policy's cut points. Strengths, weaknesses, and
//! recommendations are canned statements triggered by category thresholds,
//! with data-quality advisories folded into the weaknesses.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::ScoringPolicy;
use crate::ratios::FinancialRatios;
use crate::types::Score;

// ---------------------------------------------------------------------------
// Scoring bands
// ---------------------------------------------------------------------------

// Interpolation bands per ratio: at or below the floor scores 0, at or above
// the ceiling scores 100. Calibrated for owner-operated small businesses,
// which run higher margins and lighter balance sheets than listed companies.
const GROSS_MARGIN_BAND: (Decimal, Decimal) = (dec!(0.10), dec!(0.60));
const NET_MARGIN_BAND: (Decimal, Decimal) = (dec!(0.00), dec!(0.25));
const ROA_BAND: (Decimal, Decimal) = (dec!(0.00), dec!(0.20));
const CURRENT_RATIO_BAND: (Decimal, Decimal) = (dec!(0.50), dec!(2.00));
const QUICK_RATIO_BAND: (Decimal, Decimal) = (dec!(0.30), dec!(1.50));
const CASH_RATIO_BAND: (Decimal, Decimal) = (dec!(0.05), dec!(0.75));
const ASSET_TURNOVER_BAND: (Decimal, Decimal) = (dec!(0.20), dec!(2.00));
const DEBT_RATIO_BAND: (Decimal, Decimal) = (dec!(0.30), dec!(0.90));
const REVENUE_GROWTH_BAND: (Decimal, Decimal) = (dec!(-0.10), dec!(0.30));

/// Score assigned to the growth category when no prior period exists.
const NEUTRAL_GROWTH_SCORE: Decimal = dec!(50);

/// Gross margins above this trigger a data-quality advisory.
const GROSS_MARGIN_PLAUSIBILITY_CAP: Decimal = dec!(0.95);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Risk tier derived from the overall score. Ordered from safest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// Per-category scores, each 0-100. All five keys are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScores {
    pub profitability: Score,
    pub liquidity: Score,
    pub efficiency: Score,
    pub leverage: Score,
    pub growth: Score,
}

/// Aggregate health assessment for one set of ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScore {
    /// Weighted overall score, always in [0, 100].
    pub overall_score: Score,
    pub category_scores: CategoryScores,
    pub risk_level: RiskLevel,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Linear interpolation between a floor (scores 0) and a ceiling (scores 100).
fn band_score(value: Decimal, (floor, ceiling): (Decimal, Decimal)) -> Score {
    if value <= floor {
        Decimal::ZERO
    } else if value >= ceiling {
        dec!(100)
    } else {
        (value - floor) / (ceiling - floor) * dec!(100)
    }
}

fn mean3(a: Decimal, b: Decimal, c: Decimal) -> Decimal {
    (a + b + c) / dec!(3)
}

fn clamp_score(value: Decimal) -> Score {
    value.clamp(Decimal::ZERO, dec!(100))
}

fn risk_level(score: Score, policy: &ScoringPolicy) -> RiskLevel {
    if score >= policy.risk_low_floor {
        RiskLevel::Low
    } else if score >= policy.risk_medium_floor {
        RiskLevel::Medium
    } else if score >= policy.risk_high_floor {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

// ---------------------------------------------------------------------------
// Category scoring
// ---------------------------------------------------------------------------

fn score_profitability(r: &FinancialRatios) -> Score {
    mean3(
        band_score(r.gross_profit_margin, GROSS_MARGIN_BAND),
        band_score(r.net_profit_margin, NET_MARGIN_BAND),
        band_score(r.return_on_assets, ROA_BAND),
    )
}

fn score_liquidity(r: &FinancialRatios) -> Score {
    mean3(
        band_score(r.current_ratio, CURRENT_RATIO_BAND),
        band_score(r.quick_ratio, QUICK_RATIO_BAND),
        band_score(r.cash_ratio, CASH_RATIO_BAND),
    )
}

fn score_efficiency(r: &FinancialRatios) -> Score {
    band_score(r.asset_turnover, ASSET_TURNOVER_BAND)
}

/// Lower debt scores higher; a debt ratio past the ceiling scores 0.
fn score_leverage(r: &FinancialRatios) -> Score {
    dec!(100) - band_score(r.debt_ratio, DEBT_RATIO_BAND)
}

fn score_growth(r: &FinancialRatios) -> Score {
    match r.revenue_growth {
        Some(g) => band_score(g, REVENUE_GROWTH_BAND),
        None => NEUTRAL_GROWTH_SCORE,
    }
}

// ---------------------------------------------------------------------------
// Qualitative statements
// ---------------------------------------------------------------------------

struct CategoryReadout {
    strength: &'static str,
    weakness: &'static str,
    recommendation: &'static str,
}

const READOUTS: [CategoryReadout; 5] = [
    CategoryReadout {
        strength: "Strong profit margins relative to revenue",
        weakness: "Thin or negative profit margins",
        recommendation: "Review pricing and cost of goods sold to restore margins",
    },
    CategoryReadout {
        strength: "Healthy liquidity buffer against short-term obligations",
        weakness: "Limited liquidity to cover near-term obligations",
        recommendation: "Build a cash reserve or restructure short-term liabilities",
    },
    CategoryReadout {
        strength: "Assets are generating revenue efficiently",
        weakness: "Assets are underutilized relative to revenue",
        recommendation: "Divest idle assets or grow revenue against the existing base",
    },
    CategoryReadout {
        strength: "Conservative debt load relative to assets",
        weakness: "Debt load is high relative to assets",
        recommendation: "Prioritize debt reduction before taking on new obligations",
    },
    CategoryReadout {
        strength: "Revenue is growing year over year",
        weakness: "Revenue is flat or declining year over year",
        recommendation: "Invest in customer acquisition to restore top-line growth",
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score ratios under the default policy.
pub fn score_health(ratios: &FinancialRatios) -> HealthScore {
    score_health_with_policy(ratios, &ScoringPolicy::default())
}

/// Score ratios under an explicit policy. Total: any policy yields a score
/// in [0, 100] (a degenerate zero-weight policy scores 0).
pub fn score_health_with_policy(ratios: &FinancialRatios, policy: &ScoringPolicy) -> HealthScore {
    let category_scores = CategoryScores {
        profitability: score_profitability(ratios),
        liquidity: score_liquidity(ratios),
        efficiency: score_efficiency(ratios),
        leverage: score_leverage(ratios),
        growth: score_growth(ratios),
    };

    let total_weight = policy.total_weight();
    let overall_score = if total_weight <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        let weighted = policy.weight_profitability * category_scores.profitability
            + policy.weight_liquidity * category_scores.liquidity
            + policy.weight_efficiency * category_scores.efficiency
            + policy.weight_leverage * category_scores.leverage
            + policy.weight_growth * category_scores.growth;
        clamp_score(weighted / total_weight)
    };

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut recommendations = Vec::new();

    let scores = [
        category_scores.profitability,
        category_scores.liquidity,
        category_scores.efficiency,
        category_scores.leverage,
        category_scores.growth,
    ];
    for (score, readout) in scores.iter().zip(READOUTS.iter()) {
        if *score >= policy.strong_category_floor {
            strengths.push(readout.strength.to_string());
        } else if *score <= policy.weak_category_ceiling {
            weaknesses.push(readout.weakness.to_string());
            recommendations.push(readout.recommendation.to_string());
        }
    }

    // Data-quality advisories: never errors, always surfaced here.
    if ratios.gross_profit_margin > GROSS_MARGIN_PLAUSIBILITY_CAP {
        weaknesses.push("Reported gross margin exceeds 95%, which is implausible for most businesses".to_string());
        recommendations.push("Verify that cost of goods sold is fully recorded".to_string());
    }
    if ratios.debt_ratio > Decimal::ONE {
        weaknesses.push("Liabilities exceed total assets".to_string());
        recommendations.push("Obtain a full balance sheet review before proceeding with a sale".to_string());
    }

    HealthScore {
        overall_score,
        risk_level: risk_level(overall_score, policy),
        category_scores,
        strengths,
        weaknesses,
        recommendations,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
