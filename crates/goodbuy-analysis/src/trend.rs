//! Trend analyzer: period-over-period comparison of one named metric.
//!
//! Compares the two most recent statements in a chronologically ordered
//! history (most recent last). This is the engine's single fallible
//! operation: fewer than two statements is a hard
//! [`AnalysisError::InsufficientHistory`], by contract. Report assembly
//! degrades to an empty trend list instead; direct callers must handle the
//! error.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;
use crate::policy::ScoringPolicy;
use crate::statement::FinancialStatement;
use crate::types::Money;
use crate::AnalysisResult;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Statement fields that support trend comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    Revenue,
    GrossProfit,
    NetIncome,
    CashFlow,
    TotalAssets,
}

impl TrendMetric {
    pub const ALL: [TrendMetric; 5] = [
        TrendMetric::Revenue,
        TrendMetric::GrossProfit,
        TrendMetric::NetIncome,
        TrendMetric::CashFlow,
        TrendMetric::TotalAssets,
    ];

    fn extract(&self, statement: &FinancialStatement) -> Money {
        match self {
            TrendMetric::Revenue => statement.revenue,
            TrendMetric::GrossProfit => statement.gross_profit,
            TrendMetric::NetIncome => statement.net_income,
            TrendMetric::CashFlow => statement.cash_flow,
            TrendMetric::TotalAssets => statement.total_assets,
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendMetric::Revenue => "revenue",
            TrendMetric::GrossProfit => "gross_profit",
            TrendMetric::NetIncome => "net_income",
            TrendMetric::CashFlow => "cash_flow",
            TrendMetric::TotalAssets => "total_assets",
        };
        f.write_str(s)
    }
}

impl FromStr for TrendMetric {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(TrendMetric::Revenue),
            "gross_profit" => Ok(TrendMetric::GrossProfit),
            "net_income" => Ok(TrendMetric::NetIncome),
            "cash_flow" => Ok(TrendMetric::CashFlow),
            "total_assets" => Ok(TrendMetric::TotalAssets),
            other => Err(AnalysisError::InvalidInput {
                field: "metric".into(),
                reason: format!("Unknown metric '{other}'"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub metric: TrendMetric,
    pub current_value: Money,
    pub previous_value: Money,
    pub change_amount: Money,
    /// Percent (20 means +20%). Sentinel 0 when the previous value is 0.
    pub change_percent: Decimal,
    pub direction: TrendDirection,
    pub volatility: Volatility,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare the two most recent statements for `metric` under the default
/// policy. Errors when fewer than two statements exist.
pub fn analyze_trend(
    statements: &[FinancialStatement],
    metric: TrendMetric,
) -> AnalysisResult<TrendAnalysis> {
    analyze_trend_with_policy(statements, metric, &ScoringPolicy::default())
}

pub fn analyze_trend_with_policy(
    statements: &[FinancialStatement],
    metric: TrendMetric,
    policy: &ScoringPolicy,
) -> AnalysisResult<TrendAnalysis> {
    if statements.len() < 2 {
        return Err(AnalysisError::InsufficientHistory(format!(
            "trend analysis for '{metric}' requires at least 2 statements, found {}",
            statements.len()
        )));
    }

    let current = &statements[statements.len() - 1];
    let previous = &statements[statements.len() - 2];

    let current_value = metric.extract(current);
    let previous_value = metric.extract(previous);
    let change_amount = current_value - previous_value;

    let change_percent = if previous_value == Decimal::ZERO {
        Decimal::ZERO
    } else {
        change_amount / previous_value * dec!(100)
    };

    let abs_change = change_percent.abs();
    let direction = if abs_change < policy.stable_change_threshold {
        TrendDirection::Stable
    } else if change_amount > Decimal::ZERO {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let volatility = if abs_change < policy.volatility_low_ceiling {
        Volatility::Low
    } else if abs_change < policy.volatility_medium_ceiling {
        Volatility::Medium
    } else {
        Volatility::High
    };

    Ok(TrendAnalysis {
        metric,
        current_value,
        previous_value,
        change_amount,
        change_percent,
        direction,
        volatility,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{build_statement, RawBusinessRecord};
    use rust_decimal_macros::dec;

    fn statement(revenue: Decimal) -> FinancialStatement {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(revenue),
            ..Default::default()
        });
        stmt
    }

    #[test]
    fn test_insufficient_history_errors() {
        let single = [statement(dec!(1000000))];
        let err = analyze_trend(&single, TrendMetric::Revenue).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientHistory(_)));
        assert!(err.to_string().contains("Insufficient history"));
    }

    #[test]
    fn test_empty_history_errors() {
        assert!(analyze_trend(&[], TrendMetric::Revenue).is_err());
    }

    #[test]
    fn test_revenue_growth_twenty_percent() {
        let history = [statement(dec!(1000000)), statement(dec!(1200000))];
        let t = analyze_trend(&history, TrendMetric::Revenue).unwrap();
        assert_eq!(t.current_value, dec!(1200000));
        assert_eq!(t.previous_value, dec!(1000000));
        assert_eq!(t.change_amount, dec!(200000));
        assert_eq!(t.change_percent, dec!(20));
        assert_eq!(t.direction, TrendDirection::Increasing);
        assert_eq!(t.volatility, Volatility::Medium);
    }

    #[test]
    fn test_uses_two_most_recent_statements() {
        let history = [
            statement(dec!(500000)),
            statement(dec!(1000000)),
            statement(dec!(1100000)),
        ];
        let t = analyze_trend(&history, TrendMetric::Revenue).unwrap();
        assert_eq!(t.previous_value, dec!(1000000));
        assert_eq!(t.current_value, dec!(1100000));
    }

    #[test]
    fn test_zero_previous_value_sentinel() {
        let history = [statement(Decimal::ZERO), statement(dec!(500000))];
        let t = analyze_trend(&history, TrendMetric::Revenue).unwrap();
        assert_eq!(t.change_percent, Decimal::ZERO);
        assert_eq!(t.change_amount, dec!(500000));
        // Sentinel 0% reads as stable/low by design
        assert_eq!(t.direction, TrendDirection::Stable);
        assert_eq!(t.volatility, Volatility::Low);
    }

    #[test]
    fn test_small_change_is_stable() {
        let history = [statement(dec!(1000000)), statement(dec!(1030000))];
        let t = analyze_trend(&history, TrendMetric::Revenue).unwrap();
        assert_eq!(t.direction, TrendDirection::Stable);
        assert_eq!(t.volatility, Volatility::Low);
    }

    #[test]
    fn test_decline_classified() {
        let history = [statement(dec!(1000000)), statement(dec!(600000))];
        let t = analyze_trend(&history, TrendMetric::Revenue).unwrap();
        assert_eq!(t.change_percent, dec!(-40));
        assert_eq!(t.direction, TrendDirection::Decreasing);
        assert_eq!(t.volatility, Volatility::High);
    }

    #[test]
    fn test_net_income_metric() {
        let mk = |monthly: Decimal| {
            let (stmt, _) = build_statement(&RawBusinessRecord {
                monthly_profit: Some(monthly),
                ..Default::default()
            });
            stmt
        };
        let history = [mk(dec!(10000)), mk(dec!(12000))];
        let t = analyze_trend(&history, TrendMetric::NetIncome).unwrap();
        assert_eq!(t.change_amount, dec!(24000));
        assert_eq!(t.change_percent, dec!(20));
    }

    #[test]
    fn test_metric_parses_from_str() {
        assert_eq!("revenue".parse::<TrendMetric>().unwrap(), TrendMetric::Revenue);
        assert_eq!(
            "net_income".parse::<TrendMetric>().unwrap(),
            TrendMetric::NetIncome
        );
        assert!("ebitda".parse::<TrendMetric>().is_err());
    }

    #[test]
    fn test_metric_display_roundtrips_through_from_str() {
        for metric in TrendMetric::ALL {
            let parsed: TrendMetric = metric.to_string().parse().unwrap();
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let history = [statement(dec!(1000000)), statement(dec!(1200000))];
        let t = analyze_trend(&history, TrendMetric::Revenue).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let deser: TrendAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(t.change_percent, deser.change_percent);
        assert_eq!(t.direction, deser.direction);
    }
}
