//! Cash flow analyzer: operating/free cash flow estimates and a
//! predictability classification.
//!
//! Marketplace records rarely carry a full cash flow statement, so operating
//! cash flow falls back to net income plus a non-cash addback modeled as a
//! share of revenue, and free cash flow nets out a maintenance-capex share.
//! With both revenue and profit positive the estimates are positive by
//! construction. Predictability is Stable for a single period and is
//! classified by coefficient of variation once two or more exist.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::ScoringPolicy;
use crate::statement::FinancialStatement;
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predictability {
    Stable,
    Variable,
    Volatile,
}

impl fmt::Display for Predictability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Predictability::Stable => "Stable",
            Predictability::Variable => "Variable",
            Predictability::Volatile => "Volatile",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowAnalysis {
    pub operating_cash_flow: Money,
    pub free_cash_flow: Money,
    /// Operating cash flow over revenue, 0 when revenue is 0.
    pub cash_flow_margin: Rate,
    pub predictability: Predictability,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reported cash flow when the seller supplied one, else the estimate.
fn operating_cash_flow(statement: &FinancialStatement, policy: &ScoringPolicy) -> Money {
    if statement.cash_flow != Decimal::ZERO {
        statement.cash_flow
    } else {
        statement.net_income + statement.revenue * policy.non_cash_addback_rate
    }
}

/// Population coefficient of variation; None when the mean is not positive.
fn coefficient_of_variation(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let n = Decimal::from(values.len());
    let mean = values.iter().copied().sum::<Decimal>() / n;
    if mean <= Decimal::ZERO {
        return None;
    }
    let variance = values
        .iter()
        .map(|v| {
            let d = *v - mean;
            d * d
        })
        .sum::<Decimal>()
        / n;
    variance.sqrt().map(|std_dev| std_dev / mean)
}

fn classify_predictability(
    history: &[FinancialStatement],
    policy: &ScoringPolicy,
) -> Predictability {
    if history.len() < 2 {
        return Predictability::Stable;
    }
    let flows: Vec<Decimal> = history
        .iter()
        .map(|s| operating_cash_flow(s, policy))
        .collect();
    match coefficient_of_variation(&flows) {
        Some(cov) if cov <= policy.cash_flow_stable_ceiling => Predictability::Stable,
        Some(cov) if cov <= policy.cash_flow_variable_ceiling => Predictability::Variable,
        Some(_) => Predictability::Volatile,
        // Zero or negative average operating cash flow
        None => Predictability::Volatile,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze one statement, using `history` (the full session, oldest first)
/// only for the predictability classification.
pub fn analyze_cash_flow(
    statement: &FinancialStatement,
    history: &[FinancialStatement],
) -> CashFlowAnalysis {
    analyze_cash_flow_with_policy(statement, history, &ScoringPolicy::default())
}

pub fn analyze_cash_flow_with_policy(
    statement: &FinancialStatement,
    history: &[FinancialStatement],
    policy: &ScoringPolicy,
) -> CashFlowAnalysis {
    let ocf = operating_cash_flow(statement, policy);
    let fcf = ocf - statement.revenue * policy.maintenance_capex_rate;
    let margin = if statement.revenue > Decimal::ZERO {
        ocf / statement.revenue
    } else {
        Decimal::ZERO
    };

    CashFlowAnalysis {
        operating_cash_flow: ocf,
        free_cash_flow: fcf,
        cash_flow_margin: margin,
        predictability: classify_predictability(history, policy),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{build_statement, RawBusinessRecord};
    use rust_decimal_macros::dec;

    fn statement(revenue: Decimal, monthly_profit: Decimal) -> FinancialStatement {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(revenue),
            monthly_profit: Some(monthly_profit),
            ..Default::default()
        });
        stmt
    }

    #[test]
    fn test_estimates_positive_for_profitable_business() {
        let stmt = statement(dec!(1000000), dec!(50000));
        let cf = analyze_cash_flow(&stmt, &[]);
        // OCF = 600k + 4% of 1M = 640k; FCF = 640k - 20k = 620k
        assert_eq!(cf.operating_cash_flow, dec!(640000));
        assert_eq!(cf.free_cash_flow, dec!(620000));
        assert!(cf.free_cash_flow > Decimal::ZERO);
    }

    #[test]
    fn test_cash_flow_margin() {
        let stmt = statement(dec!(1000000), dec!(50000));
        let cf = analyze_cash_flow(&stmt, &[]);
        assert_eq!(cf.cash_flow_margin, dec!(0.64));
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let stmt = statement(Decimal::ZERO, Decimal::ZERO);
        let cf = analyze_cash_flow(&stmt, &[]);
        assert_eq!(cf.cash_flow_margin, Decimal::ZERO);
    }

    #[test]
    fn test_reported_cash_flow_takes_precedence() {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(dec!(1000000)),
            monthly_profit: Some(dec!(50000)),
            cash_flow: Some(dec!(400000)),
            ..Default::default()
        });
        let cf = analyze_cash_flow(&stmt, &[]);
        assert_eq!(cf.operating_cash_flow, dec!(400000));
    }

    #[test]
    fn test_single_period_is_stable() {
        let stmt = statement(dec!(500000), dec!(10000));
        let cf = analyze_cash_flow(&stmt, std::slice::from_ref(&stmt));
        assert_eq!(cf.predictability, Predictability::Stable);
    }

    #[test]
    fn test_steady_history_is_stable() {
        let history = vec![
            statement(dec!(1000000), dec!(50000)),
            statement(dec!(1020000), dec!(51000)),
            statement(dec!(1050000), dec!(52000)),
        ];
        let cf = analyze_cash_flow(&history[2], &history);
        assert_eq!(cf.predictability, Predictability::Stable);
    }

    #[test]
    fn test_swinging_history_is_volatile() {
        let history = vec![
            statement(dec!(1000000), dec!(80000)),
            statement(dec!(300000), dec!(2000)),
            statement(dec!(1200000), dec!(90000)),
        ];
        let cf = analyze_cash_flow(&history[2], &history);
        assert_eq!(cf.predictability, Predictability::Volatile);
    }

    #[test]
    fn test_moderate_swings_are_variable() {
        let history = vec![
            statement(dec!(1000000), dec!(50000)),
            statement(dec!(1000000), dec!(35000)),
        ];
        // Flows: 640k, 460k; mean 550k, std 90k, CoV ~0.164
        let cf = analyze_cash_flow(&history[1], &history);
        assert_eq!(cf.predictability, Predictability::Variable);
    }

    #[test]
    fn test_negative_average_flow_is_volatile() {
        let history = vec![
            statement(dec!(100000), dec!(-20000)),
            statement(dec!(100000), dec!(-25000)),
        ];
        let cf = analyze_cash_flow(&history[1], &history);
        assert_eq!(cf.predictability, Predictability::Volatile);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let cov = coefficient_of_variation(&[dec!(100), dec!(100), dec!(100)]).unwrap();
        assert_eq!(cov, Decimal::ZERO);
        assert!(coefficient_of_variation(&[dec!(100)]).is_none());
        assert!(coefficient_of_variation(&[dec!(-100), dec!(-50)]).is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let stmt = statement(dec!(1000000), dec!(50000));
        let cf = analyze_cash_flow(&stmt, &[]);
        let json = serde_json::to_string(&cf).unwrap();
        let deser: CashFlowAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(cf.operating_cash_flow, deser.operating_cash_flow);
        assert_eq!(cf.predictability, deser.predictability);
    }
}
