//! Statement builder: raw marketplace business records to well-formed
//! financial statements.
//!
//! Seller-supplied records arrive loosely typed (numbers or numeric strings,
//! fields freely omitted, profit quoted monthly). This module coerces them
//! into a [`FinancialStatement`] that downstream ratio math can trust:
//! every numeric field resolves to a concrete `Decimal` (missing => 0),
//! monthly profit is annualized, and soft accounting-invariant violations
//! come back as advisory warnings rather than errors.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Fallback gross margin applied when a record carries revenue but no gross
/// profit and no usable operating-expense figure.
const ASSUMED_GROSS_MARGIN: Decimal = dec!(0.60);

/// Gross margins above this are almost always data-entry artifacts.
const GROSS_MARGIN_PLAUSIBILITY_CAP: Decimal = dec!(0.95);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// A business record as submitted through the marketplace listing flow.
///
/// Every field is optional; `Decimal` fields deserialize from JSON numbers
/// or numeric strings. Profit is quoted per month, everything else per year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBusinessRecord {
    pub annual_revenue: Option<Decimal>,
    pub monthly_profit: Option<Decimal>,
    pub net_income: Option<Decimal>,
    pub gross_profit: Option<Decimal>,
    pub operating_expenses: Option<Decimal>,
    pub total_assets: Option<Decimal>,
    pub total_liabilities: Option<Decimal>,
    pub cash_flow: Option<Decimal>,
    pub prior_annual_revenue: Option<Decimal>,
    pub employees: Option<u32>,
    pub period_end: Option<NaiveDate>,
}

/// An immutable financial snapshot for one business and one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub revenue: Money,
    pub gross_profit: Money,
    /// Signed: losses are negative.
    pub net_income: Money,
    pub operating_expenses: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    /// Signed: net cash burn is negative.
    pub cash_flow: Money,
    /// Revenue for the comparable prior period, when the seller supplied one.
    pub prior_revenue: Option<Money>,
    pub employees: Option<u32>,
    /// Period label; single-snapshot imports are always "Annual".
    pub period: String,
    pub period_end: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Missing => 0; negative values for magnitude-only fields clamp to 0 with a
/// warning recorded under `field`.
fn coerce_non_negative(raw: Option<Decimal>, field: &str, warnings: &mut Vec<String>) -> Decimal {
    match raw {
        Some(v) if v < Decimal::ZERO => {
            warnings.push(format!("{field} was negative and has been treated as zero"));
            Decimal::ZERO
        }
        Some(v) => v,
        None => Decimal::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build a well-formed statement from a raw record.
///
/// Never fails: absent numerics resolve to zero and implausible combinations
/// are reported as advisory warnings, not errors. Annualizes monthly profit
/// (x12) when no explicit annual net income is present.
pub fn build_statement(raw: &RawBusinessRecord) -> (FinancialStatement, Vec<String>) {
    let mut warnings = Vec::new();

    let revenue = coerce_non_negative(raw.annual_revenue, "annual_revenue", &mut warnings);
    let operating_expenses =
        coerce_non_negative(raw.operating_expenses, "operating_expenses", &mut warnings);
    let total_assets = coerce_non_negative(raw.total_assets, "total_assets", &mut warnings);
    let total_liabilities =
        coerce_non_negative(raw.total_liabilities, "total_liabilities", &mut warnings);

    // Explicit annual net income wins; otherwise annualize the monthly figure.
    let net_income = match (raw.net_income, raw.monthly_profit) {
        (Some(annual), _) => annual,
        (None, Some(monthly)) => monthly * MONTHS_PER_YEAR,
        (None, None) => Decimal::ZERO,
    };

    let gross_profit = match raw.gross_profit {
        Some(v) => coerce_non_negative(Some(v), "gross_profit", &mut warnings),
        None if revenue > Decimal::ZERO => {
            // Prefer revenue less operating expenses when the expense figure
            // is usable, else fall back to the assumed margin.
            if operating_expenses > Decimal::ZERO && operating_expenses < revenue {
                revenue - operating_expenses
            } else {
                revenue * ASSUMED_GROSS_MARGIN
            }
        }
        None => Decimal::ZERO,
    };

    let cash_flow = raw.cash_flow.unwrap_or(Decimal::ZERO);
    let prior_revenue = raw
        .prior_annual_revenue
        .filter(|v| *v >= Decimal::ZERO);
    if raw
        .prior_annual_revenue
        .is_some_and(|v| v < Decimal::ZERO)
    {
        warnings.push("prior_annual_revenue was negative and has been ignored".to_string());
    }

    // Soft accounting invariants: report, never reject.
    if gross_profit > revenue {
        warnings.push("gross profit exceeds revenue; figures may be inconsistent".to_string());
    }
    if net_income > gross_profit {
        warnings.push("net income exceeds gross profit; figures may be inconsistent".to_string());
    }
    if total_liabilities > total_assets {
        warnings.push("liabilities exceed assets; the business may be balance-sheet insolvent".to_string());
    }
    if revenue > Decimal::ZERO && gross_profit / revenue > GROSS_MARGIN_PLAUSIBILITY_CAP {
        warnings.push("gross margin above 95% is unusual; verify cost of goods sold".to_string());
    }

    let statement = FinancialStatement {
        revenue,
        gross_profit,
        net_income,
        operating_expenses,
        total_assets,
        total_liabilities,
        cash_flow,
        prior_revenue,
        employees: raw.employees,
        period: "Annual".to_string(),
        period_end: raw.period_end,
    };

    (statement, warnings)
}

// ---------------------------------------------------------------------------
// Analysis session
// ---------------------------------------------------------------------------

/// Caller-owned, chronologically ordered statement history (most recent
/// last). Each analysis request owns its own session, so the engine itself
/// holds no shared mutable state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSession {
    statements: Vec<FinancialStatement>,
    warnings: Vec<String>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a statement from `raw`, append it to the history, and return a
    /// reference to it. Prior entries are never mutated.
    pub fn import(&mut self, raw: &RawBusinessRecord) -> &FinancialStatement {
        let (statement, warnings) = build_statement(raw);
        self.warnings.extend(warnings);
        self.statements.push(statement);
        self.statements.last().unwrap_or_else(|| unreachable!())
    }

    /// Append an already-built statement.
    pub fn push(&mut self, statement: FinancialStatement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[FinancialStatement] {
        &self.statements
    }

    pub fn latest(&self) -> Option<&FinancialStatement> {
        self.statements.last()
    }

    /// Advisory warnings accumulated across all imports, in import order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn listing_record() -> RawBusinessRecord {
        RawBusinessRecord {
            annual_revenue: Some(dec!(1000000)),
            monthly_profit: Some(dec!(50000)),
            total_assets: Some(dec!(500000)),
            total_liabilities: Some(dec!(200000)),
            employees: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn test_monthly_profit_annualized() {
        let (stmt, _) = build_statement(&listing_record());
        assert_eq!(stmt.net_income, dec!(600000));
    }

    #[test]
    fn test_explicit_net_income_wins_over_monthly() {
        let mut raw = listing_record();
        raw.net_income = Some(dec!(450000));
        let (stmt, _) = build_statement(&raw);
        assert_eq!(stmt.net_income, dec!(450000));
    }

    #[test]
    fn test_missing_fields_resolve_to_zero() {
        let (stmt, _) = build_statement(&RawBusinessRecord::default());
        assert_eq!(stmt.revenue, Decimal::ZERO);
        assert_eq!(stmt.gross_profit, Decimal::ZERO);
        assert_eq!(stmt.net_income, Decimal::ZERO);
        assert_eq!(stmt.total_assets, Decimal::ZERO);
        assert_eq!(stmt.total_liabilities, Decimal::ZERO);
        assert_eq!(stmt.cash_flow, Decimal::ZERO);
    }

    #[test]
    fn test_period_is_annual() {
        let (stmt, _) = build_statement(&listing_record());
        assert_eq!(stmt.period, "Annual");
    }

    #[test]
    fn test_gross_profit_from_operating_expenses() {
        let mut raw = listing_record();
        raw.operating_expenses = Some(dec!(300000));
        let (stmt, _) = build_statement(&raw);
        assert_eq!(stmt.gross_profit, dec!(700000));
    }

    #[test]
    fn test_gross_profit_from_assumed_margin() {
        let (stmt, _) = build_statement(&listing_record());
        // No gross profit, no opex: revenue * 0.60
        assert_eq!(stmt.gross_profit, dec!(600000));
    }

    #[test]
    fn test_negative_revenue_clamped_with_warning() {
        let raw = RawBusinessRecord {
            annual_revenue: Some(dec!(-100)),
            ..Default::default()
        };
        let (stmt, warnings) = build_statement(&raw);
        assert_eq!(stmt.revenue, Decimal::ZERO);
        assert!(warnings.iter().any(|w| w.contains("annual_revenue")));
    }

    #[test]
    fn test_negative_net_income_preserved() {
        let raw = RawBusinessRecord {
            monthly_profit: Some(dec!(-10000)),
            ..Default::default()
        };
        let (stmt, _) = build_statement(&raw);
        assert_eq!(stmt.net_income, dec!(-120000));
    }

    #[test]
    fn test_gross_profit_exceeding_revenue_warns() {
        let raw = RawBusinessRecord {
            annual_revenue: Some(dec!(100)),
            gross_profit: Some(dec!(150)),
            ..Default::default()
        };
        let (_, warnings) = build_statement(&raw);
        assert!(warnings.iter().any(|w| w.contains("gross profit exceeds revenue")));
    }

    #[test]
    fn test_liabilities_exceeding_assets_warns() {
        let raw = RawBusinessRecord {
            total_assets: Some(dec!(100)),
            total_liabilities: Some(dec!(500)),
            ..Default::default()
        };
        let (_, warnings) = build_statement(&raw);
        assert!(warnings.iter().any(|w| w.contains("liabilities exceed assets")));
    }

    #[test]
    fn test_implausible_gross_margin_warns() {
        let raw = RawBusinessRecord {
            annual_revenue: Some(dec!(1000)),
            gross_profit: Some(dec!(990)),
            ..Default::default()
        };
        let (_, warnings) = build_statement(&raw);
        assert!(warnings.iter().any(|w| w.contains("95%")));
    }

    #[test]
    fn test_record_deserializes_from_numbers_and_strings() {
        let json = r#"{"annual_revenue": 1000000, "monthly_profit": "50000"}"#;
        let raw: RawBusinessRecord = serde_json::from_str(json).unwrap();
        let (stmt, _) = build_statement(&raw);
        assert_eq!(stmt.revenue, dec!(1000000));
        assert_eq!(stmt.net_income, dec!(600000));
    }

    #[test]
    fn test_session_appends_in_order() {
        let mut session = AnalysisSession::new();
        let mut raw = listing_record();
        session.import(&raw);
        raw.annual_revenue = Some(dec!(1200000));
        session.import(&raw);
        assert_eq!(session.len(), 2);
        assert_eq!(session.statements()[0].revenue, dec!(1000000));
        assert_eq!(session.latest().unwrap().revenue, dec!(1200000));
    }

    #[test]
    fn test_session_accumulates_warnings() {
        let mut session = AnalysisSession::new();
        session.import(&RawBusinessRecord {
            annual_revenue: Some(dec!(-1)),
            ..Default::default()
        });
        assert!(!session.warnings().is_empty());
    }

    #[test]
    fn test_statement_serialization_roundtrip() {
        let (stmt, _) = build_statement(&listing_record());
        let json = serde_json::to_string(&stmt).unwrap();
        let deser: FinancialStatement = serde_json::from_str(&json).unwrap();
        assert_eq!(stmt.revenue, deser.revenue);
        assert_eq!(stmt.net_income, deser.net_income);
    }
}
