//! Ratio engine: a stateless, total view over one financial statement.
//!
//! Every ratio is defined for every input. Zero or negative denominators
//! (zero revenue, zero assets, negative equity) resolve to 0 by convention,
//! never to NaN, infinity, or an error. Small-business records are missing
//! data more often than not, and the scorer downstream treats 0 as "no
//! signal" rather than rejecting the listing.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::statement::FinancialStatement;
use crate::types::Rate;

// ---------------------------------------------------------------------------
// Liquidity model
// ---------------------------------------------------------------------------

// Marketplace records carry only whole-balance-sheet figures, so current
// positions are modeled as fixed shares of the totals. The shares follow the
// composition of a typical small services/retail business.
const CURRENT_ASSET_SHARE: Decimal = dec!(0.50);
const CURRENT_LIABILITY_SHARE: Decimal = dec!(0.60);
const QUICK_ASSET_SHARE: Decimal = dec!(0.80);
const CASH_ASSET_SHARE: Decimal = dec!(0.30);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Derived ratios for one statement. All rates are decimals (0.25 = 25%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRatios {
    // Profitability
    pub gross_profit_margin: Rate,
    pub net_profit_margin: Rate,
    pub return_on_assets: Rate,
    pub return_on_equity: Rate,

    // Liquidity
    pub current_ratio: Rate,
    pub quick_ratio: Rate,
    pub cash_ratio: Rate,

    // Efficiency
    pub asset_turnover: Rate,

    // Leverage
    pub debt_to_equity: Rate,
    pub debt_ratio: Rate,

    /// Year-over-year revenue growth when a prior-period figure exists.
    pub revenue_growth: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Division that degrades to zero instead of failing on a non-positive
/// denominator.
fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute all ratios for one statement. Total: no input can fail.
pub fn compute_ratios(statement: &FinancialStatement) -> FinancialRatios {
    let equity = statement.total_assets - statement.total_liabilities;

    let current_assets = statement.total_assets * CURRENT_ASSET_SHARE;
    let current_liabilities = statement.total_liabilities * CURRENT_LIABILITY_SHARE;

    let revenue_growth = statement.prior_revenue.and_then(|prior| {
        if prior > Decimal::ZERO {
            Some((statement.revenue - prior) / prior)
        } else {
            None
        }
    });

    FinancialRatios {
        gross_profit_margin: ratio_or_zero(statement.gross_profit, statement.revenue),
        net_profit_margin: ratio_or_zero(statement.net_income, statement.revenue),
        return_on_assets: ratio_or_zero(statement.net_income, statement.total_assets),
        return_on_equity: ratio_or_zero(statement.net_income, equity),
        current_ratio: ratio_or_zero(current_assets, current_liabilities),
        quick_ratio: ratio_or_zero(current_assets * QUICK_ASSET_SHARE, current_liabilities),
        cash_ratio: ratio_or_zero(current_assets * CASH_ASSET_SHARE, current_liabilities),
        asset_turnover: ratio_or_zero(statement.revenue, statement.total_assets),
        debt_to_equity: ratio_or_zero(statement.total_liabilities, equity),
        debt_ratio: ratio_or_zero(statement.total_liabilities, statement.total_assets),
        revenue_growth,
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

    fn healthy_statement() -> FinancialStatement {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(dec!(1000000)),
            monthly_profit: Some(dec!(50000)),
            gross_profit: Some(dec!(700000)),
            total_assets: Some(dec!(500000)),
            total_liabilities: Some(dec!(200000)),
            ..Default::default()
        });
        stmt
    }

    #[test]
    fn test_margins() {
        let r = compute_ratios(&healthy_statement());
        assert_eq!(r.gross_profit_margin, dec!(0.7));
        assert_eq!(r.net_profit_margin, dec!(0.6));
    }

    #[test]
    fn test_return_ratios() {
        let r = compute_ratios(&healthy_statement());
        assert_eq!(r.return_on_assets, dec!(1.2));
        // Equity = 300k, NI = 600k
        assert_eq!(r.return_on_equity, dec!(2));
    }

    #[test]
    fn test_liquidity_model() {
        let r = compute_ratios(&healthy_statement());
        // CA = 250k, CL = 120k
        let expected_current = dec!(250000) / dec!(120000);
        assert_eq!(r.current_ratio, expected_current);
        assert_eq!(r.quick_ratio, dec!(200000) / dec!(120000));
        assert_eq!(r.cash_ratio, dec!(75000) / dec!(120000));
    }

    #[test]
    fn test_asset_turnover_and_leverage() {
        let r = compute_ratios(&healthy_statement());
        assert_eq!(r.asset_turnover, dec!(2));
        assert_eq!(r.debt_ratio, dec!(0.4));
        // D/E = 200k / 300k
        assert_eq!(r.debt_to_equity, dec!(200000) / dec!(300000));
    }

    #[test]
    fn test_zero_revenue_yields_zero_revenue_ratios() {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            total_assets: Some(dec!(100000)),
            ..Default::default()
        });
        let r = compute_ratios(&stmt);
        assert_eq!(r.gross_profit_margin, Decimal::ZERO);
        assert_eq!(r.net_profit_margin, Decimal::ZERO);
        assert_eq!(r.asset_turnover, Decimal::ZERO);
    }

    #[test]
    fn test_zero_assets_yields_zero_asset_ratios() {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(dec!(500000)),
            monthly_profit: Some(dec!(10000)),
            ..Default::default()
        });
        let r = compute_ratios(&stmt);
        assert_eq!(r.return_on_assets, Decimal::ZERO);
        assert_eq!(r.asset_turnover, Decimal::ZERO);
        assert_eq!(r.debt_ratio, Decimal::ZERO);
        assert_eq!(r.current_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_negative_equity_yields_zero_roe_and_dte() {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(dec!(500000)),
            monthly_profit: Some(dec!(10000)),
            total_assets: Some(dec!(100000)),
            total_liabilities: Some(dec!(250000)),
            ..Default::default()
        });
        let r = compute_ratios(&stmt);
        assert_eq!(r.return_on_equity, Decimal::ZERO);
        assert_eq!(r.debt_to_equity, Decimal::ZERO);
        // Debt ratio still defined: 2.5
        assert_eq!(r.debt_ratio, dec!(2.5));
    }

    #[test]
    fn test_all_zero_statement_is_total() {
        let (stmt, _) = build_statement(&RawBusinessRecord::default());
        let r = compute_ratios(&stmt);
        assert_eq!(r.gross_profit_margin, Decimal::ZERO);
        assert_eq!(r.return_on_equity, Decimal::ZERO);
        assert_eq!(r.cash_ratio, Decimal::ZERO);
        assert!(r.revenue_growth.is_none());
    }

    #[test]
    fn test_revenue_growth_from_prior_period() {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(dec!(1200000)),
            prior_annual_revenue: Some(dec!(1000000)),
            ..Default::default()
        });
        let r = compute_ratios(&stmt);
        assert_eq!(r.revenue_growth, Some(dec!(0.2)));
    }

    #[test]
    fn test_revenue_growth_absent_when_prior_is_zero() {
        let (stmt, _) = build_statement(&RawBusinessRecord {
            annual_revenue: Some(dec!(1200000)),
            prior_annual_revenue: Some(Decimal::ZERO),
            ..Default::default()
        });
        let r = compute_ratios(&stmt);
        assert!(r.revenue_growth.is_none());
    }

    #[test]
    fn test_ratios_serialization_roundtrip() {
        let r = compute_ratios(&healthy_statement());
        let json = serde_json::to_string(&r).unwrap();
        let deser: FinancialRatios = serde_json::from_str(&json).unwrap();
        assert_eq!(r.net_profit_margin, deser.net_profit_margin);
        assert_eq!(r.current_ratio, deser.current_ratio);
    }
}
