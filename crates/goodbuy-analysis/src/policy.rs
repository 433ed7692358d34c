//! Scoring policy: every tunable constant of the engine in one place.
//!
//! Category weights, risk-tier cut points, trend/volatility bands, forecast
//! spreads, and cash-flow estimate rates are policy decisions, not
//! arithmetic. Lifting them into a single validated struct keeps the
//! scoring rules auditable and testable independently of the math that
//! applies them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::AnalysisResult;

/// Tunable scoring and classification constants.
///
/// The default policy weights profitability and liquidity at 0.55 combined
/// so that financial distress dominates the overall score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    // Category weights (normalized by their sum).
    pub weight_profitability: Decimal,
    pub weight_liquidity: Decimal,
    pub weight_efficiency: Decimal,
    pub weight_leverage: Decimal,
    pub weight_growth: Decimal,

    // Risk-tier cut points over the overall score: >= low_floor is Low risk,
    // >= medium_floor is Medium, >= high_floor is High, below is Critical.
    pub risk_low_floor: Decimal,
    pub risk_medium_floor: Decimal,
    pub risk_high_floor: Decimal,

    // Category scores at or above this read as strengths; at or below the
    // weak ceiling they read as weaknesses with a matching recommendation.
    pub strong_category_floor: Decimal,
    pub weak_category_ceiling: Decimal,

    // Trend classification: absolute change percent below the stability
    // threshold is "stable"; volatility bands are on |change percent|.
    pub stable_change_threshold: Decimal,
    pub volatility_low_ceiling: Decimal,
    pub volatility_medium_ceiling: Decimal,

    // Cash-flow predictability bands on the coefficient of variation.
    pub cash_flow_stable_ceiling: Decimal,
    pub cash_flow_variable_ceiling: Decimal,

    // Cash-flow estimate rates (share of revenue).
    pub non_cash_addback_rate: Decimal,
    pub maintenance_capex_rate: Decimal,

    // Forecast policy.
    pub default_annual_growth: Decimal,
    pub min_annual_growth: Decimal,
    pub max_annual_growth: Decimal,
    pub optimistic_spread: Decimal,
    pub pessimistic_spread: Decimal,
    pub confidence_base: Decimal,
    pub confidence_min: Decimal,
    pub confidence_max: Decimal,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weight_profitability: dec!(0.30),
            weight_liquidity: dec!(0.25),
            weight_efficiency: dec!(0.15),
            weight_leverage: dec!(0.15),
            weight_growth: dec!(0.15),

            risk_low_floor: dec!(80),
            risk_medium_floor: dec!(60),
            risk_high_floor: dec!(40),

            strong_category_floor: dec!(75),
            weak_category_ceiling: dec!(40),

            stable_change_threshold: dec!(5),
            volatility_low_ceiling: dec!(10),
            volatility_medium_ceiling: dec!(30),

            cash_flow_stable_ceiling: dec!(0.15),
            cash_flow_variable_ceiling: dec!(0.40),

            non_cash_addback_rate: dec!(0.04),
            maintenance_capex_rate: dec!(0.02),

            default_annual_growth: dec!(0.05),
            min_annual_growth: dec!(-0.90),
            max_annual_growth: dec!(3.00),
            optimistic_spread: dec!(0.20),
            pessimistic_spread: dec!(0.20),
            confidence_base: dec!(50),
            confidence_min: dec!(20),
            confidence_max: dec!(95),
        }
    }
}

impl ScoringPolicy {
    /// Sum of the five category weights.
    pub fn total_weight(&self) -> Decimal {
        self.weight_profitability
            + self.weight_liquidity
            + self.weight_efficiency
            + self.weight_leverage
            + self.weight_growth
    }

    /// Reject policies that would make scoring undefined or non-monotonic.
    pub fn validate(&self) -> AnalysisResult<()> {
        let weights = [
            ("weight_profitability", self.weight_profitability),
            ("weight_liquidity", self.weight_liquidity),
            ("weight_efficiency", self.weight_efficiency),
            ("weight_leverage", self.weight_leverage),
            ("weight_growth", self.weight_growth),
        ];
        for (field, w) in weights {
            if w < Decimal::ZERO {
                return Err(AnalysisError::InvalidInput {
                    field: field.into(),
                    reason: "Weights must be non-negative".into(),
                });
            }
        }
        if self.total_weight() <= Decimal::ZERO {
            return Err(AnalysisError::InvalidInput {
                field: "weights".into(),
                reason: "Sum of category weights must be positive".into(),
            });
        }

        let descending = self.risk_low_floor > self.risk_medium_floor
            && self.risk_medium_floor > self.risk_high_floor
            && self.risk_high_floor > Decimal::ZERO
            && self.risk_low_floor <= dec!(100);
        if !descending {
            return Err(AnalysisError::InvalidInput {
                field: "risk floors".into(),
                reason: "Cut points must strictly descend within (0, 100]".into(),
            });
        }

        if self.volatility_low_ceiling >= self.volatility_medium_ceiling {
            return Err(AnalysisError::InvalidInput {
                field: "volatility bands".into(),
                reason: "Low ceiling must be below medium ceiling".into(),
            });
        }
        if self.cash_flow_stable_ceiling >= self.cash_flow_variable_ceiling {
            return Err(AnalysisError::InvalidInput {
                field: "cash flow bands".into(),
                reason: "Stable ceiling must be below variable ceiling".into(),
            });
        }

        if self.confidence_min >= self.confidence_max {
            return Err(AnalysisError::InvalidInput {
                field: "confidence bounds".into(),
                reason: "Minimum must be below maximum".into(),
            });
        }
        if self.optimistic_spread < Decimal::ZERO
            || self.pessimistic_spread < Decimal::ZERO
            || self.pessimistic_spread >= Decimal::ONE
        {
            return Err(AnalysisError::InvalidInput {
                field: "scenario spreads".into(),
                reason: "Spreads must be non-negative and pessimistic below 100%".into(),
            });
        }
        if self.min_annual_growth >= self.max_annual_growth {
            return Err(AnalysisError::InvalidInput {
                field: "growth bounds".into(),
                reason: "Minimum growth must be below maximum".into(),
            });
        }

        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(ScoringPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert_eq!(ScoringPolicy::default().total_weight(), dec!(1.00));
    }

    #[test]
    fn test_profitability_and_liquidity_dominate() {
        let p = ScoringPolicy::default();
        let dominant = p.weight_profitability + p.weight_liquidity;
        assert!(dominant > p.weight_efficiency + p.weight_leverage + p.weight_growth);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut p = ScoringPolicy::default();
        p.weight_growth = dec!(-0.1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_zero_total_weight_rejected() {
        let mut p = ScoringPolicy::default();
        p.weight_profitability = Decimal::ZERO;
        p.weight_liquidity = Decimal::ZERO;
        p.weight_efficiency = Decimal::ZERO;
        p.weight_leverage = Decimal::ZERO;
        p.weight_growth = Decimal::ZERO;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_non_monotonic_risk_floors_rejected() {
        let mut p = ScoringPolicy::default();
        p.risk_medium_floor = dec!(85);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_inverted_volatility_bands_rejected() {
        let mut p = ScoringPolicy::default();
        p.volatility_low_ceiling = dec!(50);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_inverted_confidence_bounds_rejected() {
        let mut p = ScoringPolicy::default();
        p.confidence_min = dec!(96);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_pessimistic_spread_of_one_rejected() {
        let mut p = ScoringPolicy::default();
        p.pessimistic_spread = Decimal::ONE;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_policy_serialization_roundtrip() {
        let p = ScoringPolicy::default();
        let json = serde_json::to_string(&p).unwrap();
        let deser: ScoringPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(p.weight_profitability, deser.weight_profitability);
        assert_eq!(p.risk_low_floor, deser.risk_low_floor);
    }
}
