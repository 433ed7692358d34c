pub mod cash_flow;
pub mod error;
pub mod forecast;
pub mod health;
pub mod policy;
pub mod ratios;
pub mod report;
pub mod statement;
pub mod trend;

pub mod types;

pub use error::AnalysisError;
pub use types::*;

pub use cash_flow::{analyze_cash_flow, CashFlowAnalysis, Predictability};
pub use forecast::{project, Forecast, DEFAULT_HORIZON_MONTHS};
pub use health::{score_health, HealthScore, RiskLevel};
pub use policy::ScoringPolicy;
pub use ratios::{compute_ratios, FinancialRatios};
pub use report::{build_report, AnalysisReport};
pub use statement::{build_statement, AnalysisSession, FinancialStatement, RawBusinessRecord};
pub use trend::{analyze_trend, TrendAnalysis, TrendDirection, TrendMetric, Volatility};

/// Standard result type for all analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
