use clap::Args;
use serde_json::Value;

use goodbuy_analysis::forecast::{project, DEFAULT_HORIZON_MONTHS};
use goodbuy_analysis::report::build_report;
use goodbuy_analysis::trend::{analyze_trend, TrendMetric};

use super::snapshot::{resolve_session, SnapshotArgs};

/// Arguments for period-over-period trend analysis
#[derive(Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Metric to compare: revenue, gross_profit, net_income, cash_flow,
    /// or total_assets
    #[arg(long, default_value = "revenue")]
    pub metric: String,
}

/// Arguments for forward projection
#[derive(Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Projection horizon in months
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    pub horizon_months: u32,
}

/// Arguments for the combined report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

pub fn run_trend(args: TrendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = resolve_session(&args.snapshot)?;
    let metric: TrendMetric = args.metric.parse()?;
    let trend = analyze_trend(session.statements(), metric)?;
    Ok(serde_json::to_value(trend)?)
}

pub fn run_forecast(args: ForecastArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = resolve_session(&args.snapshot)?;
    let latest = session.latest().ok_or("No statements supplied")?;
    let forecast = project(latest, session.statements(), args.horizon_months);
    Ok(serde_json::to_value(forecast)?)
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = resolve_session(&args.snapshot)?;
    let report = build_report(&session)?;
    Ok(serde_json::to_value(report)?)
}
