use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use goodbuy_analysis::cash_flow::analyze_cash_flow;
use goodbuy_analysis::health::score_health;
use goodbuy_analysis::ratios::compute_ratios;
use goodbuy_analysis::statement::{AnalysisSession, RawBusinessRecord};

use crate::input;

/// A business snapshot from flags, a file, or piped stdin.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SnapshotArgs {
    /// Path to a JSON or YAML input file: one record, or a chronological
    /// array (most recent last). Overrides individual flags.
    #[arg(long)]
    pub input: Option<String>,

    /// Annual revenue
    #[arg(long)]
    pub annual_revenue: Option<Decimal>,

    /// Profit per month (annualized internally)
    #[arg(long)]
    pub monthly_profit: Option<Decimal>,

    /// Annual net income (overrides --monthly-profit)
    #[arg(long)]
    pub net_income: Option<Decimal>,

    /// Annual gross profit
    #[arg(long)]
    pub gross_profit: Option<Decimal>,

    /// Annual operating expenses
    #[arg(long)]
    pub operating_expenses: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Reported annual cash flow
    #[arg(long)]
    pub cash_flow: Option<Decimal>,

    /// Revenue for the comparable prior year
    #[arg(long)]
    pub prior_annual_revenue: Option<Decimal>,

    /// Employee headcount
    #[arg(long)]
    pub employees: Option<u32>,
}

impl SnapshotArgs {
    fn to_record(&self) -> RawBusinessRecord {
        RawBusinessRecord {
            annual_revenue: self.annual_revenue,
            monthly_profit: self.monthly_profit,
            net_income: self.net_income,
            gross_profit: self.gross_profit,
            operating_expenses: self.operating_expenses,
            total_assets: self.total_assets,
            total_liabilities: self.total_liabilities,
            cash_flow: self.cash_flow,
            prior_annual_revenue: self.prior_annual_revenue,
            employees: self.employees,
            period_end: None,
        }
    }
}

/// Resolve the statement history: file, then piped stdin, then flags.
pub fn resolve_records(
    args: &SnapshotArgs,
) -> Result<Vec<RawBusinessRecord>, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_records(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return input::file::records_from_value(data);
    }
    Ok(vec![args.to_record()])
}

/// Build a session from the resolved records, preserving order.
pub fn resolve_session(
    args: &SnapshotArgs,
) -> Result<AnalysisSession, Box<dyn std::error::Error>> {
    let mut session = AnalysisSession::new();
    for record in resolve_records(args)? {
        session.import(&record);
    }
    Ok(session)
}

pub fn run_ratios(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = resolve_session(&args)?;
    let statement = session.latest().ok_or("No statements supplied")?;
    let ratios = compute_ratios(statement);
    Ok(serde_json::to_value(ratios)?)
}

pub fn run_health(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = resolve_session(&args)?;
    let statement = session.latest().ok_or("No statements supplied")?;
    let score = score_health(&compute_ratios(statement));
    Ok(serde_json::to_value(score)?)
}

pub fn run_cashflow(args: SnapshotArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let session = resolve_session(&args)?;
    let statement = session.latest().ok_or("No statements supplied")?;
    let analysis = analyze_cash_flow(statement, session.statements());
    Ok(serde_json::to_value(analysis)?)
}
