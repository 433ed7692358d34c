mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::history::{ForecastArgs, ReportArgs, TrendArgs};
use commands::snapshot::SnapshotArgs;

/// Financial health analysis for GoodBuy HQ business listings
#[derive(Parser)]
#[command(
    name = "gbhq",
    version,
    about = "Financial health analysis for business listings",
    long_about = "Analyze a business listing's financial snapshot with decimal precision: \
                  ratios, a weighted 0-100 health score with a risk tier, cash-flow \
                  analysis, period-over-period trends, forward forecasts, and a combined \
                  report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute financial ratios from a business snapshot
    Ratios(SnapshotArgs),
    /// Score financial health (0-100, risk tier, qualitative read-out)
    Health(SnapshotArgs),
    /// Estimate operating/free cash flow and predictability
    Cashflow(SnapshotArgs),
    /// Compare the two most recent periods for one metric
    Trend(TrendArgs),
    /// Project revenue and profit forward with scenario bands
    Forecast(ForecastArgs),
    /// Build the full analysis report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Ratios(args) => commands::snapshot::run_ratios(args),
        Commands::Health(args) => commands::snapshot::run_health(args),
        Commands::Cashflow(args) => commands::snapshot::run_cashflow(args),
        Commands::Trend(args) => commands::history::run_trend(args),
        Commands::Forecast(args) => commands::history::run_forecast(args),
        Commands::Report(args) => commands::history::run_report(args),
        Commands::Version => {
            println!("gbhq {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
