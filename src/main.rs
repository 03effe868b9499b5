//! CLI entry point for the Cosit recording completeness tool.
//!
//! Provides subcommands for analyzing a count export and writing the
//! detailed, yearly and per-sensor completeness tables, or just logging the
//! totals.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cosit_completeness::analyzers::analyzer::analyze;
use cosit_completeness::analyzers::types::CompletenessReport;
use cosit_completeness::{
    clock::{Clock, FixedClock, SystemClock},
    config::AnalysisConfig,
    ingest::load_observations,
    output::{log_summary, print_json, write_report},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cosit_completeness")]
#[command(about = "Measure how completely counting sites cover the calendar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a count CSV and write the completeness tables
    Analyze {
        /// CSV file containing the count records
        #[arg(value_name = "INPUT")]
        input: String,

        /// Directory to write the report CSVs to
        #[arg(short, long, default_value = "data-quality-reports")]
        output_dir: String,

        /// Optional JSON file overriding column names and timestamp format
        #[arg(short, long)]
        config: Option<String>,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Gzip compress the report CSVs
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Also log the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Analyze a count CSV and only log the totals
    Summary {
        /// CSV file containing the count records
        #[arg(value_name = "INPUT")]
        input: String,

        /// Optional JSON file overriding column names and timestamp format
        #[arg(short, long)]
        config: Option<String>,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/cosit_completeness.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cosit_completeness.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output_dir,
            config,
            today,
            gzip,
            json,
        } => {
            let report = run(&input, config.as_deref(), today)?;

            let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
            write_report(Path::new(&output_dir), &report, &stamp, gzip)?;

            if json {
                print_json(&report)?;
            }
            log_summary(&report);
        }
        Commands::Summary {
            input,
            config,
            today,
        } => {
            let report = run(&input, config.as_deref(), today)?;
            log_summary(&report);
        }
    }

    Ok(())
}

/// Loads the input and runs the completeness pipeline against either the
/// pinned date or the system clock.
#[tracing::instrument(skip(config_path))]
fn run(input: &str, config_path: Option<&str>, today: Option<NaiveDate>) -> Result<CompletenessReport> {
    let config = AnalysisConfig::load_or_default(config_path)
        .with_context(|| format!("failed to load config {:?}", config_path))?;
    info!(
        sensor_column = %config.sensor_column,
        timestamp_column = %config.timestamp_column,
        "Using input columns"
    );

    let observations = load_observations(input, &config)
        .with_context(|| format!("failed to read observations from {}", input))?;

    let clock: Box<dyn Clock> = match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    Ok(analyze(&observations, &config.timestamp_format, clock.as_ref())?)
}
