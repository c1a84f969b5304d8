//! cancelwatch - excessive order cancellation detector
//!
//! Reads an order log (`time,company,orderType,quantity` per line) and reports
//! which companies cancel an excessive share of their orders within a window.
//!
//! # Usage
//! ```sh
//! cancelwatch --file data/trades.csv involved
//! cancelwatch --format json well-behaved
//! RUST_LOG=debug cancelwatch --exhaustive-scan report
//! ```
//!
//! # Environment Variables
//! - `CANCELWATCH_INPUT` - Order log path (default: ./data/trades.csv)
//! - `CANCELWATCH_CONFIG` - TOML file with detector thresholds
//! - `CANCELWATCH_WINDOW_MS` - Window half-width in ms (default: 60000)
//! - `CANCELWATCH_MAX_CANCEL_RATIO` - Cancel ratio ceiling (default: 0.33)
//! - `CANCELWATCH_SCAN` - `contiguous` or `exhaustive` (default: contiguous)

use anyhow::{Context, Result};
use cancelwatch::application::surveillance::ExcessiveCancellationDetector;
use cancelwatch::config::Config;
use cancelwatch::domain::ports::OrderSource;
use cancelwatch::domain::surveillance::ScanPolicy;
use cancelwatch::infrastructure::reporting::{
    OutputFormat, render_involved, render_report, render_well_behaved,
};
use cancelwatch::infrastructure::sources::FileOrderSource;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Excessive order cancellation detector", long_about = None)]
struct Cli {
    /// Order log to analyse
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// TOML file with detector thresholds
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Window half-width around each order, in milliseconds
    #[arg(long, global = true)]
    window_ms: Option<i64>,

    /// Cancel ratio above which a window is excessive
    #[arg(long, global = true)]
    max_ratio: Option<Decimal>,

    /// Check every order of a company against the window (for unsorted logs)
    #[arg(long, global = true)]
    exhaustive_scan: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List companies involved in excessive cancellations
    Involved,
    /// Count companies never involved in excessive cancellations
    WellBehaved,
    /// Full analysis with the triggering window of each flagged company
    Report,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries the rendered result
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let detector_config = config
        .detector_config()
        .context("Invalid detector configuration")?;

    info!(
        "cancelwatch {} - window: ±{}ms, max cancel ratio: {}, scan: {}",
        env!("CARGO_PKG_VERSION"),
        detector_config.window_ms(),
        detector_config.max_cancel_ratio(),
        detector_config.scan()
    );

    let source = FileOrderSource::new(&config.input_path);
    let detector = ExcessiveCancellationDetector::new(detector_config);

    let output = match cli.command {
        Commands::Involved => {
            let companies = detector
                .companies_involved_from(&source)
                .context(format!("Failed to load orders from {}", source.describe()))?;
            render_involved(&companies, cli.format)?
        }
        Commands::WellBehaved => {
            let count = detector
                .total_well_behaved_from(&source)
                .context(format!("Failed to load orders from {}", source.describe()))?;
            render_well_behaved(count, cli.format)?
        }
        Commands::Report => {
            let report = detector
                .analyze_from(&source)
                .context(format!("Failed to load orders from {}", source.describe()))?;
            render_report(&report, cli.format)?
        }
    };

    print!("{}", output);
    Ok(())
}

/// Environment, then config file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(path) = &cli.config {
        config.apply_file(path)?;
    }
    if let Some(path) = &cli.file {
        config.input_path = path.clone();
    }
    if let Some(window_ms) = cli.window_ms {
        config.window_ms = window_ms;
    }
    if let Some(ratio) = cli.max_ratio {
        config.max_cancel_ratio = ratio;
    }
    if cli.exhaustive_scan {
        config.scan = ScanPolicy::Exhaustive;
    }

    Ok(config)
}
