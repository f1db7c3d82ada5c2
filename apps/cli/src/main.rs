//! # rekap
//!
//! Sales recap reports for a POS back office, from the terminal.
//!
//! ## Usage
//! ```bash
//! # This month's report with channel, product and admin rollups
//! rekap report
//!
//! # Last week, only sales mentioning Shopee, as JSON
//! rekap report --preset weekly --search shopee --json
//!
//! # Custom range to PDF
//! rekap export --from 2024-03-01 --to 2024-03-31 --out ./reports
//!
//! # Try it out with demo data
//! rekap seed --count 200
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rekap_core::aggregate::Dimension;
use rekap_core::types::Section;
use rekap_core::window::Preset;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::RekapConfig;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,rekap=debug";

#[derive(Debug, Parser)]
#[command(name = "rekap", version, about = "Sales recap reports for a POS back office")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "REKAP_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file, overrides the configured path
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the sales report for a period
    Report(ReportArgs),
    /// Print the dashboard summary
    Dashboard(DashboardArgs),
    /// Write the report as PDF
    Export(ExportArgs),
    /// Write a demo snapshot
    Seed(SeedArgs),
}

/// Period and text filter shared by `report` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct WindowArgs {
    /// daily | weekly | monthly | yearly | all-time | custom
    #[arg(long)]
    pub preset: Option<Preset>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Case-insensitive text filter
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Rollup dimension, repeatable (default from config)
    #[arg(long = "dimension")]
    pub dimensions: Vec<Dimension>,

    /// Print the aggregation as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Reference day (default: today)
    #[arg(long)]
    pub today: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Section to include, repeatable (default: all)
    #[arg(long = "section")]
    pub sections: Vec<Section>,

    /// Output directory (default from config)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Report title (default from config)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Number of sales to generate
    #[arg(long, short = 'c', default_value_t = rekap_store::demo::DEFAULT_SALE_COUNT)]
    pub count: usize,

    /// Replace an existing snapshot
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = RekapConfig::load(cli.config.clone()).context("loading configuration")?;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    debug!(data = %config.data.path.display(), "Configuration loaded");

    match cli.command {
        Command::Report(args) => commands::report::run(&config, args).await,
        Command::Dashboard(args) => commands::dashboard::run(&config, args).await,
        Command::Export(args) => commands::export::run(&config, args).await,
        Command::Seed(args) => commands::seed::run(&config, args).await,
    }
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// clean for `--json`.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `--verbose` - Debug for everything
/// - Default: `info,rekap=debug`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
