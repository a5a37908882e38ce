//! CLI definitions.

pub mod commands;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use ta_config::{load_config, AppConfig};
use ta_core::IndicatorKind;

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "stock-ta")]
#[command(author, version, about = "Technical indicators over daily OHLCV price history")]
pub struct Cli {
    /// Configuration file path [default: config/default.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level [default: from configuration, else info]
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute indicators over a CSV price history
    Compute(ComputeArgs),
    /// List available indicators
    Indicators,
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Data file (CSV with Date, Open, High, Low, Close, Volume)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Ticker label [default: data file name]
    #[arg(short, long)]
    pub ticker: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Only compute these indicators (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<IndicatorKind>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the JSON bundle to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    ta_data::parse_date(s).map_err(|e| e.to_string())
}

/// Load the configuration for this run.
///
/// An explicit path must load. Without one, the default file is used when
/// present, else built-in defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG)),
        None => Ok(AppConfig::default()),
    }
}
