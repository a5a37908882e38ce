//! Technical indicator CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration feeds the logging defaults, so load it first
    let config = cli::resolve_config(cli.config.as_deref());

    let (log_level, json_logs) = match &config {
        Ok(config) => (
            cli.log_level
                .map(|level| level.as_str().to_string())
                .unwrap_or_else(|| config.logging.level.clone()),
            cli.json_logs || config.logging.format.eq_ignore_ascii_case("json"),
        ),
        Err(_) => (
            cli.log_level.unwrap_or(cli::LogLevel::Info).as_str().to_string(),
            cli.json_logs,
        ),
    };
    setup_logging(&log_level, json_logs);

    // Execute command
    match cli.command {
        Commands::Compute(args) => cli::commands::compute::run(args, config?).await,
        Commands::Indicators => cli::commands::indicators::run(),
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref(), config),
    }
}
