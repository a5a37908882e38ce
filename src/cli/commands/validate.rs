//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::AppConfig;

use crate::cli::DEFAULT_CONFIG;

pub fn run(config_path: Option<&Path>, config: Result<AppConfig>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            println!("Validating configuration: {:?}", DEFAULT_CONFIG)
        }
        None => println!("No configuration file; using built-in defaults"),
    }

    match config {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Concurrent engine: {}", config.engine.concurrent);
            let requested: Vec<&str> = config
                .indicators
                .requested()
                .iter()
                .map(|kind| kind.id())
                .collect();
            println!("Indicators: {}", requested.join(", "));
            println!();
            println!("Effective configuration:");
            println!("{}", config.to_toml()?);
        }
        Err(e) => {
            println!("Configuration error: {:#}", e);
            return Err(e);
        }
    }

    Ok(())
}
