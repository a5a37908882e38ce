//! Compute command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use ta_config::AppConfig;
use ta_core::HistorySource;
use ta_data::CsvDataSource;
use ta_engine::IndicatorEngine;
use tracing::info;

use crate::cli::{ComputeArgs, OutputFormat};

pub async fn run(args: ComputeArgs, config: AppConfig) -> Result<()> {
    let ticker = args
        .ticker
        .clone()
        .unwrap_or_else(|| ticker_from_path(&args.data));
    info!("Computing indicators for {} from {}", ticker, args.data.display());

    // Load data
    let source = CsvDataSource::new(&args.data)
        .with_context(|| format!("Data file '{}' is not readable", args.data.display()))?;
    let series = source
        .daily_history(&ticker, args.start, args.end)
        .await
        .with_context(|| format!("Failed to load history for {}", ticker))?;

    // Select indicators
    let selection = if args.only.is_empty() {
        config.indicators.clone()
    } else {
        config.indicators.only(&args.only)
    };
    if selection.requested().is_empty() {
        anyhow::bail!("No indicators selected; add an [indicators] table or pass --only");
    }

    // Run engine
    let engine = IndicatorEngine::new(selection);
    let bundle = if config.engine.concurrent {
        engine.compute_concurrent(Arc::new(series)).await?
    } else {
        engine.compute(&series)?
    };

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", bundle.to_json()?),
        OutputFormat::Text => println!("{}", bundle.summary()),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = bundle.to_json()?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

/// Ticker label from a file name such as `aapl_daily.csv`.
fn ticker_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.trim_end_matches("_daily").to_uppercase())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "DATA".to_string())
}
