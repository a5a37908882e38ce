//! List indicators command.

use anyhow::Result;
use serde::Serialize;
use ta_core::IndicatorKind;
use ta_engine::EngineConfig;
use ta_indicators::{
    BollingerBands, ExponentialMovingAverage, Macd, MovingAverage, Rsi, StochasticSlow,
};

pub fn run() -> Result<()> {
    let standard = EngineConfig::standard();

    println!("Available Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for kind in IndicatorKind::ALL {
        let (defaults, series) = describe(kind)?;
        let marker = if standard.is_requested(kind) {
            ""
        } else {
            "  (opt-in)"
        };

        println!("  {}{}", kind.id(), marker);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", kind.title());
        println!("  Series:   {}", series.join(", "));
        println!("  Defaults: {}", defaults);
        println!();
    }

    println!("Use --only <id,...> to select indicators.");

    Ok(())
}

/// Default parameters and output series names.
fn describe(kind: IndicatorKind) -> Result<(String, Vec<String>)> {
    fn params<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }
    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    Ok(match kind {
        IndicatorKind::MovingAverage => {
            let ma = MovingAverage::default();
            let series: Vec<String> = ma
                .windows()
                .iter()
                .map(|&w| MovingAverage::series_name(w))
                .collect();
            (params(&ma)?, series)
        }
        IndicatorKind::Ema => {
            let ema = ExponentialMovingAverage::default();
            let series: Vec<String> = ema
                .periods()
                .iter()
                .map(|&p| ExponentialMovingAverage::series_name(p))
                .collect();
            (params(&ema)?, series)
        }
        IndicatorKind::Macd => (
            params(&Macd::default())?,
            names(&["macd", "signal", "histogram"]),
        ),
        IndicatorKind::Bollinger => (
            params(&BollingerBands::default())?,
            names(&["upper", "middle", "lower", "bandwidth", "percent_b"]),
        ),
        IndicatorKind::Rsi => (params(&Rsi::default())?, names(&["rsi"])),
        IndicatorKind::StochasticSlow => (
            params(&StochasticSlow::default())?,
            names(&["k_fast", "k", "d"]),
        ),
    })
}
