//! Indicator identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of each indicator the engine can compute.
///
/// Also the key of the result bundle, so its ordering fixes the bundle
/// ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    MovingAverage,
    Ema,
    Macd,
    Bollinger,
    Rsi,
    StochasticSlow,
}

impl IndicatorKind {
    /// Every indicator, in bundle order.
    pub const ALL: [IndicatorKind; 6] = [
        IndicatorKind::MovingAverage,
        IndicatorKind::Ema,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
        IndicatorKind::Rsi,
        IndicatorKind::StochasticSlow,
    ];

    /// Configuration and bundle key.
    pub fn id(&self) -> &'static str {
        match self {
            IndicatorKind::MovingAverage => "moving_average",
            IndicatorKind::Ema => "ema",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::StochasticSlow => "stochastic_slow",
        }
    }

    /// Human readable name.
    pub fn title(&self) -> &'static str {
        match self {
            IndicatorKind::MovingAverage => "Simple Moving Averages",
            IndicatorKind::Ema => "Exponential Moving Averages",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Bollinger => "Bollinger Bands",
            IndicatorKind::Rsi => "Relative Strength Index",
            IndicatorKind::StochasticSlow => "Stochastic Slow",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for IndicatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        IndicatorKind::ALL
            .into_iter()
            .find(|k| k.id() == normalized)
            .ok_or_else(|| format!("Unknown indicator: {}", s))
    }
}
