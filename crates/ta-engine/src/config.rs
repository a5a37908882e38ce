//! Indicator selection and parameters.

use serde::{Deserialize, Serialize};
use ta_core::IndicatorKind;
use ta_indicators::{
    BollingerBands, ExponentialMovingAverage, Macd, MovingAverage, Rsi, StochasticSlow,
};

/// Which indicators to compute, and with which parameters.
///
/// An indicator is requested when its entry is present. Each entry's
/// parameters fall back to that indicator's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<MovingAverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ema: Option<ExponentialMovingAverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<Macd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBands>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<Rsi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stochastic_slow: Option<StochasticSlow>,
}

impl EngineConfig {
    /// The standard selection: moving averages, MACD, Bollinger Bands, RSI
    /// and Slow Stochastic with default parameters. EMA is opt-in.
    pub fn standard() -> Self {
        Self {
            moving_average: Some(MovingAverage::default()),
            ema: None,
            macd: Some(Macd::default()),
            bollinger: Some(BollingerBands::default()),
            rsi: Some(Rsi::default()),
            stochastic_slow: Some(StochasticSlow::default()),
        }
    }

    /// Every indicator with default parameters.
    pub fn all() -> Self {
        Self {
            ema: Some(ExponentialMovingAverage::default()),
            ..Self::standard()
        }
    }

    /// Requested indicators, in output order.
    pub fn requested(&self) -> Vec<IndicatorKind> {
        IndicatorKind::ALL
            .into_iter()
            .filter(|kind| self.is_requested(*kind))
            .collect()
    }

    pub fn is_requested(&self, kind: IndicatorKind) -> bool {
        match kind {
            IndicatorKind::MovingAverage => self.moving_average.is_some(),
            IndicatorKind::Ema => self.ema.is_some(),
            IndicatorKind::Macd => self.macd.is_some(),
            IndicatorKind::Bollinger => self.bollinger.is_some(),
            IndicatorKind::Rsi => self.rsi.is_some(),
            IndicatorKind::StochasticSlow => self.stochastic_slow.is_some(),
        }
    }

    /// Restrict to `kinds`.
    ///
    /// Configured parameters are kept; a kind that was not configured is
    /// added with default parameters.
    pub fn only(&self, kinds: &[IndicatorKind]) -> Self {
        fn pick<T: Clone + Default>(
            kinds: &[IndicatorKind],
            kind: IndicatorKind,
            current: &Option<T>,
        ) -> Option<T> {
            kinds
                .contains(&kind)
                .then(|| current.clone().unwrap_or_default())
        }

        Self {
            moving_average: pick(kinds, IndicatorKind::MovingAverage, &self.moving_average),
            ema: pick(kinds, IndicatorKind::Ema, &self.ema),
            macd: pick(kinds, IndicatorKind::Macd, &self.macd),
            bollinger: pick(kinds, IndicatorKind::Bollinger, &self.bollinger),
            rsi: pick(kinds, IndicatorKind::Rsi, &self.rsi),
            stochastic_slow: pick(kinds, IndicatorKind::StochasticSlow, &self.stochastic_slow),
        }
    }
}
