//! Momentum indicators.

use serde::{Deserialize, Serialize};
use ta_core::traits::{check_window, Indicator};
use ta_core::{IndicatorError, IndicatorKind, IndicatorOutput, IndicatorSeries, OhlcvSeries};

use crate::primitives::{ema, ema_of, rolling_max, rolling_mean_of, rolling_min, wilder_of};
use crate::simd;

/// MACD (Moving Average Convergence Divergence).
///
/// Uses two EMAs of the close to identify trend direction and momentum.
/// All three output series stay undefined until the signal line is, so
/// `macd`, `signal` and `histogram` share one first defined index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    /// Create a MACD with custom periods.
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    pub fn fast(&self) -> usize {
        self.fast
    }

    pub fn slow(&self) -> usize {
        self.slow
    }

    pub fn signal(&self) -> usize {
        self.signal
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Indicator for Macd {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn warm_up(&self) -> usize {
        (self.slow + self.signal).saturating_sub(1)
    }

    fn validate(&self, available: usize) -> Result<(), IndicatorError> {
        check_window("fast", self.fast, available)?;
        check_window("slow", self.slow, available)?;
        check_window("signal", self.signal, available)?;
        if self.fast >= self.slow {
            return Err(IndicatorError::invalid(format!(
                "fast period {} must be less than slow period {}",
                self.fast, self.slow
            )));
        }
        Ok(())
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput {
        let dates = series.dates();
        let closes = series.closes();

        let fast_ema = ema(&closes, self.fast);
        let slow_ema = ema(&closes, self.slow);

        let line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(fast, slow)| Some((*fast)? - (*slow)?))
            .collect();
        let signal = ema_of(line.iter().copied(), self.signal);

        // Only expose the line once the signal line exists
        let macd: Vec<Option<f64>> = line
            .iter()
            .zip(&signal)
            .map(|(m, s)| s.and(*m))
            .collect();
        let histogram: Vec<Option<f64>> = macd
            .iter()
            .zip(&signal)
            .map(|(m, s)| Some((*m)? - (*s)?))
            .collect();

        IndicatorOutput::from([
            ("macd".to_string(), IndicatorSeries::from_values(&dates, macd)),
            ("signal".to_string(), IndicatorSeries::from_values(&dates, signal)),
            (
                "histogram".to_string(),
                IndicatorSeries::from_values(&dates, histogram),
            ),
        ])
    }
}

/// How RSI averages gains and losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSmoothing {
    /// Wilder's smoothing, seeded with the mean of the first `period` changes.
    #[default]
    Wilder,
    /// Plain rolling mean of the last `period` changes.
    Simple,
}

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rsi {
    period: usize,
    smoothing: RsiSmoothing,
}

impl Rsi {
    /// Create a new RSI indicator using Wilder's smoothing.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        Self::with_smoothing(period, RsiSmoothing::Wilder)
    }

    pub fn with_smoothing(period: usize, smoothing: RsiSmoothing) -> Self {
        Self { period, smoothing }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn smoothing(&self) -> RsiSmoothing {
        self.smoothing
    }

    /// RSI from average gain and loss.
    ///
    /// No losses gives 100, or 50 when there are no gains either.
    fn from_averages(gain: f64, loss: f64) -> f64 {
        if loss == 0.0 {
            if gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            100.0 - (100.0 / (1.0 + gain / loss))
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn warm_up(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn validate(&self, available: usize) -> Result<(), IndicatorError> {
        check_window("period", self.period, available)
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput {
        let dates = series.dates();
        let closes = series.closes();

        // Changes are undefined at the first date
        let (gains, losses) = simd::split_changes(&closes);
        let align = |changes: Vec<f64>| -> Vec<Option<f64>> {
            std::iter::once(None)
                .chain(changes.into_iter().map(Some))
                .take(closes.len())
                .collect()
        };
        let gains = align(gains);
        let losses = align(losses);

        let (avg_gains, avg_losses) = match self.smoothing {
            RsiSmoothing::Wilder => (
                wilder_of(gains, self.period),
                wilder_of(losses, self.period),
            ),
            RsiSmoothing::Simple => (
                rolling_mean_of(&gains, self.period),
                rolling_mean_of(&losses, self.period),
            ),
        };

        let rsi: Vec<Option<f64>> = avg_gains
            .iter()
            .zip(&avg_losses)
            .map(|(gain, loss)| Some(Self::from_averages((*gain)?, (*loss)?)))
            .collect();

        IndicatorOutput::from([("rsi".to_string(), IndicatorSeries::from_values(&dates, rsi))])
    }
}

/// Slow Stochastic Oscillator.
///
/// Compares the close to the high-low range over `k_window` periods, then
/// smooths twice: `%K` is the mean of the raw value over `k_smooth` periods
/// and `%D` the mean of `%K` over `d_smooth` periods. The raw value is also
/// reported as `k_fast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StochasticSlow {
    k_window: usize,
    k_smooth: usize,
    d_smooth: usize,
}

impl StochasticSlow {
    /// Create a new Slow Stochastic.
    pub fn new(k_window: usize, k_smooth: usize, d_smooth: usize) -> Self {
        Self {
            k_window,
            k_smooth,
            d_smooth,
        }
    }

    pub fn k_window(&self) -> usize {
        self.k_window
    }

    pub fn k_smooth(&self) -> usize {
        self.k_smooth
    }

    pub fn d_smooth(&self) -> usize {
        self.d_smooth
    }
}

impl Default for StochasticSlow {
    fn default() -> Self {
        Self::new(14, 3, 3)
    }
}

impl Indicator for StochasticSlow {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::StochasticSlow
    }

    fn warm_up(&self) -> usize {
        (self.k_window + self.k_smooth + self.d_smooth).saturating_sub(2)
    }

    fn validate(&self, available: usize) -> Result<(), IndicatorError> {
        check_window("k_window", self.k_window, available)?;
        check_window("k_smooth", self.k_smooth, available)?;
        check_window("d_smooth", self.d_smooth, available)
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput {
        let dates = series.dates();
        let closes = series.closes();

        let highest = rolling_max(&series.highs(), self.k_window);
        let lowest = rolling_min(&series.lows(), self.k_window);

        let k_fast: Vec<Option<f64>> = closes
            .iter()
            .zip(highest.iter().zip(&lowest))
            .map(|(&close, (high, low))| {
                let (high, low) = ((*high)?, (*low)?);
                let range = high - low;
                if range == 0.0 {
                    Some(50.0)
                } else {
                    Some(100.0 * (close - low) / range)
                }
            })
            .collect();
        let k = rolling_mean_of(&k_fast, self.k_smooth);
        let d = rolling_mean_of(&k, self.d_smooth);

        IndicatorOutput::from([
            ("k_fast".to_string(), IndicatorSeries::from_values(&dates, k_fast)),
            ("k".to_string(), IndicatorSeries::from_values(&dates, k)),
            ("d".to_string(), IndicatorSeries::from_values(&dates, d)),
        ])
    }
}
