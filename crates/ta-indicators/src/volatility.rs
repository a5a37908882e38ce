//! Volatility indicators.

use serde::{Deserialize, Serialize};
use ta_core::traits::{check_window, Indicator};
use ta_core::{IndicatorError, IndicatorKind, IndicatorOutput, IndicatorSeries, OhlcvSeries};

use crate::primitives::{rolling_mean, rolling_std};

/// Bollinger Bands.
///
/// A middle band (SMA of the close) with upper and lower bands placed
/// `multiplier` population standard deviations away. Also reports the
/// relative band width and `%B`, the close's position within the bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BollingerBands {
    window: usize,
    multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands.
    ///
    /// Standard parameters: window 20, multiplier 2.0.
    pub fn new(window: usize, multiplier: f64) -> Self {
        Self { window, multiplier }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl Indicator for BollingerBands {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Bollinger
    }

    fn warm_up(&self) -> usize {
        self.window
    }

    fn validate(&self, available: usize) -> Result<(), IndicatorError> {
        check_window("window", self.window, available)?;
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(IndicatorError::invalid(format!(
                "multiplier must be a positive finite number, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput {
        let dates = series.dates();
        let closes = series.closes();
        let n = closes.len();

        let middle = rolling_mean(&closes, self.window);
        let std_dev = rolling_std(&closes, self.window);

        let mut upper = vec![None; n];
        let mut lower = vec![None; n];
        let mut bandwidth = vec![None; n];
        let mut percent_b = vec![None; n];

        for t in 0..n {
            let (Some(mid), Some(std)) = (middle[t], std_dev[t]) else {
                continue;
            };
            let up = mid + self.multiplier * std;
            let low = mid - self.multiplier * std;

            upper[t] = Some(up);
            lower[t] = Some(low);
            if mid != 0.0 {
                bandwidth[t] = Some((up - low) / mid);
            }
            // Collapsed bands put the close at the midpoint
            percent_b[t] = Some(if up == low {
                0.5
            } else {
                (closes[t] - low) / (up - low)
            });
        }

        IndicatorOutput::from([
            ("upper".to_string(), IndicatorSeries::from_values(&dates, upper)),
            ("middle".to_string(), IndicatorSeries::from_values(&dates, middle)),
            ("lower".to_string(), IndicatorSeries::from_values(&dates, lower)),
            (
                "bandwidth".to_string(),
                IndicatorSeries::from_values(&dates, bandwidth),
            ),
            (
                "percent_b".to_string(),
                IndicatorSeries::from_values(&dates, percent_b),
            ),
        ])
    }
}
