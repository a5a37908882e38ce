//! Moving average indicators.

use serde::{Deserialize, Serialize};
use ta_core::traits::{check_window, Indicator};
use ta_core::{IndicatorError, IndicatorKind, IndicatorOutput, IndicatorSeries, OhlcvSeries};

use crate::primitives::{ema, rolling_mean};

/// Simple Moving Averages of the close at several windows.
///
/// Produces one series per window, named `ma{window}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovingAverage {
    windows: Vec<usize>,
}

impl MovingAverage {
    /// Windows used when none are configured.
    pub const DEFAULT_WINDOWS: [usize; 4] = [5, 10, 30, 60];

    /// Create with the given windows.
    pub fn new(windows: Vec<usize>) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// Output series name for a window.
    pub fn series_name(window: usize) -> String {
        format!("ma{}", window)
    }

    /// Keep the windows that can run on `available` points.
    ///
    /// Returns the narrowed indicator together with one error per rejected
    /// window.
    pub fn partition(&self, available: usize) -> (Self, Vec<IndicatorError>) {
        let (windows, errors) = partition_windows("window", &self.windows, available);
        (Self { windows }, errors)
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOWS.to_vec())
    }
}

impl Indicator for MovingAverage {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::MovingAverage
    }

    fn warm_up(&self) -> usize {
        self.windows.iter().copied().max().unwrap_or(0)
    }

    fn validate(&self, available: usize) -> Result<(), IndicatorError> {
        validate_windows("window", &self.windows, available)
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput {
        let dates = series.dates();
        let closes = series.closes();

        self.windows
            .iter()
            .map(|&window| {
                (
                    Self::series_name(window),
                    IndicatorSeries::from_values(&dates, rolling_mean(&closes, window)),
                )
            })
            .collect()
    }
}

/// Exponential Moving Averages of the close at several periods.
///
/// Produces one series per period, named `ema{period}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExponentialMovingAverage {
    periods: Vec<usize>,
}

impl ExponentialMovingAverage {
    /// Periods used when none are configured.
    pub const DEFAULT_PERIODS: [usize; 2] = [12, 26];

    /// Create with the given periods.
    pub fn new(periods: Vec<usize>) -> Self {
        Self { periods }
    }

    pub fn periods(&self) -> &[usize] {
        &self.periods
    }

    /// Output series name for a period.
    pub fn series_name(period: usize) -> String {
        format!("ema{}", period)
    }

    /// Keep the periods that can run on `available` points.
    pub fn partition(&self, available: usize) -> (Self, Vec<IndicatorError>) {
        let (periods, errors) = partition_windows("period", &self.periods, available);
        (Self { periods }, errors)
    }
}

impl Default for ExponentialMovingAverage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIODS.to_vec())
    }
}

impl Indicator for ExponentialMovingAverage {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Ema
    }

    fn warm_up(&self) -> usize {
        self.periods.iter().copied().max().unwrap_or(0)
    }

    fn validate(&self, available: usize) -> Result<(), IndicatorError> {
        validate_windows("period", &self.periods, available)
    }

    fn calculate(&self, series: &OhlcvSeries) -> IndicatorOutput {
        let dates = series.dates();
        let closes = series.closes();

        self.periods
            .iter()
            .map(|&period| {
                (
                    Self::series_name(period),
                    IndicatorSeries::from_values(&dates, ema(&closes, period)),
                )
            })
            .collect()
    }
}

fn validate_windows(name: &str, windows: &[usize], available: usize) -> Result<(), IndicatorError> {
    let (_, errors) = partition_windows(name, windows, available);
    match errors.into_iter().next() {
        Some(err) => Err(err),
        None if windows.is_empty() => Err(IndicatorError::invalid(format!(
            "at least one {} is required",
            name
        ))),
        None => Ok(()),
    }
}

fn partition_windows(
    name: &str,
    windows: &[usize],
    available: usize,
) -> (Vec<usize>, Vec<IndicatorError>) {
    let mut valid: Vec<usize> = Vec::with_capacity(windows.len());
    let mut errors = Vec::new();

    for &window in windows {
        if valid.contains(&window) {
            errors.push(IndicatorError::invalid(format!(
                "{} {} is listed more than once",
                name, window
            )));
            continue;
        }
        match check_window(name, window, available) {
            Ok(()) => valid.push(window),
            Err(err) => errors.push(err),
        }
    }

    (valid, errors)
}
