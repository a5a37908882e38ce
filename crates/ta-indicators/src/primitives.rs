//! Smoothing and rolling-window primitives.
//!
//! Every function returns exactly one output per input position, with
//! `None` while a window or seed is still filling. Functions ending in `_of`
//! accept inputs that may themselves be undefined: an undefined input is
//! "not yet available", so accumulation starts at the first defined value
//! and restarts after any gap.

use std::collections::VecDeque;

use crate::simd;

/// Running state of an exponential moving average.
///
/// The first `period` values seed the average with their simple mean; each
/// later value updates it with `k = 2 / (period + 1)`.
#[derive(Debug, Clone, Copy)]
pub struct EmaAccumulator {
    period: usize,
    multiplier: f64,
    count: usize,
    sum: f64,
    current: Option<f64>,
}

impl EmaAccumulator {
    /// Create an empty accumulator.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            count: 0,
            sum: 0.0,
            current: None,
        }
    }

    /// Feed one value and return the current average, if seeded.
    pub fn push(&mut self, value: Option<f64>) -> Option<f64> {
        let Some(value) = value else {
            *self = Self::new(self.period);
            return None;
        };

        match self.current {
            Some(prev) => {
                self.current = Some(value * self.multiplier + prev * (1.0 - self.multiplier));
            }
            None => {
                self.count += 1;
                self.sum += value;
                if self.count == self.period {
                    self.current = Some(self.sum / self.period as f64);
                }
            }
        }

        self.current
    }
}

/// Running state of Wilder's smoothing.
///
/// Seeded like [`EmaAccumulator`], but updated with
/// `avg = (avg * (period - 1) + value) / period`.
#[derive(Debug, Clone, Copy)]
pub struct WilderAccumulator {
    period: usize,
    count: usize,
    sum: f64,
    current: Option<f64>,
}

impl WilderAccumulator {
    /// Create an empty accumulator.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            count: 0,
            sum: 0.0,
            current: None,
        }
    }

    /// Feed one value and return the current average, if seeded.
    pub fn push(&mut self, value: Option<f64>) -> Option<f64> {
        let Some(value) = value else {
            *self = Self::new(self.period);
            return None;
        };

        let period = self.period as f64;
        match self.current {
            Some(prev) => {
                self.current = Some((prev * (period - 1.0) + value) / period);
            }
            None => {
                self.count += 1;
                self.sum += value;
                if self.count == self.period {
                    self.current = Some(self.sum / period);
                }
            }
        }

        self.current
    }
}

/// Exponential moving average of a fully defined series.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    ema_of(values.iter().copied().map(Some), period)
}

/// Exponential moving average of a partially defined series.
pub fn ema_of<I>(values: I, period: usize) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .scan(EmaAccumulator::new(period), |acc, value| Some(acc.push(value)))
        .collect()
}

/// Wilder's smoothing of a partially defined series.
pub fn wilder_of<I>(values: I, period: usize) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .scan(WilderAccumulator::new(period), |acc, value| Some(acc.push(value)))
        .collect()
}

/// Rolling mean over `[t - window + 1, t]`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let window_f64 = window as f64;

    // Initial sum
    let mut sum = simd::sum(&values[..window]);
    result[window - 1] = Some(sum / window_f64);

    // Sliding window
    for i in window..values.len() {
        sum = sum - values[i - window] + values[i];
        result[i] = Some(sum / window_f64);
    }

    result
}

/// Rolling mean of a partially defined series.
///
/// A window is defined only when all of its inputs are. Each window is
/// summed afresh, so inputs bounded to a range give means in that range.
pub fn rolling_mean_of(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 {
        return result;
    }

    let window_f64 = window as f64;
    let mut run = 0;

    for (i, value) in values.iter().enumerate() {
        run = if value.is_some() { run + 1 } else { 0 };
        if run >= window {
            let sum: f64 = values[i + 1 - window..=i].iter().flatten().sum();
            result[i] = Some(sum / window_f64);
        }
    }

    result
}

/// Rolling population standard deviation (divides by `window`).
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    let window_f64 = window as f64;

    for (i, slice) in values.windows(window).enumerate() {
        let mean = simd::sum(slice) / window_f64;
        let variance = simd::sum_squared_deviations(slice, mean) / window_f64;
        result[i + window - 1] = Some(variance.sqrt());
    }

    result
}

/// Rolling maximum over `[t - window + 1, t]`.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |incoming, queued| incoming >= queued)
}

/// Rolling minimum over `[t - window + 1, t]`.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_extreme(values, window, |incoming, queued| incoming <= queued)
}

/// Monotonic deque of indices: the front always holds the window's extreme.
/// `dominates(incoming, queued)` says when a queued value can never be the
/// extreme again.
fn rolling_extreme(
    values: &[f64],
    window: usize,
    dominates: impl Fn(f64, f64) -> bool,
) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if window == 0 {
        return result;
    }

    let mut deque: VecDeque<usize> = VecDeque::with_capacity(window);

    for (i, &value) in values.iter().enumerate() {
        while let Some(&back) = deque.back() {
            if dominates(value, values[back]) {
                deque.pop_back();
            } else {
                break;
            }
        }
        deque.push_back(i);

        // Drop the index that just left the window
        if let Some(&front) = deque.front() {
            if front + window <= i {
                deque.pop_front();
            }
        }

        if i + 1 >= window {
            result[i] = deque.front().map(|&idx| values[idx]);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value should be defined");
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_ema_seed_and_recurrence() {
        let result = ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        assert_eq!(result.len(), 5);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_close(result[2], 2.0); // SMA of first 3
        // k = 2/(3+1) = 0.5; 4 * 0.5 + 2 * 0.5 = 3
        assert_close(result[3], 3.0);
        assert_close(result[4], 4.0);
    }

    #[test]
    fn test_ema_of_starts_at_first_defined() {
        let values = vec![None, None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let result = ema_of(values, 3);

        assert_eq!(&result[..4], &[None, None, None, None]);
        assert_close(result[4], 2.0);
        assert_close(result[5], 3.0);
    }

    #[test]
    fn test_ema_zero_period_never_defines() {
        assert!(ema(&[1.0, 2.0, 3.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn test_wilder_uses_one_over_n() {
        let values = vec![None, Some(2.0), Some(4.0), Some(6.0), Some(10.0)];
        let result = wilder_of(values, 3);

        assert_eq!(&result[..3], &[None, None, None]);
        assert_close(result[3], 4.0); // (2 + 4 + 6) / 3
        // (4 * 2 + 10) / 3 = 6
        assert_close(result[4], 6.0);
    }

    #[test]
    fn test_wilder_differs_from_ema() {
        let values: Vec<f64> = vec![1.0, 2.0, 3.0, 10.0];
        let wilder = wilder_of(values.iter().copied().map(Some), 3);
        let exponential = ema(&values, 3);

        assert_close(wilder[3], (2.0 * 2.0 + 10.0) / 3.0);
        assert_close(exponential[3], 10.0 * 0.5 + 2.0 * 0.5);
    }

    #[test]
    fn test_accumulator_restarts_after_gap() {
        let mut acc = EmaAccumulator::new(2);
        assert_eq!(acc.push(Some(1.0)), None);
        assert_eq!(acc.push(Some(3.0)), Some(2.0));
        assert_eq!(acc.push(None), None);
        assert_eq!(acc.push(Some(5.0)), None);
        assert_eq!(acc.push(Some(7.0)), Some(6.0));
    }

    #[test]
    fn test_rolling_mean() {
        let result = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        assert_eq!(result[..2], [None, None]);
        assert_close(result[2], 2.0);
        assert_close(result[3], 3.0);
        assert_close(result[4], 4.0);
    }

    #[test]
    fn test_rolling_mean_window_longer_than_data() {
        let result = rolling_mean(&[1.0, 2.0, 3.0], 5);
        assert_eq!(result, vec![None, None, None]);
    }

    #[test]
    fn test_rolling_mean_of_requires_full_window() {
        let values = vec![None, Some(10.0), Some(20.0), Some(30.0), Some(40.0)];
        let result = rolling_mean_of(&values, 3);

        assert_eq!(result[..3], [None, None, None]);
        assert_close(result[3], 20.0);
        assert_close(result[4], 30.0);
    }

    #[test]
    fn test_rolling_std_population() {
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = rolling_std(&data, 8);

        assert!(result[..7].iter().all(Option::is_none));
        // Population std dev of [2,4,4,4,5,5,7,9] = 2
        assert_close(result[7], 2.0);

        let short = rolling_std(&[2.0, 4.0, 6.0], 3);
        // Variance = (4 + 0 + 4) / 3
        assert_close(short[2], (8.0_f64 / 3.0).sqrt());
    }

    #[test]
    fn test_rolling_extrema() {
        let data = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];

        let max = rolling_max(&data, 3);
        let min = rolling_min(&data, 3);

        assert_eq!(max[..2], [None, None]);
        assert_eq!(
            max[2..],
            [Some(4.0), Some(4.0), Some(5.0), Some(9.0), Some(9.0), Some(9.0)]
        );
        assert_eq!(
            min[2..],
            [Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(2.0), Some(2.0)]
        );
    }

    #[test]
    fn test_rolling_extrema_match_naive_scan() {
        let data: Vec<f64> = (0..50)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0)
            .collect();
        let window = 7;

        let max = rolling_max(&data, window);
        let min = rolling_min(&data, window);

        for i in (window - 1)..data.len() {
            let slice = &data[i + 1 - window..=i];
            let naive_max = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let naive_min = slice.iter().cloned().fold(f64::INFINITY, f64::min);
            assert_eq!(max[i], Some(naive_max));
            assert_eq!(min[i], Some(naive_min));
        }
    }
}
