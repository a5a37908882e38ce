//! Indicator engine.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use ta_core::{Indicator, IndicatorError, IndicatorKind, OhlcvSeries, SeriesError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bundle::IndicatorBundle;
use crate::config::EngineConfig;

/// Engine errors.
///
/// Only input problems fail a whole call; parameter problems are recorded
/// per indicator in the bundle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

/// Indicators ready to run, plus the ones rejected up front.
struct Plan {
    jobs: Vec<Arc<dyn Indicator>>,
    rejected: Vec<(IndicatorKind, IndicatorError)>,
}

/// Computes the configured indicators over a daily series.
///
/// Stateless between calls: the same series and configuration always give
/// the same bundle.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: EngineConfig,
}

impl IndicatorEngine {
    /// Create a new indicator engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute every requested indicator on the calling thread.
    pub fn compute(&self, series: &OhlcvSeries) -> Result<IndicatorBundle, EngineError> {
        series.validate()?;
        let plan = self.plan(series.len());

        info!(
            ticker = %series.ticker,
            length = series.len(),
            indicators = plan.jobs.len(),
            "Computing indicators"
        );
        let started = Instant::now();

        let mut bundle = self.start_bundle(series, &plan);
        for job in &plan.jobs {
            let job_started = Instant::now();
            let output = job.calculate(series);
            debug!(
                indicator = %job.kind(),
                series = output.len(),
                elapsed_us = job_started.elapsed().as_micros() as u64,
                "Indicator computed"
            );
            bundle.insert(job.kind(), output);
        }

        info!(
            ticker = %series.ticker,
            computed = bundle.indicators.len(),
            errors = bundle.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Indicators complete"
        );
        Ok(bundle)
    }

    /// Compute every requested indicator, one blocking task each.
    ///
    /// Gives exactly the bundle [`IndicatorEngine::compute`] gives. A task
    /// that fails to complete becomes a calculation error for its indicator.
    pub async fn compute_concurrent(
        &self,
        series: Arc<OhlcvSeries>,
    ) -> Result<IndicatorBundle, EngineError> {
        series.validate()?;
        let plan = self.plan(series.len());

        info!(
            ticker = %series.ticker,
            length = series.len(),
            indicators = plan.jobs.len(),
            "Computing indicators concurrently"
        );
        let started = Instant::now();

        let handles = plan.jobs.iter().map(|job| {
            let job = Arc::clone(job);
            let series = Arc::clone(&series);
            tokio::task::spawn_blocking(move || job.calculate(&series))
        });
        let results = join_all(handles).await;

        let mut bundle = self.start_bundle(&series, &plan);
        for (job, result) in plan.jobs.iter().zip(results) {
            match result {
                Ok(output) => {
                    debug!(indicator = %job.kind(), series = output.len(), "Indicator computed");
                    bundle.insert(job.kind(), output);
                }
                Err(e) => {
                    warn!(indicator = %job.kind(), "Indicator task failed: {}", e);
                    bundle.push_error(
                        job.kind(),
                        IndicatorError::Calculation(format!("task failed: {}", e)),
                    );
                }
            }
        }

        info!(
            ticker = %series.ticker,
            computed = bundle.indicators.len(),
            errors = bundle.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Indicators complete"
        );
        Ok(bundle)
    }

    /// Split the requested indicators into runnable jobs and rejections.
    fn plan(&self, available: usize) -> Plan {
        let mut plan = Plan {
            jobs: Vec::new(),
            rejected: Vec::new(),
        };

        // Moving averages keep their valid windows
        if let Some(ma) = &self.config.moving_average {
            let (narrowed, errors) = ma.partition(available);
            plan.admit_partial(narrowed, errors, available);
        }
        if let Some(ema) = &self.config.ema {
            let (narrowed, errors) = ema.partition(available);
            plan.admit_partial(narrowed, errors, available);
        }

        if let Some(macd) = &self.config.macd {
            plan.admit(macd.clone(), available);
        }
        if let Some(bollinger) = &self.config.bollinger {
            plan.admit(bollinger.clone(), available);
        }
        if let Some(rsi) = &self.config.rsi {
            plan.admit(rsi.clone(), available);
        }
        if let Some(stochastic) = &self.config.stochastic_slow {
            plan.admit(stochastic.clone(), available);
        }

        for (kind, error) in &plan.rejected {
            warn!(indicator = %kind, "Skipping: {}", error);
        }
        plan
    }

    fn start_bundle(&self, series: &OhlcvSeries, plan: &Plan) -> IndicatorBundle {
        let mut bundle = IndicatorBundle::new(series);

        for (kind, error) in &plan.rejected {
            bundle.push_error(*kind, error.clone());
        }
        for job in &plan.jobs {
            if let Err(warning) = job.check_warm_up(series.len()) {
                warn!(indicator = %job.kind(), "{}", warning);
                bundle.push_warning(job.kind(), warning);
            }
        }

        bundle
    }
}

impl Plan {
    fn admit<I: Indicator + 'static>(&mut self, indicator: I, available: usize) {
        match indicator.validate(available) {
            Ok(()) => self.jobs.push(Arc::new(indicator)),
            Err(error) => self.rejected.push((indicator.kind(), error)),
        }
    }

    fn admit_partial<I: Indicator + 'static>(
        &mut self,
        narrowed: I,
        errors: Vec<IndicatorError>,
        available: usize,
    ) {
        let kind = narrowed.kind();
        if errors.is_empty() {
            // Nothing rejected, but an empty window list is still invalid
            self.admit(narrowed, available);
            return;
        }
        if narrowed.warm_up() > 0 {
            self.jobs.push(Arc::new(narrowed));
        }
        self.rejected
            .extend(errors.into_iter().map(|error| (kind, error)));
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(EngineConfig::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ta_core::{InsufficientData, OhlcvRecord};
    use ta_indicators::{BollingerBands, Macd, MovingAverage};

    fn series_from_closes(ticker: &str, closes: &[f64]) -> OhlcvSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let records = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                OhlcvRecord::new(
                    start + chrono::Days::new(i as u64),
                    c,
                    c + 1.0,
                    c - 1.0,
                    c,
                    1_000_000,
                )
            })
            .collect();
        OhlcvSeries::from_records(ticker, records)
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 10.0)
            .collect()
    }

    #[test]
    fn test_compute_standard() {
        let series = series_from_closes("TEST", &wave(100));
        let bundle = IndicatorEngine::default().compute(&series).unwrap();

        assert_eq!(bundle.ticker, "TEST");
        assert_eq!(bundle.length, 100);
        assert_eq!(bundle.indicators.len(), 5);
        assert!(bundle.is_complete());
        assert!(bundle.warnings.is_empty());
        assert!(bundle.get(IndicatorKind::Ema).is_none());

        for output in bundle.indicators.values() {
            for series in output.values() {
                assert_eq!(series.len(), 100);
            }
        }
        let ma = bundle.get(IndicatorKind::MovingAverage).unwrap();
        assert_eq!(
            ma.keys().cloned().collect::<Vec<_>>(),
            vec!["ma10", "ma30", "ma5", "ma60"]
        );
    }

    #[test]
    fn test_rejects_invalid_series() {
        let engine = IndicatorEngine::default();

        assert_eq!(
            engine.compute(&OhlcvSeries::new("EMPTY")),
            Err(EngineError::InvalidSeries(SeriesError::Empty))
        );

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = OhlcvSeries::from_records(
            "DUP",
            vec![
                OhlcvRecord::new(day, 10.0, 11.0, 9.0, 10.0, 1),
                OhlcvRecord::new(day, 10.0, 11.0, 9.0, 10.0, 1),
            ],
        );
        assert!(matches!(
            engine.compute(&series),
            Err(EngineError::InvalidSeries(SeriesError::OutOfOrder { index: 1, .. }))
        ));
    }

    #[test]
    fn test_invalid_parameters_are_scoped() {
        let config = EngineConfig {
            macd: Some(Macd::new(26, 12, 9)),
            bollinger: Some(BollingerBands::new(20, 0.0)),
            ..EngineConfig::standard()
        };
        let series = series_from_closes("TEST", &wave(80));
        let bundle = IndicatorEngine::new(config).compute(&series).unwrap();

        assert!(bundle.get(IndicatorKind::Macd).is_none());
        assert!(bundle.get(IndicatorKind::Bollinger).is_none());
        assert_eq!(bundle.errors[&IndicatorKind::Macd].len(), 1);
        assert_eq!(bundle.errors[&IndicatorKind::Bollinger].len(), 1);

        assert!(bundle.get(IndicatorKind::MovingAverage).is_some());
        assert!(bundle.get(IndicatorKind::Rsi).is_some());
        assert!(bundle.get(IndicatorKind::StochasticSlow).is_some());
    }

    #[test]
    fn test_moving_average_keeps_valid_windows() {
        let config = EngineConfig {
            moving_average: Some(MovingAverage::new(vec![5, 10, 0])),
            ..EngineConfig::default()
        };
        let series = series_from_closes("TEST", &wave(8));
        let bundle = IndicatorEngine::new(config).compute(&series).unwrap();

        let ma = bundle.get(IndicatorKind::MovingAverage).unwrap();
        assert_eq!(ma.keys().cloned().collect::<Vec<_>>(), vec!["ma5"]);
        assert_eq!(bundle.errors[&IndicatorKind::MovingAverage].len(), 2);
        assert!(bundle.warnings.is_empty());
    }

    #[test]
    fn test_all_windows_rejected() {
        let config = EngineConfig {
            moving_average: Some(MovingAverage::new(vec![10])),
            ..EngineConfig::default()
        };
        let series = series_from_closes("SHORT", &wave(5));
        let bundle = IndicatorEngine::new(config).compute(&series).unwrap();

        assert!(bundle.indicators.is_empty());
        assert_eq!(
            bundle.errors[&IndicatorKind::MovingAverage],
            vec![IndicatorError::invalid("window 10 exceeds series length 5")]
        );
    }

    #[test]
    fn test_short_series_warns() {
        let series = series_from_closes("TEST", &wave(40));
        let bundle = IndicatorEngine::default().compute(&series).unwrap();

        // ma60 exceeds the series and is rejected; the rest cover a full warm-up
        assert_eq!(bundle.errors[&IndicatorKind::MovingAverage].len(), 1);
        assert!(bundle.warnings.is_empty());

        let series = series_from_closes("TEST", &wave(30));
        let bundle = IndicatorEngine::default().compute(&series).unwrap();

        assert_eq!(
            bundle.warnings.get(&IndicatorKind::Macd),
            Some(&InsufficientData {
                required: 34,
                available: 30
            })
        );
        assert_eq!(bundle.warnings.len(), 1);

        // Still computed, just never defined
        let macd = bundle.series(IndicatorKind::Macd, "macd").unwrap();
        assert_eq!(macd.len(), 30);
        assert_eq!(macd.defined_count(), 0);
    }

    #[test]
    fn test_constant_prices_scenario() {
        let series = series_from_closes("FLAT", &[100.0; 30]);
        let bundle = IndicatorEngine::default().compute(&series).unwrap();

        for name in ["ma5", "ma10", "ma30"] {
            let ma = bundle.series(IndicatorKind::MovingAverage, name).unwrap();
            assert_eq!(ma.value(29), Some(100.0));
        }
        for name in ["upper", "middle", "lower"] {
            let band = bundle.series(IndicatorKind::Bollinger, name).unwrap();
            assert_eq!(band.value(29), Some(100.0));
        }
        assert_eq!(
            bundle.series(IndicatorKind::Rsi, "rsi").unwrap().value(29),
            Some(50.0)
        );
        for name in ["k", "d"] {
            let line = bundle.series(IndicatorKind::StochasticSlow, name).unwrap();
            assert_eq!(line.value(29), Some(50.0));
        }
    }

    #[test]
    fn test_idempotent() {
        let series = series_from_closes("TEST", &wave(120));
        let engine = IndicatorEngine::new(EngineConfig::all());

        let first = engine.compute(&series).unwrap();
        let second = engine.compute(&series).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let series = series_from_closes("TEST", &wave(250));
        let config = EngineConfig {
            moving_average: Some(MovingAverage::new(vec![5, 400])),
            ..EngineConfig::all()
        };
        let engine = IndicatorEngine::new(config);

        let sequential = engine.compute(&series).unwrap();
        let concurrent = engine.compute_concurrent(Arc::new(series)).await.unwrap();

        assert_eq!(sequential, concurrent);
        assert_eq!(concurrent.indicators.len(), 6);
        assert_eq!(concurrent.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_rejects_invalid_series() {
        let engine = IndicatorEngine::default();
        let result = engine
            .compute_concurrent(Arc::new(OhlcvSeries::new("EMPTY")))
            .await;

        assert_eq!(result, Err(EngineError::InvalidSeries(SeriesError::Empty)));
    }
}
