//! Benchmarks for indicator implementations.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ta_core::{Indicator, OhlcvRecord, OhlcvSeries};
use ta_indicators::{
    primitives, simd, BollingerBands, Macd, MovingAverage, Rsi, RsiSmoothing, StochasticSlow,
};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> OhlcvSeries {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            OhlcvRecord::new(
                start + chrono::Days::new(i as u64),
                close,
                close + 1.5,
                close - 1.5,
                close,
                1_000_000,
            )
        })
        .collect()
}

fn benchmark_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("Primitives");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("rolling_mean", size), &data, |b, data| {
            b.iter(|| primitives::rolling_mean(black_box(data), black_box(20)))
        });

        group.bench_with_input(BenchmarkId::new("rolling_std", size), &data, |b, data| {
            b.iter(|| primitives::rolling_std(black_box(data), black_box(20)))
        });

        group.bench_with_input(BenchmarkId::new("rolling_max", size), &data, |b, data| {
            b.iter(|| primitives::rolling_max(black_box(data), black_box(14)))
        });

        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            b.iter(|| primitives::ema(black_box(data), black_box(26)))
        });

        group.bench_with_input(BenchmarkId::new("split_changes", size), &data, |b, data| {
            b.iter(|| simd::split_changes(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Indicators");

    for size in [1000, 10000, 100000].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("moving_average", size), &series, |b, s| {
            let indicator = MovingAverage::default();
            b.iter(|| indicator.calculate(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("macd", size), &series, |b, s| {
            let indicator = Macd::default();
            b.iter(|| indicator.calculate(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("bollinger", size), &series, |b, s| {
            let indicator = BollingerBands::default();
            b.iter(|| indicator.calculate(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("rsi_wilder", size), &series, |b, s| {
            let indicator = Rsi::default();
            b.iter(|| indicator.calculate(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("rsi_simple", size), &series, |b, s| {
            let indicator = Rsi::with_smoothing(14, RsiSmoothing::Simple);
            b.iter(|| indicator.calculate(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("stochastic_slow", size), &series, |b, s| {
            let indicator = StochasticSlow::default();
            b.iter(|| indicator.calculate(black_box(s)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_primitives, benchmark_indicators);
criterion_main!(benches);
