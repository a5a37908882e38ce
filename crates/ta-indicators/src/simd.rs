//! SIMD helpers shared by the rolling-window primitives.
//!
//! These use the `wide` crate for portable SIMD operations. Lane order is
//! fixed, so results are reproducible across runs.

use wide::f64x4;

/// Sum of a slice.
pub fn sum(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        simd_sum += values;
    }

    let mut result = simd_sum.reduce_add();

    // Handle remaining elements
    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// Sum of squared deviations from `mean`.
pub fn sum_squared_deviations(data: &[f64], mean: f64) -> f64 {
    let chunks = data.len() / 4;
    let mean_vec = f64x4::splat(mean);
    let mut sum_sq = 0.0;

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        let diff = values - mean_vec;
        sum_sq += (diff * diff).reduce_add();
    }

    for &value in &data[(chunks * 4)..] {
        let diff = value - mean;
        sum_sq += diff * diff;
    }

    sum_sq
}

/// Split consecutive changes into gains and losses.
///
/// Returns two vectors of length `data.len() - 1` (empty for fewer than two
/// points): `gains[i] = max(data[i+1] - data[i], 0)` and
/// `losses[i] = max(data[i] - data[i+1], 0)`.
pub fn split_changes(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if data.len() < 2 {
        return (vec![], vec![]);
    }

    let changes = data.len() - 1;
    let mut gains = Vec::with_capacity(changes);
    let mut losses = Vec::with_capacity(changes);

    let chunks = changes / 4;
    let zero = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let prev = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        let curr = f64x4::new([
            data[idx + 1],
            data[idx + 2],
            data[idx + 3],
            data[idx + 4],
        ]);

        let diff = curr - prev;
        gains.extend(diff.max(zero).to_array());
        losses.extend((-diff).max(zero).to_array());
    }

    for i in (chunks * 4)..changes {
        let change = data[i + 1] - data[i];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    (gains, losses)
}
