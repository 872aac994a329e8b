use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};
use profile_core::{MetricSeries, TrendDirection, TrendFeatures, TrendStrength};
use statrs::statistics::Statistics;

const MIN_POINTS: usize = 3;
const MIN_POINTS_FOR_ACCELERATION: usize = 4;

/// Ordinary least squares over each metric history, regressing values on
/// their filing index 0..n-1. Histories shorter than three points, and
/// degenerate fits, are left out.
pub fn fit_trends(series: &MetricSeries) -> BTreeMap<String, TrendFeatures> {
    let mut trends = BTreeMap::new();

    for (metric, points) in &series.metrics {
        if points.len() < MIN_POINTS {
            continue;
        }
        let values: Vec<f64> = points.values().copied().collect();
        if let Some(trend) = fit_one(&values) {
            trends.insert(metric.clone(), trend);
        }
    }

    trends
}

fn fit_one(values: &[f64]) -> Option<TrendFeatures> {
    let n = values.len();
    let design = DMatrix::from_fn(n, 2, |row, col| if col == 0 { row as f64 } else { 1.0 });
    let response = DVector::from_column_slice(values);
    let coeffs = design.svd(true, true).solve(&response, f64::EPSILON).ok()?;
    let slope = coeffs[0];
    let intercept = coeffs[1];

    let mean = values.mean();
    let ss_tot: f64 = values.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| (y - (slope * i as f64 + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let acceleration = if n >= MIN_POINTS_FOR_ACCELERATION {
        let half = n / 2;
        let early = &values[..half];
        let late = &values[half..];
        Some(late.mean() - early.mean())
    } else {
        None
    };

    Some(TrendFeatures {
        slope,
        intercept,
        r_squared,
        direction: TrendDirection::from_slope(slope),
        strength: TrendStrength::from_r_squared(r_squared),
        acceleration,
    })
}
