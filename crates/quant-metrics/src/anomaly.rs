use std::collections::BTreeMap;

use profile_core::{AnomalyStats, MetricSeries};
use statrs::statistics::Statistics;

const MIN_POINTS: usize = 5;
const Z_THRESHOLD: f64 = 2.0;

/// Flag outliers per metric via absolute z-scores against the metric's own
/// history. Histories shorter than five points, or with zero variance, are
/// silently skipped.
pub fn detect_anomalies(series: &MetricSeries) -> BTreeMap<String, AnomalyStats> {
    let mut anomalies = BTreeMap::new();

    for (metric, points) in &series.metrics {
        if points.len() < MIN_POINTS {
            continue;
        }
        let values: Vec<f64> = points.values().copied().collect();
        let v = values.as_slice();
        let mean = v.mean();
        let std_dev = v.population_std_dev();
        if std_dev == 0.0 {
            continue;
        }

        let z_scores: Vec<f64> = values.iter().map(|x| (x - mean).abs() / std_dev).collect();
        let anomaly_count = z_scores.iter().filter(|z| **z > Z_THRESHOLD).count();

        anomalies.insert(
            metric.clone(),
            AnomalyStats {
                anomaly_count,
                anomaly_percentage: anomaly_count as f64 / values.len() as f64 * 100.0,
                max_z_score: z_scores.as_slice().max(),
            },
        );
    }

    anomalies
}
