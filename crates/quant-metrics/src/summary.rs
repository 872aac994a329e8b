use std::collections::BTreeMap;

use profile_core::numeric::median;
use profile_core::{MetricSeries, SummaryStats};
use statrs::statistics::Statistics;

/// Descriptive statistics per metric, over values in filing-date order.
/// Standard deviation is the population form.
pub fn summarize(series: &MetricSeries) -> BTreeMap<String, SummaryStats> {
    let mut summary = BTreeMap::new();

    for (metric, points) in &series.metrics {
        if points.is_empty() {
            continue;
        }
        let values: Vec<f64> = points.values().copied().collect();
        let v = values.as_slice();

        let mean = v.mean();
        let std_dev = v.population_std_dev();
        let coefficient_of_variation = if mean == 0.0 {
            None
        } else {
            Some(std_dev / mean)
        };

        summary.insert(
            metric.clone(),
            SummaryStats {
                count: values.len(),
                mean,
                std_dev,
                min: v.min(),
                max: v.max(),
                median: median(v),
                latest: values[values.len() - 1],
                earliest: values[0],
                coefficient_of_variation,
            },
        );
    }

    summary
}
