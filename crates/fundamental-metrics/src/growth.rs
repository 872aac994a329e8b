use std::collections::BTreeMap;

use profile_core::numeric::{median, percent_changes};
use profile_core::{GrowthStats, MetricSeries};

/// How many of the most recent changes are kept on the profile. The
/// average and median still cover the full history.
const RECENT_PERIODS: usize = 5;

/// Filing-over-filing growth per metric. Metrics with fewer than two
/// observations, or whose priors are all zero, are left out.
pub fn compute_growth(series: &MetricSeries) -> BTreeMap<String, GrowthStats> {
    let mut growth = BTreeMap::new();

    for (metric, points) in &series.metrics {
        if points.len() < 2 {
            continue;
        }
        let changes = percent_changes(points);
        if changes.is_empty() {
            continue;
        }

        let rates: Vec<f64> = changes.iter().map(|c| c.growth_rate).collect();
        let avg_growth_rate = rates.iter().sum::<f64>() / rates.len() as f64;
        let recent_start = changes.len().saturating_sub(RECENT_PERIODS);

        growth.insert(
            metric.clone(),
            GrowthStats {
                recent_periods: changes[recent_start..].to_vec(),
                avg_growth_rate,
                median_growth_rate: median(&rates),
                latest_growth_rate: rates[rates.len() - 1],
            },
        );
    }

    growth
}
