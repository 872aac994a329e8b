use std::collections::BTreeMap;

use profile_core::numeric::percent_changes;
use profile_core::{MetricSeries, VolatilityLevel, VolatilityStats};
use statrs::statistics::Statistics;

const MIN_POINTS: usize = 3;

/// Volatility of filing-over-filing percent changes per metric. Metrics
/// with fewer than three observations, or no valid changes, are left out.
pub fn analyze_volatility(series: &MetricSeries) -> BTreeMap<String, VolatilityStats> {
    let mut volatility = BTreeMap::new();

    for (metric, points) in &series.metrics {
        if points.len() < MIN_POINTS {
            continue;
        }
        let changes = percent_changes(points);
        if changes.is_empty() {
            continue;
        }

        let rates: Vec<f64> = changes.iter().map(|c| c.growth_rate).collect();
        let r = rates.as_slice();
        let std_dev = r.population_std_dev();

        volatility.insert(
            metric.clone(),
            VolatilityStats {
                std_dev,
                variance: r.population_variance(),
                max_swing: r.max() - r.min(),
                classification: VolatilityLevel::from_std_dev(std_dev),
            },
        );
    }

    volatility
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(metric: &str, values: &[f64]) -> MetricSeries {
        let mut s = MetricSeries::default();
        for (i, value) in values.iter().enumerate() {
            let date = format!("{}-12-31", 2015 + i).parse().unwrap();
            s.insert(metric, date, *value);
        }
        s
    }

    #[test]
    fn test_steady_growth_is_low_volatility() {
        // Two +50% changes: zero dispersion.
        let vol = analyze_volatility(&series("Revenues", &[100.0, 150.0, 225.0]));
        let v = &vol["Revenues"];
        assert_eq!(v.std_dev, 0.0);
        assert_eq!(v.variance, 0.0);
        assert_eq!(v.max_swing, 0.0);
        assert_eq!(v.classification, VolatilityLevel::Low);
    }

    #[test]
    fn test_wild_swings_are_very_high() {
        // Changes of +100% and -75%.
        let vol = analyze_volatility(&series("Revenues", &[100.0, 200.0, 50.0]));
        let v = &vol["Revenues"];
        assert!((v.std_dev - 87.5).abs() < 1e-9);
        assert!((v.variance - 7656.25).abs() < 1e-6);
        assert!((v.max_swing - 175.0).abs() < 1e-9);
        assert_eq!(v.classification, VolatilityLevel::VeryHigh);
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(VolatilityLevel::from_std_dev(9.99), VolatilityLevel::Low);
        assert_eq!(VolatilityLevel::from_std_dev(10.0), VolatilityLevel::Moderate);
        assert_eq!(VolatilityLevel::from_std_dev(24.99), VolatilityLevel::Moderate);
        assert_eq!(VolatilityLevel::from_std_dev(25.0), VolatilityLevel::High);
        assert_eq!(VolatilityLevel::from_std_dev(49.99), VolatilityLevel::High);
        assert_eq!(VolatilityLevel::from_std_dev(50.0), VolatilityLevel::VeryHigh);
    }

    #[test]
    fn test_short_history_is_skipped() {
        assert!(analyze_volatility(&series("Revenues", &[100.0, 200.0])).is_empty());
    }

    #[test]
    fn test_zero_priors_leave_no_changes() {
        assert!(analyze_volatility(&series("Revenues", &[0.0, 0.0, 0.0])).is_empty());
    }
}
