/// Shared numeric helpers for the aggregation pipeline.
///
/// Filing facts arrive as loosely typed JSON, so value coercion is
/// best-effort: anything that does not convert to a finite float is dropped
/// rather than failing the record. Percent-change sequences are shared by
/// the growth and volatility analyses and skip pairs with a zero prior,
/// since those have no meaningful relative change.
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::GrowthPeriod;

/// Mean calendar year length, also used to resolve lookback windows.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Coerce a raw metric value to a finite float. Numbers pass through,
/// strings are parsed, everything else is absent.
pub fn parse_metric_value(raw: &serde_json::Value) -> Option<f64> {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Filing-over-filing percent changes in date order, one entry per adjacent
/// pair with a non-zero prior: `(curr - prev) / |prev| * 100`. Each change
/// is stamped with the later filing's date.
pub fn percent_changes(points: &BTreeMap<NaiveDate, f64>) -> Vec<GrowthPeriod> {
    points
        .iter()
        .zip(points.iter().skip(1))
        .filter(|((_, prev), _)| **prev != 0.0)
        .map(|((_, prev), (date, curr))| GrowthPeriod {
            period: *date,
            growth_rate: (curr - prev) / prev.abs() * 100.0,
        })
        .collect()
}

/// Median by sorted midpoint; even-length inputs average the two middles.
/// Returns 0.0 for empty input.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn points(data: &[(&str, f64)]) -> BTreeMap<NaiveDate, f64> {
        data.iter()
            .map(|(date, value)| (date.parse().unwrap(), *value))
            .collect()
    }

    #[test]
    fn test_parse_metric_value() {
        assert_eq!(parse_metric_value(&json!(42)), Some(42.0));
        assert_eq!(parse_metric_value(&json!(1.5)), Some(1.5));
        assert_eq!(parse_metric_value(&json!("1000.25")), Some(1000.25));
        assert_eq!(parse_metric_value(&json!("  7 ")), Some(7.0));
        assert_eq!(parse_metric_value(&json!("N/A")), None);
        assert_eq!(parse_metric_value(&json!("inf")), None);
        assert_eq!(parse_metric_value(&json!(null)), None);
        assert_eq!(parse_metric_value(&json!(true)), None);
        assert_eq!(parse_metric_value(&json!([1, 2])), None);
    }

    #[test]
    fn test_percent_changes() {
        let series = points(&[
            ("2020-12-31", 100.0),
            ("2021-12-31", 150.0),
            ("2022-12-31", 90.0),
        ]);
        let changes = percent_changes(&series);
        assert_eq!(changes.len(), 2);
        assert!((changes[0].growth_rate - 50.0).abs() < 1e-9);
        assert!((changes[1].growth_rate + 40.0).abs() < 1e-9);
        assert_eq!(changes[1].period, "2022-12-31".parse().unwrap());
    }

    #[test]
    fn test_percent_changes_skips_zero_prior() {
        let series = points(&[
            ("2020-12-31", 0.0),
            ("2021-12-31", 50.0),
            ("2022-12-31", 100.0),
        ]);
        let changes = percent_changes(&series);
        assert_eq!(changes.len(), 1);
        assert!((changes[0].growth_rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_changes_negative_prior() {
        let series = points(&[("2020-12-31", -100.0), ("2021-12-31", -50.0)]);
        let changes = percent_changes(&series);
        // Relative to |prev|, moving from -100 to -50 is +50%.
        assert!((changes[0].growth_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_median() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < 1e-9);
        assert!((median(&[4.0, 1.0, 2.0, 3.0]) - 2.5).abs() < 1e-9);
        assert!((median(&[50.0, -40.0]) - 5.0).abs() < 1e-9);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.66666, 4), 0.6667);
        assert_eq!(round_to(10.444999, 2), 10.44);
        assert_eq!(round_to(-0.12348, 4), -0.1235);
    }
}
