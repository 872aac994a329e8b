#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::NaiveDate;
    use profile_core::{FactRecord, MetricSeries, METRIC_VOCABULARY};
    use serde_json::{json, Value};

    fn vocab() -> Vec<String> {
        METRIC_VOCABULARY.iter().map(|m| m.to_string()).collect()
    }

    // Helper to build a filing record with raw metric values
    fn record(form: &str, filed: &str, metrics: &[(&str, Value)]) -> FactRecord {
        FactRecord {
            form: form.to_string(),
            filing_date: Some(filed.parse().unwrap()),
            report_date: None,
            accession_number: format!("acc-{form}-{filed}"),
            metrics: metrics
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    fn dateless_record(form: &str, metrics: &[(&str, Value)]) -> FactRecord {
        let mut r = record(form, "2000-01-01", metrics);
        r.filing_date = None;
        r
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_build_series_basic() {
        let records = vec![
            record(
                "10-K",
                "2020-12-31",
                &[("Revenues", json!(100.0)), ("Assets", json!(500.0))],
            ),
            record("10-K", "2021-12-31", &[("Revenues", json!(150.0))]),
        ];

        let series = build_series(&records, &vocab());
        let revenues = series.get("Revenues").unwrap();
        assert_eq!(revenues.len(), 2);
        assert_eq!(revenues[&date("2020-12-31")], 100.0);
        assert_eq!(revenues[&date("2021-12-31")], 150.0);
        assert_eq!(series.get("Assets").unwrap().len(), 1);
    }

    #[test]
    fn test_build_series_drops_dateless_records() {
        let records = vec![
            dateless_record("10-K", &[("Revenues", json!(100.0))]),
            record("10-K", "2021-12-31", &[("Revenues", json!(150.0))]),
        ];

        let series = build_series(&records, &vocab());
        assert_eq!(series.get("Revenues").unwrap().len(), 1);
    }

    #[test]
    fn test_build_series_skips_unparseable_values() {
        let records = vec![record(
            "10-K",
            "2020-12-31",
            &[
                ("Revenues", json!("not a number")),
                ("Assets", json!("500.5")),
                ("Liabilities", json!(null)),
            ],
        )];

        let series = build_series(&records, &vocab());
        // The record survives; only the bad values are dropped.
        assert!(series.get("Revenues").is_none());
        assert!(series.get("Liabilities").is_none());
        assert_eq!(series.get("Assets").unwrap()[&date("2020-12-31")], 500.5);
    }

    #[test]
    fn test_build_series_respects_whitelist() {
        let records = vec![record(
            "10-K",
            "2020-12-31",
            &[("Revenues", json!(100.0)), ("Assets", json!(500.0))],
        )];

        let series = build_series(&records, &["Revenues".to_string()]);
        assert!(series.get("Revenues").is_some());
        assert!(series.get("Assets").is_none());
    }

    #[test]
    fn test_build_series_ignores_unknown_metrics() {
        let records = vec![record(
            "10-K",
            "2020-12-31",
            &[("DeferredTaxAssetsNet", json!(42.0))],
        )];

        let series = build_series(&records, &vocab());
        assert!(series.is_empty());
    }

    #[test]
    fn test_build_series_last_write_wins_on_same_date() {
        let records = vec![
            record("10-K", "2020-12-31", &[("Revenues", json!(100.0))]),
            record("10-K/A", "2020-12-31", &[("Revenues", json!(110.0))]),
        ];

        let series = build_series(&records, &vocab());
        assert_eq!(series.get("Revenues").unwrap()[&date("2020-12-31")], 110.0);
    }

    #[test]
    fn test_filter_records_applies_cutoff() {
        let records = vec![
            record("10-K", "2015-03-01", &[]),
            record("10-K", "2021-03-01", &[]),
            dateless_record("10-K", &[]),
        ];

        let kept = filter_records(records, Some(date("2018-01-01")));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].filing_date, Some(date("2021-03-01")));
    }

    #[test]
    fn test_filter_records_without_cutoff_keeps_dated_records() {
        let records = vec![
            record("10-K", "2015-03-01", &[]),
            dateless_record("10-K", &[]),
        ];

        let kept = filter_records(records, None);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_latest_snapshot_uses_max_date() {
        let records = vec![
            record("10-K", "2021-12-31", &[("Revenues", json!(150.0))]),
            record("10-K", "2020-12-31", &[("Revenues", json!(100.0))]),
            record("10-Q", "2021-06-30", &[("Revenues", json!(120.0))]),
        ];

        let series = build_series(&records, &vocab());
        let snapshot = latest_snapshot(&series);
        let revenues = &snapshot["Revenues"];
        assert_eq!(revenues.date, date("2021-12-31"));
        assert_eq!(revenues.value, 150.0);
        assert_eq!(
            revenues.date,
            *series.get("Revenues").unwrap().keys().last().unwrap()
        );
    }

    #[test]
    fn test_latest_snapshot_empty_series() {
        let snapshot = latest_snapshot(&MetricSeries::default());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_filing_activity_counts_and_range() {
        let records = vec![
            record("10-K", "2019-03-01", &[]),
            record("10-Q", "2019-06-01", &[]),
            record("10-K", "2020-03-01", &[]),
        ];

        let activity = filing_activity(&records);
        assert_eq!(activity.total_filings, 3);
        assert_eq!(activity.filings_by_form["10-K"], 2);
        assert_eq!(activity.filings_by_form["10-Q"], 1);
        assert_eq!(activity.first_filing_date, Some(date("2019-03-01")));
        assert_eq!(activity.last_filing_date, Some(date("2020-03-01")));
        assert_eq!(activity.filing_date_range_days, 366);
    }

    #[test]
    fn test_filing_activity_single_record() {
        let activity = filing_activity(&[record("10-K", "2020-03-01", &[])]);
        assert_eq!(activity.total_filings, 1);
        assert_eq!(activity.filing_date_range_days, 0);
    }

    #[test]
    fn test_filing_activity_empty() {
        let activity = filing_activity(&[]);
        assert_eq!(activity.total_filings, 0);
        assert_eq!(activity.first_filing_date, None);
        assert_eq!(activity.filing_date_range_days, 0);
    }

    #[test]
    fn test_merge_activity_extends_counts_and_range() {
        let prior = filing_activity(&[
            record("10-K", "2019-03-01", &[]),
            record("10-Q", "2019-06-01", &[]),
        ]);
        let newer = filing_activity(&[
            record("10-K", "2020-03-01", &[]),
            record("10-Q", "2020-06-01", &[]),
        ]);

        let merged = merge_activity(&prior, &newer);
        assert_eq!(merged.total_filings, 4);
        assert_eq!(merged.filings_by_form["10-K"], 2);
        assert_eq!(merged.filings_by_form["10-Q"], 2);
        assert_eq!(merged.first_filing_date, Some(date("2019-03-01")));
        assert_eq!(merged.last_filing_date, Some(date("2020-06-01")));
        assert_eq!(merged.filing_date_range_days, 458);
    }

    #[test]
    fn test_merge_from_overrides_same_date() {
        let base_records = vec![
            record("10-K", "2020-12-31", &[("Revenues", json!(100.0))]),
            record("10-K", "2021-12-31", &[("Revenues", json!(150.0))]),
        ];
        let newer_records = vec![
            record("10-K/A", "2021-12-31", &[("Revenues", json!(155.0))]),
            record("10-K", "2022-12-31", &[("Revenues", json!(90.0))]),
        ];

        let mut series = build_series(&base_records, &vocab());
        series.merge_from(build_series(&newer_records, &vocab()));

        let revenues = series.get("Revenues").unwrap();
        assert_eq!(revenues.len(), 3);
        assert_eq!(revenues[&date("2020-12-31")], 100.0);
        assert_eq!(revenues[&date("2021-12-31")], 155.0);
        assert_eq!(revenues[&date("2022-12-31")], 90.0);
    }
}
