use std::collections::BTreeMap;

use chrono::NaiveDate;
use profile_core::numeric::parse_metric_value;
use profile_core::{FactRecord, FilingActivity, MetricSeries, MetricSnapshot};

/// Drop records without a filing date, then records filed before the
/// cutoff. Order is preserved.
pub fn filter_records(records: Vec<FactRecord>, cutoff: Option<NaiveDate>) -> Vec<FactRecord> {
    records
        .into_iter()
        .filter(|record| match record.filing_date {
            Some(date) => cutoff.map_or(true, |c| date >= c),
            None => false,
        })
        .collect()
}

/// Fold records into per-metric date-keyed histories. Only whitelisted
/// metrics with convertible values land in the series; when two records
/// share a filing date for a metric, the later record in input order wins.
pub fn build_series(records: &[FactRecord], whitelist: &[String]) -> MetricSeries {
    let mut series = MetricSeries::default();
    for record in records {
        if let Some(date) = record.filing_date {
            for (metric, raw) in &record.metrics {
                if !whitelist.iter().any(|w| w == metric) {
                    continue;
                }
                if let Some(value) = parse_metric_value(raw) {
                    series.insert(metric, date, value);
                }
            }
        }
    }
    series
}

/// Most recent observation per metric.
pub fn latest_snapshot(series: &MetricSeries) -> BTreeMap<String, MetricSnapshot> {
    series
        .metrics
        .iter()
        .filter_map(|(metric, points)| {
            points.last_key_value().map(|(date, value)| {
                (
                    metric.clone(),
                    MetricSnapshot {
                        value: *value,
                        date: *date,
                    },
                )
            })
        })
        .collect()
}

/// Filing counts and date range over a record set.
pub fn filing_activity(records: &[FactRecord]) -> FilingActivity {
    let mut filings_by_form: BTreeMap<String, usize> = BTreeMap::new();
    let mut first_filing_date: Option<NaiveDate> = None;
    let mut last_filing_date: Option<NaiveDate> = None;

    for record in records {
        *filings_by_form.entry(record.form.clone()).or_insert(0) += 1;
        if let Some(date) = record.filing_date {
            first_filing_date = Some(first_filing_date.map_or(date, |d| d.min(date)));
            last_filing_date = Some(last_filing_date.map_or(date, |d| d.max(date)));
        }
    }

    FilingActivity {
        total_filings: records.len(),
        filings_by_form,
        first_filing_date,
        last_filing_date,
        filing_date_range_days: date_range_days(first_filing_date, last_filing_date),
    }
}

/// Extend prior filing activity with activity over strictly newer records:
/// counts add up and the date range widens.
pub fn merge_activity(prior: &FilingActivity, newer: &FilingActivity) -> FilingActivity {
    let mut filings_by_form = prior.filings_by_form.clone();
    for (form, count) in &newer.filings_by_form {
        *filings_by_form.entry(form.clone()).or_insert(0) += count;
    }

    let first_filing_date = earliest(prior.first_filing_date, newer.first_filing_date);
    let last_filing_date = latest(prior.last_filing_date, newer.last_filing_date);

    FilingActivity {
        total_filings: prior.total_filings + newer.total_filings,
        filings_by_form,
        first_filing_date,
        last_filing_date,
        filing_date_range_days: date_range_days(first_filing_date, last_filing_date),
    }
}

fn date_range_days(first: Option<NaiveDate>, last: Option<NaiveDate>) -> i64 {
    match (first, last) {
        (Some(f), Some(l)) => (l - f).num_days(),
        _ => 0,
    }
}

fn earliest(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn latest(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[cfg(test)]
mod builder_tests;
