use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One filing-derived fact record, as produced by the upstream extraction
/// layer. Metric values arrive as raw JSON and may be non-numeric; see
/// [`crate::numeric::parse_metric_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    pub form: String,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    pub accession_number: String,
    #[serde(default)]
    pub metrics: BTreeMap<String, serde_json::Value>,
}

/// Per-metric history keyed by filing date, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries {
    pub metrics: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl MetricSeries {
    pub fn insert(&mut self, metric: &str, date: NaiveDate, value: f64) {
        self.metrics
            .entry(metric.to_string())
            .or_default()
            .insert(date, value);
    }

    /// Union another series into this one. Incoming values override
    /// entries that share a filing date.
    pub fn merge_from(&mut self, newer: MetricSeries) {
        for (metric, points) in newer.metrics {
            self.metrics.entry(metric).or_default().extend(points);
        }
    }

    pub fn get(&self, metric: &str) -> Option<&BTreeMap<NaiveDate, f64>> {
        self.metrics.get(metric)
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Most recent observation of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub value: f64,
    pub date: NaiveDate,
}

/// Filing-level metadata over the records that fed a profile.
/// `last_filing_date` doubles as the high-water mark for incremental runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilingActivity {
    pub total_filings: usize,
    pub filings_by_form: BTreeMap<String, usize>,
    #[serde(default)]
    pub first_filing_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_filing_date: Option<NaiveDate>,
    pub filing_date_range_days: i64,
}

/// Point-in-time ratios off the latest snapshot. A ratio is absent when an
/// input metric is missing or its denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_to_assets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_to_equity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_turnover: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_on_equity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_on_assets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_ratio: Option<f64>,
}

/// One filing-over-filing percent change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPeriod {
    pub period: NaiveDate,
    pub growth_rate: f64,
}

/// Growth profile of a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    /// Up to the five most recent changes, oldest first.
    pub recent_periods: Vec<GrowthPeriod>,
    pub avg_growth_rate: f64,
    pub median_growth_rate: f64,
    pub latest_growth_rate: f64,
}

/// Descriptive statistics of a single metric history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub latest: f64,
    pub earliest: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient_of_variation: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

impl TrendStrength {
    pub fn from_r_squared(r_squared: f64) -> Self {
        let r2 = r_squared.abs();
        if r2 > 0.7 {
            TrendStrength::Strong
        } else if r2 > 0.4 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendStrength::Strong => "strong",
            TrendStrength::Moderate => "moderate",
            TrendStrength::Weak => "weak",
        }
    }
}

/// Linear trend of a single metric over its filing index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendFeatures {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// Mean of the later half minus mean of the earlier half; absent for
    /// histories shorter than four points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl VolatilityLevel {
    /// Classify by standard deviation of filing-over-filing percent changes.
    pub fn from_std_dev(std_dev: f64) -> Self {
        if std_dev < 10.0 {
            VolatilityLevel::Low
        } else if std_dev < 25.0 {
            VolatilityLevel::Moderate
        } else if std_dev < 50.0 {
            VolatilityLevel::High
        } else {
            VolatilityLevel::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "Low",
            VolatilityLevel::Moderate => "Moderate",
            VolatilityLevel::High => "High",
            VolatilityLevel::VeryHigh => "Very High",
        }
    }
}

/// Dispersion of filing-over-filing percent changes for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityStats {
    pub std_dev: f64,
    pub variance: f64,
    pub max_swing: f64,
    pub classification: VolatilityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            HealthRating::Excellent
        } else if score >= 50.0 {
            HealthRating::Good
        } else if score >= 30.0 {
            HealthRating::Fair
        } else {
            HealthRating::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthRating::Excellent => "Excellent",
            HealthRating::Good => "Good",
            HealthRating::Fair => "Fair",
            HealthRating::Poor => "Poor",
        }
    }
}

/// Composite health scores, all on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndicators {
    pub profitability_score: f64,
    pub leverage_score: f64,
    pub growth_score: f64,
    pub overall_health_score: f64,
    pub classification: HealthRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    #[serde(rename = "High Growth")]
    HighGrowth,
    Growth,
    Stable,
    Declining,
    Distressed,
}

impl GrowthStage {
    /// Classify by average revenue growth, percent.
    pub fn from_avg_growth(avg_growth: f64) -> Self {
        if avg_growth > 30.0 {
            GrowthStage::HighGrowth
        } else if avg_growth > 10.0 {
            GrowthStage::Growth
        } else if avg_growth > 0.0 {
            GrowthStage::Stable
        } else if avg_growth > -10.0 {
            GrowthStage::Declining
        } else {
            GrowthStage::Distressed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::HighGrowth => "High Growth",
            GrowthStage::Growth => "Growth",
            GrowthStage::Stable => "Stable",
            GrowthStage::Declining => "Declining",
            GrowthStage::Distressed => "Distressed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityStage {
    Mature,
    Established,
    Developing,
    #[serde(rename = "Early Stage")]
    EarlyStage,
}

impl MaturityStage {
    /// Classify by years of filing history.
    pub fn from_years(years: f64) -> Self {
        if years > 20.0 {
            MaturityStage::Mature
        } else if years > 10.0 {
            MaturityStage::Established
        } else if years > 5.0 {
            MaturityStage::Developing
        } else {
            MaturityStage::EarlyStage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaturityStage::Mature => "Mature",
            MaturityStage::Established => "Established",
            MaturityStage::Developing => "Developing",
            MaturityStage::EarlyStage => "Early Stage",
        }
    }
}

/// Where the company sits in its reporting life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleFeatures {
    pub years_of_data: f64,
    pub filing_frequency: f64,
    pub growth_stage: GrowthStage,
    pub maturity: MaturityStage,
}

/// Z-score outlier summary for one metric history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyStats {
    pub anomaly_count: usize,
    pub anomaly_percentage: f64,
    pub max_z_score: f64,
}

/// The aggregate analytical profile of one company. Every derived field is
/// recomputed from `series` on each aggregation; disabled features leave
/// their empty rendition in place rather than dropping the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_id: String,
    pub first_generated_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub filing_activity: FilingActivity,
    pub series: MetricSeries,
    pub snapshot: BTreeMap<String, MetricSnapshot>,
    pub ratios: FinancialRatios,
    pub growth: BTreeMap<String, GrowthStats>,
    pub summary: BTreeMap<String, SummaryStats>,
    pub trends: BTreeMap<String, TrendFeatures>,
    pub volatility: BTreeMap<String, VolatilityStats>,
    pub health: Option<HealthIndicators>,
    pub lifecycle: Option<LifecycleFeatures>,
    pub anomalies: BTreeMap<String, AnomalyStats>,
    pub features: BTreeMap<String, f64>,
}
