use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use fundamental_metrics::{classify_lifecycle, compose_health, compute_growth, compute_ratios};
use profile_core::numeric::DAYS_PER_YEAR;
use profile_core::{
    AggregationOptions, CompanyProfile, EngineConfig, FactRecord, FactSource, FeatureToggles,
    FilingActivity, FinancialRatios, MetricSeries, ProfileError, ProfileStore,
};
use quant_metrics::{analyze_volatility, detect_anomalies, fit_trends, summarize};
use series_builder::{
    build_series, filing_activity, filter_records, latest_snapshot, merge_activity,
};

pub mod features;
pub use features::assemble_features;

/// Drives the aggregation pipeline end to end: fetch fact records, filter
/// them, build or merge the metric series, derive every enabled bundle, and
/// persist the finished profile.
pub struct ProfileOrchestrator {
    source: Arc<dyn FactSource>,
    /// Optional persistence backend; profiles are written through after
    /// every build.
    store: Option<Arc<dyn ProfileStore>>,
    config: EngineConfig,
}

impl ProfileOrchestrator {
    pub fn new(source: Arc<dyn FactSource>) -> Self {
        Self {
            source,
            store: None,
            config: EngineConfig::default(),
        }
    }

    /// Set the persistence backend for generated profiles
    pub fn with_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the metric vocabulary and health scoring weights
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build (or incrementally refresh) the analytical profile for a company
    pub async fn aggregate(
        &self,
        company_id: &str,
        options: &AggregationOptions,
    ) -> Result<CompanyProfile, ProfileError> {
        tracing::info!(
            "Starting profile aggregation for {} (incremental: {})",
            company_id,
            options.incremental
        );

        let records = self.source.fetch_facts(company_id).await?;
        if records.is_empty() {
            return Err(ProfileError::NoFilings(company_id.to_string()));
        }
        tracing::info!("Fetched {} fact records for {}", records.len(), company_id);

        let cutoff = options.lookback_years.map(cutoff_date);
        let whitelist = options
            .metrics
            .clone()
            .unwrap_or_else(|| self.config.vocabulary.clone());
        let records = filter_records(records, cutoff);
        tracing::debug!(
            "{} records within window (cutoff: {:?}, {} whitelisted metrics) for {}",
            records.len(),
            cutoff,
            whitelist.len(),
            company_id
        );

        let prior = if options.incremental {
            match &self.store {
                Some(store) => store.load_profile(company_id).await?,
                None => {
                    tracing::warn!(
                        "Incremental aggregation for {} without a store, rebuilding from scratch",
                        company_id
                    );
                    None
                }
            }
        } else {
            None
        };

        let profile = match prior {
            Some(prior) => {
                let high_water = prior.filing_activity.last_filing_date;
                let newer: Vec<FactRecord> = records
                    .into_iter()
                    .filter(|record| is_newer(record.filing_date, high_water))
                    .collect();
                if newer.is_empty() {
                    tracing::info!(
                        "No filings newer than {:?} for {}, profile unchanged",
                        high_water,
                        company_id
                    );
                    return Ok(prior);
                }
                tracing::info!(
                    "Merging {} newer filings into prior profile for {}",
                    newer.len(),
                    company_id
                );

                let mut series = prior.series.clone();
                series.merge_from(build_series(&newer, &whitelist));
                let activity = merge_activity(&prior.filing_activity, &filing_activity(&newer));
                self.build_profile(
                    company_id,
                    series,
                    activity,
                    Some(prior.first_generated_at),
                    &options.toggles,
                )
            }
            None => {
                tracing::info!(
                    "Building profile for {} from {} records",
                    company_id,
                    records.len()
                );
                let series = build_series(&records, &whitelist);
                let activity = filing_activity(&records);
                self.build_profile(company_id, series, activity, None, &options.toggles)
            }
        };

        if let Some(store) = &self.store {
            store.store_profile(company_id, &profile).await?;
            tracing::info!("Stored profile for {}", company_id);
        }

        Ok(profile)
    }

    /// Derive every enabled bundle and assemble the profile document.
    /// Disabled bundles keep their empty rendition so the shape is stable
    /// across runs.
    fn build_profile(
        &self,
        company_id: &str,
        series: MetricSeries,
        activity: FilingActivity,
        first_generated_at: Option<DateTime<Utc>>,
        toggles: &FeatureToggles,
    ) -> CompanyProfile {
        let snapshot = latest_snapshot(&series);

        let ratios = if toggles.ratios {
            compute_ratios(&snapshot)
        } else {
            FinancialRatios::default()
        };
        let growth = if toggles.growth {
            compute_growth(&series)
        } else {
            BTreeMap::new()
        };
        let summary = if toggles.summary {
            summarize(&series)
        } else {
            BTreeMap::new()
        };
        let trends = if toggles.trends {
            fit_trends(&series)
        } else {
            BTreeMap::new()
        };
        let volatility = if toggles.volatility {
            analyze_volatility(&series)
        } else {
            BTreeMap::new()
        };
        let anomalies = if toggles.anomalies {
            detect_anomalies(&series)
        } else {
            BTreeMap::new()
        };

        // Health and lifecycle read whatever rendition the earlier bundles
        // produced, so disabling ratios or growth degrades their scores
        // instead of blocking them.
        let health = if toggles.health {
            Some(compose_health(&ratios, &growth, &self.config.health_weights))
        } else {
            None
        };
        let lifecycle = if toggles.lifecycle {
            Some(classify_lifecycle(&activity, &growth))
        } else {
            None
        };

        let features = if toggles.feature_vector {
            assemble_features(
                &snapshot,
                &ratios,
                &growth,
                &volatility,
                health.as_ref(),
                lifecycle.as_ref(),
            )
        } else {
            BTreeMap::new()
        };

        let generated_at = Utc::now();
        CompanyProfile {
            company_id: company_id.to_string(),
            first_generated_at: first_generated_at.unwrap_or(generated_at),
            generated_at,
            filing_activity: activity,
            series,
            snapshot,
            ratios,
            growth,
            summary,
            trends,
            volatility,
            health,
            lifecycle,
            anomalies,
            features,
        }
    }
}

/// Oldest filing date still inside the lookback window.
fn cutoff_date(lookback_years: f64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days((lookback_years * DAYS_PER_YEAR) as i64)
}

/// A record joins an incremental merge only when it is strictly newer than
/// the prior profile's last filing date.
fn is_newer(filed: Option<NaiveDate>, high_water: Option<NaiveDate>) -> bool {
    match (filed, high_water) {
        (Some(date), Some(mark)) => date > mark,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
