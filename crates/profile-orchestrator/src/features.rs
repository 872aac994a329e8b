use std::collections::BTreeMap;

use profile_core::{
    FinancialRatios, GrowthStats, HealthIndicators, LifecycleFeatures, MetricSnapshot,
    VolatilityStats, CORE_METRICS,
};

/// Metrics whose growth rates get their own feature slots.
const GROWTH_METRICS: &[&str] = &["Revenues", "Assets", "NetIncomeLoss"];

/// Flatten the derived bundles into a single numeric map for downstream
/// models. Core metric slots always exist (0.0 when unobserved); everything
/// else appears only when computed.
pub fn assemble_features(
    snapshot: &BTreeMap<String, MetricSnapshot>,
    ratios: &FinancialRatios,
    growth: &BTreeMap<String, GrowthStats>,
    volatility: &BTreeMap<String, VolatilityStats>,
    health: Option<&HealthIndicators>,
    lifecycle: Option<&LifecycleFeatures>,
) -> BTreeMap<String, f64> {
    let mut features = BTreeMap::new();

    for metric in CORE_METRICS {
        let value = snapshot.get(*metric).map_or(0.0, |s| s.value);
        features.insert(format!("latest_{}", metric), value);
    }

    let named_ratios = [
        ("ratio_debt_to_assets", ratios.debt_to_assets),
        ("ratio_current_ratio", ratios.current_ratio),
        ("ratio_debt_to_equity", ratios.debt_to_equity),
        ("ratio_profit_margin", ratios.profit_margin),
        ("ratio_asset_turnover", ratios.asset_turnover),
        ("ratio_return_on_equity", ratios.return_on_equity),
        ("ratio_return_on_assets", ratios.return_on_assets),
        ("ratio_cash_ratio", ratios.cash_ratio),
    ];
    for (key, value) in named_ratios {
        if let Some(value) = value {
            features.insert(key.to_string(), value);
        }
    }

    for metric in GROWTH_METRICS {
        if let Some(stats) = growth.get(*metric) {
            features.insert(format!("growth_avg_{}", metric), stats.avg_growth_rate);
            features.insert(format!("growth_latest_{}", metric), stats.latest_growth_rate);
        }
    }

    if let Some(health) = health {
        features.insert(
            "health_profitability_score".to_string(),
            health.profitability_score,
        );
        features.insert("health_leverage_score".to_string(), health.leverage_score);
        features.insert("health_growth_score".to_string(), health.growth_score);
        features.insert(
            "health_overall_score".to_string(),
            health.overall_health_score,
        );
    }

    let std_devs: Vec<f64> = volatility.values().map(|v| v.std_dev).collect();
    let mean_std_dev = if std_devs.is_empty() {
        0.0
    } else {
        std_devs.iter().sum::<f64>() / std_devs.len() as f64
    };
    features.insert("volatility_mean_std_dev".to_string(), mean_std_dev);

    if let Some(lifecycle) = lifecycle {
        features.insert(
            "lifecycle_years_of_data".to_string(),
            lifecycle.years_of_data,
        );
        features.insert(
            "lifecycle_filing_frequency".to_string(),
            lifecycle.filing_frequency,
        );
    }

    features
}
