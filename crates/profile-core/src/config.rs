use serde::{Deserialize, Serialize};

/// XBRL concepts the aggregation engine tracks. Callers may restrict runs
/// to a subset via [`AggregationOptions::metrics`].
pub const METRIC_VOCABULARY: &[&str] = &[
    "Revenues",
    "Assets",
    "Liabilities",
    "StockholdersEquity",
    "NetIncomeLoss",
    "CashAndCashEquivalents",
    "OperatingIncomeLoss",
    "GrossProfit",
    "EarningsPerShareBasic",
    "EarningsPerShareDiluted",
    "SharesOutstanding",
];

/// Core metrics that always receive a slot in the feature vector.
pub const CORE_METRICS: &[&str] = &[
    "Revenues",
    "Assets",
    "Liabilities",
    "StockholdersEquity",
    "NetIncomeLoss",
];

/// Weights for the overall health score. Must sum to 1.0 for a 0-100
/// composite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthWeights {
    pub profitability: f64,
    pub leverage: f64,
    pub growth: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            profitability: 0.40,
            leverage: 0.30,
            growth: 0.30,
        }
    }
}

/// Engine-level configuration, injected into the orchestrator so tests can
/// override the vocabulary and scoring weights.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub vocabulary: Vec<String>,
    pub health_weights: HealthWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vocabulary: METRIC_VOCABULARY.iter().map(|m| m.to_string()).collect(),
            health_weights: HealthWeights::default(),
        }
    }
}

/// Per-bundle switches. A disabled bundle stays on the profile as its empty
/// rendition so consumers see a stable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    pub ratios: bool,
    pub growth: bool,
    pub summary: bool,
    pub trends: bool,
    pub volatility: bool,
    pub health: bool,
    pub lifecycle: bool,
    pub anomalies: bool,
    pub feature_vector: bool,
}

impl FeatureToggles {
    pub fn all() -> Self {
        Self {
            ratios: true,
            growth: true,
            summary: true,
            trends: true,
            volatility: true,
            health: true,
            lifecycle: true,
            anomalies: true,
            feature_vector: true,
        }
    }

    pub fn none() -> Self {
        Self {
            ratios: false,
            growth: false,
            summary: false,
            trends: false,
            volatility: false,
            health: false,
            lifecycle: false,
            anomalies: false,
            feature_vector: false,
        }
    }
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Per-run aggregation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationOptions {
    /// Drop records filed more than this many years ago. `None` keeps the
    /// whole history.
    #[serde(default)]
    pub lookback_years: Option<f64>,
    /// Restrict the run to these metrics. `None` uses the full vocabulary.
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    /// Merge on top of the persisted profile instead of rebuilding from
    /// scratch.
    #[serde(default)]
    pub incremental: bool,
    #[serde(default)]
    pub toggles: FeatureToggles,
}
