use std::collections::BTreeMap;

use profile_core::numeric::DAYS_PER_YEAR;
use profile_core::{FilingActivity, GrowthStage, GrowthStats, LifecycleFeatures, MaturityStage};

/// Classify where the company sits in its reporting life from filing
/// cadence and revenue growth.
pub fn classify_lifecycle(
    activity: &FilingActivity,
    growth: &BTreeMap<String, GrowthStats>,
) -> LifecycleFeatures {
    let years_of_data = activity.filing_date_range_days as f64 / DAYS_PER_YEAR;
    let filing_frequency = if years_of_data == 0.0 {
        0.0
    } else {
        activity.total_filings as f64 / years_of_data
    };

    let revenue_growth = growth.get("Revenues").map_or(0.0, |g| g.avg_growth_rate);

    LifecycleFeatures {
        years_of_data,
        filing_frequency,
        growth_stage: GrowthStage::from_avg_growth(revenue_growth),
        maturity: MaturityStage::from_years(years_of_data),
    }
}
