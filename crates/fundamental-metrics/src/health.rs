use std::collections::BTreeMap;

use profile_core::numeric::round_to;
use profile_core::{FinancialRatios, GrowthStats, HealthIndicators, HealthRating, HealthWeights};

/// Compose the 0-100 health scores from ratios and revenue growth. Missing
/// ratios count as zero, so a sparse snapshot degrades the score instead of
/// blocking it.
pub fn compose_health(
    ratios: &FinancialRatios,
    growth: &BTreeMap<String, GrowthStats>,
    weights: &HealthWeights,
) -> HealthIndicators {
    let profit_margin = ratios.profit_margin.unwrap_or(0.0);
    let return_on_equity = ratios.return_on_equity.unwrap_or(0.0);
    let return_on_assets = ratios.return_on_assets.unwrap_or(0.0);
    let profitability_score = ((profit_margin * 100.0).clamp(0.0, 100.0)
        + (return_on_equity * 100.0).clamp(0.0, 100.0)
        + (return_on_assets * 100.0).clamp(0.0, 100.0))
        / 3.0;

    let debt_to_equity = ratios.debt_to_equity.unwrap_or(0.0);
    let debt_to_assets = ratios.debt_to_assets.unwrap_or(0.0);
    let leverage_penalty = (debt_to_equity * 10.0 + debt_to_assets * 50.0).min(100.0);
    let leverage_score = (100.0 - leverage_penalty).max(0.0);

    let revenue_growth = growth.get("Revenues").map_or(0.0, |g| g.avg_growth_rate);
    let growth_score = revenue_growth.clamp(0.0, 100.0);

    let overall_health_score = round_to(
        profitability_score * weights.profitability
            + leverage_score * weights.leverage
            + growth_score * weights.growth,
        2,
    );

    HealthIndicators {
        profitability_score,
        leverage_score,
        growth_score,
        overall_health_score,
        classification: HealthRating::from_score(overall_health_score),
    }
}
