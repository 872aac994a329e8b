use std::collections::BTreeMap;

use profile_core::numeric::round_to;
use profile_core::{FinancialRatios, MetricSnapshot};

/// Compute point-in-time ratios from the latest snapshot. A ratio is emitted
/// only when both inputs are present and the denominator is non-zero;
/// negative denominators are legitimate (negative equity is a real state).
pub fn compute_ratios(snapshot: &BTreeMap<String, MetricSnapshot>) -> FinancialRatios {
    let revenues = value_of(snapshot, "Revenues");
    let assets = value_of(snapshot, "Assets");
    let liabilities = value_of(snapshot, "Liabilities");
    let equity = value_of(snapshot, "StockholdersEquity");
    let net_income = value_of(snapshot, "NetIncomeLoss");
    let cash = value_of(snapshot, "CashAndCashEquivalents");

    FinancialRatios {
        debt_to_assets: ratio(liabilities, assets),
        current_ratio: ratio(assets, liabilities),
        debt_to_equity: ratio(liabilities, equity),
        profit_margin: ratio(net_income, revenues),
        asset_turnover: ratio(revenues, assets),
        return_on_equity: ratio(net_income, equity),
        return_on_assets: ratio(net_income, assets),
        cash_ratio: ratio(cash, assets),
    }
}

fn value_of(snapshot: &BTreeMap<String, MetricSnapshot>, metric: &str) -> Option<f64> {
    snapshot.get(metric).map(|s| s.value)
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(round_to(n / d, 4)),
        _ => None,
    }
}
