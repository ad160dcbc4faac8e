use consensus_core::{Asset, AssetCategory, InvestmentGoals, RiskThresholds};
use tracing::warn;

use crate::catalog::UniverseProvider;

/// Categories passing the score, growth and drawdown screen, capped at
/// `max_categories`. Fewer than the diversification minimum is logged, not
/// rejected.
pub fn select_categories(
    categories: &[AssetCategory],
    goals: &InvestmentGoals,
    risk: &RiskThresholds,
) -> Vec<AssetCategory> {
    let selected: Vec<AssetCategory> = categories
        .iter()
        .filter(|c| {
            c.average_score >= goals.min_average_score
                && c.consensus_score >= goals.min_consensus_score
                && c.cagr >= goals.min_acceptable_cagr
                && c.max_drawdown < risk.max_drawdown_warning
        })
        .take(risk.max_categories)
        .cloned()
        .collect();

    if selected.len() < risk.diversification_min_categories {
        warn!(
            selected = selected.len(),
            required = risk.diversification_min_categories,
            "Too few categories passed screening for diversification"
        );
    }

    selected
}

/// Highest expected CAGR first; ties keep catalog order
pub fn select_top_assets(
    universe: &dyn UniverseProvider,
    category: &AssetCategory,
    count: usize,
) -> Vec<Asset> {
    let mut assets = universe.assets(&category.name);
    assets.sort_by(|a, b| {
        b.expected_cagr
            .partial_cmp(&a.expected_cagr)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    assets.truncate(count);
    assets
}
