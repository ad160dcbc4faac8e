use consensus_core::numeric::round_to;
use consensus_core::{Asset, PortfolioAllocation, RiskLevel, RiskThresholds, StrategyType};

/// CAGR-proportional weights over `assets`.
///
/// Allocation percentages are rounded to two decimals and amounts to whole
/// units. Assets with a non-positive CAGR get no weight; when no asset has a
/// positive CAGR the split is equal. Expected return is the gain on the
/// allocated amount compounded over the asset's holding period.
pub fn optimize_allocations(assets: &[Asset], total_investment: f64) -> Vec<PortfolioAllocation> {
    if assets.is_empty() {
        return Vec::new();
    }

    let positive_cagr = |asset: &Asset| {
        if asset.expected_cagr > 0.0 {
            asset.expected_cagr
        } else {
            0.0
        }
    };
    let total_cagr: f64 = assets.iter().map(positive_cagr).sum();
    let equal_weight = 1.0 / assets.len() as f64;

    assets
        .iter()
        .map(|asset| {
            let weight = if total_cagr > 0.0 {
                positive_cagr(asset) / total_cagr
            } else {
                equal_weight
            };
            let amount = total_investment * weight;
            let growth = (1.0 + asset.expected_cagr / 100.0).powi(asset.holding_period as i32);

            PortfolioAllocation {
                category: asset.category.clone(),
                ticker: asset.ticker.clone(),
                allocation: round_to(weight * 100.0, 2),
                amount: amount.round(),
                expected_return: (amount * (growth - 1.0)).round(),
                cagr: asset.expected_cagr,
            }
        })
        .collect()
}

/// Allocation-weighted CAGR, percent
pub fn calculate_portfolio_cagr(allocations: &[PortfolioAllocation]) -> f64 {
    allocations
        .iter()
        .map(|a| a.cagr * (a.allocation / 100.0))
        .sum()
}

pub fn classify_risk(portfolio_cagr: f64, risk: &RiskThresholds) -> RiskLevel {
    if portfolio_cagr >= risk.high_risk_cagr {
        RiskLevel::High
    } else if portfolio_cagr >= risk.medium_risk_cagr {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn classify_strategy(portfolio_cagr: f64, risk: &RiskThresholds) -> StrategyType {
    if portfolio_cagr >= risk.aggressive_cagr {
        StrategyType::Aggressive
    } else {
        StrategyType::Conservative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use consensus_core::SourceGrade;
    use proptest::prelude::*;

    fn asset(ticker: &str, cagr: f64) -> Asset {
        Asset {
            category: "Test".to_string(),
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            industry: "Test".to_string(),
            key_growth_points: vec![],
            expected_cagr: cagr,
            trust_grade: SourceGrade::A,
            sources: vec![],
            current_price: None,
            buy_price: None,
            sell_price: None,
            holding_period: 5,
            expected_return: 0.0,
        }
    }

    #[test]
    fn test_cagr_weighting() {
        let allocations = optimize_allocations(&[asset("A", 30.0), asset("B", 10.0)], 1_000.0);
        assert_eq!(allocations[0].allocation, 75.0);
        assert_eq!(allocations[0].amount, 750.0);
        assert_eq!(allocations[1].allocation, 25.0);
        assert_eq!(allocations[1].amount, 250.0);
        assert!(allocations[0].expected_return > allocations[1].expected_return);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(optimize_allocations(&[], 1_000.0).is_empty());

        let zero = optimize_allocations(&[asset("A", 0.0), asset("B", 0.0)], 1_000.0);
        assert_eq!(zero[0].allocation, 50.0);
        assert_eq!(zero[1].amount, 500.0);
        assert_eq!(zero[0].expected_return, 0.0);
    }

    #[test]
    fn test_non_positive_cagr_gets_no_weight() {
        let allocations = optimize_allocations(
            &[asset("A", 30.0), asset("B", -10.0), asset("C", 0.0)],
            1_000.0,
        );
        assert_eq!(allocations[0].allocation, 100.0);
        assert_eq!(allocations[0].amount, 1_000.0);
        assert_eq!(allocations[1].allocation, 0.0);
        assert_eq!(allocations[1].amount, 0.0);
        assert_eq!(allocations[1].expected_return, 0.0);
        assert_eq!(allocations[2].allocation, 0.0);

        let all_negative = optimize_allocations(&[asset("A", -5.0), asset("B", -20.0)], 1_000.0);
        assert_eq!(all_negative[0].allocation, 50.0);
        assert_eq!(all_negative[1].allocation, 50.0);
    }

    #[test]
    fn test_portfolio_cagr() {
        let allocations = optimize_allocations(&[asset("A", 30.0), asset("B", 10.0)], 1_000.0);
        // 30*0.75 + 10*0.25
        assert_relative_eq!(calculate_portfolio_cagr(&allocations), 25.0, epsilon = 1e-9);
        assert_eq!(calculate_portfolio_cagr(&[]), 0.0);
    }

    #[test]
    fn test_risk_and_strategy() {
        let risk = RiskThresholds::default();
        assert_eq!(classify_risk(35.0, &risk), RiskLevel::High);
        assert_eq!(classify_risk(29.9, &risk), RiskLevel::Medium);
        assert_eq!(classify_risk(24.9, &risk), RiskLevel::Low);
        assert_eq!(classify_strategy(30.0, &risk), StrategyType::Aggressive);
        assert_eq!(classify_strategy(29.9, &risk), StrategyType::Conservative);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn allocations_sum_to_hundred(cagrs in prop::collection::vec(0.1f64..100.0, 1..12)) {
            let assets: Vec<Asset> = cagrs
                .iter()
                .enumerate()
                .map(|(i, c)| asset(&format!("T{i}"), *c))
                .collect();
            let total: f64 = optimize_allocations(&assets, 3_000_000.0)
                .iter()
                .map(|a| a.allocation)
                .sum();
            prop_assert!((total - 100.0).abs() <= 0.1, "sum was {}", total);
        }

        #[test]
        fn allocations_stay_in_range_with_mixed_signs(
            cagrs in prop::collection::vec(-50.0f64..100.0, 1..12)
        ) {
            let assets: Vec<Asset> = cagrs
                .iter()
                .enumerate()
                .map(|(i, c)| asset(&format!("T{i}"), *c))
                .collect();
            let allocations = optimize_allocations(&assets, 3_000_000.0);
            for a in &allocations {
                prop_assert!((0.0..=100.0).contains(&a.allocation), "allocation was {}", a.allocation);
                prop_assert!(a.amount >= 0.0);
            }
            let total: f64 = allocations.iter().map(|a| a.allocation).sum();
            prop_assert!((total - 100.0).abs() <= 0.1, "sum was {}", total);
        }
    }
}
