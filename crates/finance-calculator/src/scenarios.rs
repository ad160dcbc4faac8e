use consensus_core::numeric::round_to;
use consensus_core::{EngineConfig, PortfolioSimulation, ScenarioKind, ScenarioSimulation, ScenarioWeights};

use crate::metrics::calculate_sharpe_ratio;

/// Return/CAGR multiplier and drawdown (percent) per scenario
const BULL: (f64, f64) = (1.25, 10.0);
const BASE: (f64, f64) = (1.0, 20.0);
const BEAR: (f64, f64) = (0.75, 35.0);

/// Bull (+25%), base and bear (−25%) variants of a base projection.
pub fn simulate_scenarios(
    base_cagr: f64,
    base_return: f64,
    weights: &ScenarioWeights,
) -> Vec<ScenarioSimulation> {
    [
        (ScenarioKind::Bull, weights.bull, BULL),
        (ScenarioKind::Base, weights.base, BASE),
        (ScenarioKind::Bear, weights.bear, BEAR),
    ]
    .into_iter()
    .map(|(scenario, weight, (multiplier, drawdown))| ScenarioSimulation {
        scenario,
        probability: weight * 100.0,
        expected_return: (base_return * multiplier).round(),
        cagr: base_cagr * multiplier,
        drawdown,
    })
    .collect()
}

/// Probability-weighted expected return across scenarios.
pub fn calculate_weighted_roi(scenarios: &[ScenarioSimulation]) -> f64 {
    scenarios
        .iter()
        .map(|s| s.expected_return * (s.probability / 100.0))
        .sum()
}

/// Scenario set plus summary figures for a portfolio.
///
/// The Sharpe ratio is taken over a fixed sample spread around the base CAGR
/// (±10-20%) until historical return series are wired in.
pub fn run_portfolio_simulation(
    base_cagr: f64,
    base_return: f64,
    volatility: f64,
    config: &EngineConfig,
) -> PortfolioSimulation {
    let scenarios = simulate_scenarios(base_cagr, base_return, &config.scenarios);
    let weighted_roi = calculate_weighted_roi(&scenarios);

    let sample_returns = [
        base_cagr,
        base_cagr * 1.1,
        base_cagr * 0.9,
        base_cagr * 1.2,
        base_cagr * 0.85,
    ];
    let sharpe_ratio = calculate_sharpe_ratio(&sample_returns, config.risk_free_rate);

    PortfolioSimulation {
        scenarios,
        weighted_roi: weighted_roi.round(),
        sharpe_ratio: round_to(sharpe_ratio, 2),
        volatility,
        policy_risk: config.policy_risk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scenario_table() {
        let scenarios = simulate_scenarios(30.0, 1_000.0, &ScenarioWeights::default());
        assert_eq!(scenarios.len(), 3);

        assert_eq!(scenarios[0].scenario, ScenarioKind::Bull);
        assert_eq!(scenarios[0].probability, 25.0);
        assert_eq!(scenarios[0].expected_return, 1_250.0);
        assert_relative_eq!(scenarios[0].cagr, 37.5);
        assert_eq!(scenarios[0].drawdown, 10.0);

        assert_eq!(scenarios[1].scenario, ScenarioKind::Base);
        assert_eq!(scenarios[1].probability, 50.0);
        assert_eq!(scenarios[1].expected_return, 1_000.0);
        assert_eq!(scenarios[1].drawdown, 20.0);

        assert_eq!(scenarios[2].scenario, ScenarioKind::Bear);
        assert_eq!(scenarios[2].expected_return, 750.0);
        assert_relative_eq!(scenarios[2].cagr, 22.5);
        assert_eq!(scenarios[2].drawdown, 35.0);

        let probability: f64 = scenarios.iter().map(|s| s.probability).sum();
        assert_relative_eq!(probability, 100.0);
    }

    #[test]
    fn test_weighted_roi_symmetric() {
        // 0.25 * 1.25 + 0.5 * 1.0 + 0.25 * 0.75 = 1.0
        let scenarios = simulate_scenarios(30.0, 1_000.0, &ScenarioWeights::default());
        assert_relative_eq!(calculate_weighted_roi(&scenarios), 1_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_portfolio_simulation() {
        let config = EngineConfig::default();
        let sim = run_portfolio_simulation(30.0, 1_000_000.0, 15.0, &config);
        assert_eq!(sim.weighted_roi, 1_000_000.0);
        assert_eq!(sim.volatility, 15.0);
        assert_eq!(sim.policy_risk, 15.0);
        assert!(sim.sharpe_ratio > 0.0);
    }

    #[test]
    fn test_zero_cagr_simulation_has_zero_sharpe() {
        let sim = run_portfolio_simulation(0.0, 0.0, 15.0, &EngineConfig::default());
        assert_eq!(sim.sharpe_ratio, 0.0);
        assert_eq!(sim.weighted_roi, 0.0);
    }
}
