use consensus_core::numeric::{clamp_percent, safe_div};
use statrs::statistics::Statistics;

/// Annual risk-free rate, percent
pub const DEFAULT_RISK_FREE_RATE: f64 = 3.0;

/// Compound annual growth rate, percent: `((final/initial)^(1/years) − 1) × 100`.
///
/// Requires `years > 0` and `initial_value > 0`; anything else (or a negative
/// ratio) yields 0.0 rather than Infinity/NaN.
pub fn calculate_cagr(initial_value: f64, final_value: f64, years: f64) -> f64 {
    if !(years > 0.0) || !(initial_value > 0.0) {
        return 0.0;
    }
    let ratio = final_value / initial_value;
    if ratio < 0.0 {
        return 0.0;
    }
    let cagr = (ratio.powf(1.0 / years) - 1.0) * 100.0;
    if cagr.is_finite() {
        cagr
    } else {
        0.0
    }
}

/// Sharpe ratio over a series of period returns, using the population
/// standard deviation. Returns and `risk_free_rate` share the same unit.
/// 0.0 for empty input or zero variance.
pub fn calculate_sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let mean_return = returns.mean();
    let std_dev = returns.population_std_dev();

    if !std_dev.is_finite() || std_dev < 1e-12 {
        return 0.0;
    }

    (mean_return - risk_free_rate) / std_dev
}

/// Largest peak-to-trough decline of a value series, percent.
pub fn calculate_max_drawdown(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut peak = values[0];
    let mut max_dd = 0.0_f64;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak * 100.0;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }
    }

    max_dd
}

/// Herfindahl index over percentage allocations (0-10000 scale).
pub fn herfindahl_index(allocations: &[f64]) -> f64 {
    allocations.iter().map(|a| a * a).sum()
}

/// HHI inverted and normalised to 0-100: an even split scores 100, a single
/// holding scores 0.
pub fn calculate_diversification_score(allocations: &[f64]) -> f64 {
    if allocations.is_empty() {
        return 0.0;
    }

    let hhi = herfindahl_index(allocations);
    let max_hhi = 10_000.0;
    let min_hhi = max_hhi / allocations.len() as f64;

    clamp_percent(safe_div(max_hhi - hhi, max_hhi - min_hhi, 0.0) * 100.0)
}

/// Probability (percent) of reaching `target_return` given a projection,
/// read off a fixed ladder of projection/target ratios.
pub fn calculate_success_probability(current_projection: f64, target_return: f64) -> f64 {
    if !(target_return > 0.0) {
        return if current_projection > 0.0 { 95.0 } else { 15.0 };
    }

    let ratio = current_projection / target_return;
    match ratio {
        r if r >= 1.2 => 95.0,
        r if r >= 1.1 => 85.0,
        r if r >= 1.0 => 75.0,
        r if r >= 0.9 => 60.0,
        r if r >= 0.8 => 45.0,
        r if r >= 0.7 => 30.0,
        _ => 15.0,
    }
}

/// `(intrinsic / price) × 10`; 0.0 when the price is zero.
pub fn calculate_undervaluation_score(intrinsic_value: f64, current_price: f64) -> f64 {
    safe_div(intrinsic_value, current_price, 0.0) * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cagr() {
        assert_relative_eq!(calculate_cagr(100.0, 200.0, 1.0), 100.0, epsilon = 1e-9);
        assert_relative_eq!(calculate_cagr(100.0, 121.0, 2.0), 10.0, epsilon = 1e-9);
        assert_relative_eq!(calculate_cagr(100.0, 81.0, 2.0), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cagr_guards() {
        assert_eq!(calculate_cagr(100.0, 200.0, 0.0), 0.0);
        assert_eq!(calculate_cagr(0.0, 200.0, 5.0), 0.0);
        assert_eq!(calculate_cagr(-10.0, 200.0, 5.0), 0.0);
        assert_eq!(calculate_cagr(100.0, -5.0, 2.0), 0.0);
    }

    #[test]
    fn test_sharpe_empty_and_flat() {
        assert_eq!(calculate_sharpe_ratio(&[], DEFAULT_RISK_FREE_RATE), 0.0);
        assert_eq!(calculate_sharpe_ratio(&[5.0, 5.0, 5.0], 3.0), 0.0);
    }

    #[test]
    fn test_sharpe_population_std_dev() {
        // mean 5, population variance 2/3
        let returns = [4.0, 5.0, 6.0];
        let expected = (5.0 - 3.0) / (2.0_f64 / 3.0).sqrt();
        assert_relative_eq!(calculate_sharpe_ratio(&returns, 3.0), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_max_drawdown() {
        let values = [100.0, 110.0, 105.0, 95.0, 100.0, 115.0, 108.0];
        assert_relative_eq!(
            calculate_max_drawdown(&values),
            15.0 / 110.0 * 100.0,
            epsilon = 1e-9
        );
        assert_eq!(calculate_max_drawdown(&[]), 0.0);
        assert_eq!(calculate_max_drawdown(&[10.0, 20.0, 30.0]), 0.0);
    }

    #[test]
    fn test_diversification_score() {
        assert_eq!(calculate_diversification_score(&[100.0]), 0.0);
        assert_relative_eq!(
            calculate_diversification_score(&[25.0, 25.0, 25.0, 25.0]),
            100.0,
            epsilon = 1e-9
        );
        assert_eq!(calculate_diversification_score(&[]), 0.0);

        let skewed = calculate_diversification_score(&[70.0, 10.0, 10.0, 10.0]);
        assert!(skewed > 0.0 && skewed < 100.0);
    }

    #[test]
    fn test_herfindahl_index() {
        assert_relative_eq!(herfindahl_index(&[50.0, 50.0]), 5_000.0);
    }

    #[test]
    fn test_success_probability_ladder() {
        assert_eq!(calculate_success_probability(130.0, 100.0), 95.0);
        assert_eq!(calculate_success_probability(110.0, 100.0), 85.0);
        assert_eq!(calculate_success_probability(100.0, 100.0), 75.0);
        assert_eq!(calculate_success_probability(95.0, 100.0), 60.0);
        assert_eq!(calculate_success_probability(80.0, 100.0), 45.0);
        assert_eq!(calculate_success_probability(75.0, 100.0), 30.0);
        assert_eq!(calculate_success_probability(10.0, 100.0), 15.0);
        assert_eq!(calculate_success_probability(10.0, 0.0), 95.0);
    }

    #[test]
    fn test_undervaluation_score() {
        assert_relative_eq!(calculate_undervaluation_score(150.0, 100.0), 15.0);
        assert_eq!(calculate_undervaluation_score(150.0, 0.0), 0.0);
    }
}
