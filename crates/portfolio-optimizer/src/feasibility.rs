use consensus_core::numeric::round_to;
use consensus_core::{GoalFeasibility, PortfolioReport};

const MAX_CONFIDENCE: f64 = 95.0;
const MIN_CONFIDENCE: f64 = 20.0;
const BASE_CONFIDENCE: f64 = 75.0;

/// Compare the projected final value of a report against the user's target.
pub fn evaluate_goal_feasibility(report: &PortfolioReport) -> GoalFeasibility {
    assess_goal(
        report.compound_calculation.final_value,
        report.user_context.target_return,
        report.user_context.monthly_investment,
    )
}

/// Feasibility of reaching `target` given a `projected` final value.
///
/// Confidence grows 50 points per unit of surplus ratio (capped at 95) and
/// shrinks 100 points per unit of shortfall (floored at 20). A non-positive
/// target is always reachable.
pub fn assess_goal(projected: f64, target: f64, monthly_investment: f64) -> GoalFeasibility {
    if !(target > 0.0) {
        return GoalFeasibility {
            achievable: true,
            confidence: MAX_CONFIDENCE,
            recommendation: "Goal achievable: no positive target to reach".to_string(),
        };
    }

    let ratio = projected / target;

    if ratio >= 1.0 {
        let confidence = (BASE_CONFIDENCE + (ratio - 1.0) * 50.0).min(MAX_CONFIDENCE);
        return GoalFeasibility {
            achievable: true,
            confidence: round_to(confidence, 1),
            recommendation: format!(
                "Goal achievable: keep the current strategy, projected to exceed the target by {:.0}%",
                ((ratio - 1.0) * 100.0).round()
            ),
        };
    }

    let confidence = (BASE_CONFIDENCE - (1.0 - ratio) * 100.0).max(MIN_CONFIDENCE);
    let shortfall = ((1.0 - ratio) * 100.0).round();
    let recommendation = if ratio > 0.0 {
        let increase = (monthly_investment * (1.0 / ratio - 1.0)).round();
        format!(
            "Short of the goal by {shortfall:.0}%. Increase the monthly investment by {increase:.0} or adopt a more aggressive strategy"
        )
    } else {
        format!(
            "Short of the goal by {shortfall:.0}%. Increase the monthly investment or adopt a more aggressive strategy"
        )
    };

    GoalFeasibility {
        achievable: false,
        confidence: round_to(confidence, 1),
        recommendation,
    }
}
