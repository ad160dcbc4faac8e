use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Percentage points of drift tolerated before a rebalance is proposed
pub const DEFAULT_REBALANCE_THRESHOLD: f64 = 5.0;

/// Drift of one holding from its target weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftEntry {
    pub index: usize,
    pub current_weight_percent: f64,
    pub target_weight_percent: f64,
    pub drift_percent: f64,
    pub needs_rebalance: bool,
}

/// Pairwise drift between current and target weights.
///
/// Only the overlapping prefix is compared; a length mismatch is handled by
/// [`needs_rebalancing`].
pub fn compute_drift(current: &[f64], target: &[f64], threshold: f64) -> Vec<DriftEntry> {
    current
        .iter()
        .zip(target.iter())
        .enumerate()
        .map(|(index, (&current_weight, &target_weight))| {
            let drift = current_weight - target_weight;
            DriftEntry {
                index,
                current_weight_percent: current_weight,
                target_weight_percent: target_weight,
                drift_percent: drift,
                needs_rebalance: drift.abs() > threshold,
            }
        })
        .collect()
}

/// True when the holdings differ in count or any weight drifts strictly more
/// than `threshold` percentage points from its target.
pub fn needs_rebalancing(current: &[f64], target: &[f64], threshold: f64) -> bool {
    if current.len() != target.len() {
        return true;
    }
    compute_drift(current, target, threshold)
        .iter()
        .any(|entry| entry.needs_rebalance)
}

/// One month of a contribution plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledContribution {
    /// 1-based
    pub month: u32,
    pub date: NaiveDate,
    pub amount: f64,
    pub cumulative: f64,
}

/// Monthly contribution calendar starting at `start_date`.
///
/// Dates landing past the end of a shorter month are clamped to its last day.
pub fn generate_investment_schedule(
    start_date: NaiveDate,
    months: u32,
    monthly_amount: f64,
) -> Vec<ScheduledContribution> {
    let mut cumulative = 0.0;
    (0..months)
        .map_while(|offset| {
            let date = start_date.checked_add_months(Months::new(offset))?;
            cumulative += monthly_amount;
            Some(ScheduledContribution {
                month: offset + 1,
                date,
                amount: monthly_amount,
                cumulative,
            })
        })
        .collect()
}
