//! Finance Calculator
//!
//! Pure financial math behind the portfolio report: compound growth of a
//! monthly contribution plan, CAGR, Sharpe ratio, drawdown, HHI-based
//! diversification, scenario simulation and rebalance checks.
//! Stateless functions: no I/O, no async.

pub mod compound;
pub mod metrics;
pub mod rebalancing;
pub mod scenarios;

pub use compound::{calculate_compound_return, future_value_annuity_due};
pub use metrics::{
    calculate_cagr, calculate_diversification_score, calculate_max_drawdown,
    calculate_sharpe_ratio, calculate_success_probability, calculate_undervaluation_score,
    herfindahl_index, DEFAULT_RISK_FREE_RATE,
};
pub use rebalancing::{
    compute_drift, generate_investment_schedule, needs_rebalancing, DriftEntry,
    ScheduledContribution, DEFAULT_REBALANCE_THRESHOLD,
};
pub use scenarios::{calculate_weighted_roi, run_portfolio_simulation, simulate_scenarios};
