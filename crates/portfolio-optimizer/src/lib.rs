pub mod allocation;
pub mod catalog;
pub mod export;
pub mod feasibility;
pub mod report;
pub mod selection;

pub use allocation::{
    calculate_portfolio_cagr, classify_risk, classify_strategy, optimize_allocations,
};
pub use catalog::{MockUniverse, UniverseProvider};
pub use export::ExportData;
pub use feasibility::{assess_goal, evaluate_goal_feasibility};
pub use report::ReportEngine;
pub use selection::{select_categories, select_top_assets};
