use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ReportError;

/// Caller-supplied investment profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub name: String,
    /// Currency units invested every month
    pub monthly_investment: f64,
    /// Total investment period in months
    pub total_investment_period: u32,
    /// Goal amount in currency units
    pub target_return: f64,
    #[serde(default)]
    pub investment_goal: Option<String>,
    #[serde(default)]
    pub investment_style: Option<String>,
    pub current_date: NaiveDate,
}

impl UserContext {
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.name.trim().is_empty() {
            return Err(ReportError::InvalidContext("name must not be empty".to_string()));
        }
        if !(self.monthly_investment > 0.0) {
            return Err(ReportError::InvalidContext(format!(
                "monthly investment must be positive, got {}",
                self.monthly_investment
            )));
        }
        if self.total_investment_period == 0 {
            return Err(ReportError::InvalidContext(
                "investment period must be at least one month".to_string(),
            ));
        }
        if !(self.target_return > 0.0) {
            return Err(ReportError::InvalidContext(format!(
                "target return must be positive, got {}",
                self.target_return
            )));
        }
        Ok(())
    }
}

/// Letter grade assigned to an information source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
}

impl SourceGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceGrade::APlus => "A+",
            SourceGrade::A => "A",
            SourceGrade::B => "B",
            SourceGrade::C => "C",
        }
    }
}

impl std::fmt::Display for SourceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Misinformation classification of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MisinfoType {
    Verified,
    Disputed,
    FalseLikely,
}

impl MisinfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MisinfoType::Verified => "VERIFIED",
            MisinfoType::Disputed => "DISPUTED",
            MisinfoType::FalseLikely => "FALSE_LIKELY",
        }
    }
}

impl std::fmt::Display for MisinfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External reference backing an asset thesis.
///
/// Built once by the source factory and only read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    pub title: String,
    pub publisher: String,
    pub publish_date: NaiveDate,
    pub grade: SourceGrade,
    /// Composite reliability, 0-100
    pub trust_score: f64,
    pub base_score: f64,
    pub recency: f64,
    pub corroboration: f64,
    pub author_credibility: f64,
    pub transparency: f64,
    pub correction_speed: f64,
    pub conflict_of_interest: f64,
    pub cross_validation_count: u32,
    pub misinfo_type: MisinfoType,
    pub adopted_in_analysis: bool,
    pub reasoning: String,
}

/// Expert archetypes on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertType {
    Economist,
    TechSpecialist,
    Futurist,
    InvestmentStrategist,
    BlockchainSpecialist,
    DataAnalyst,
    BehavioralEconomist,
    PoliticalEconomist,
}

impl ExpertType {
    /// Fixed roster order
    pub const ALL: [ExpertType; 8] = [
        ExpertType::Economist,
        ExpertType::TechSpecialist,
        ExpertType::Futurist,
        ExpertType::InvestmentStrategist,
        ExpertType::BlockchainSpecialist,
        ExpertType::DataAnalyst,
        ExpertType::BehavioralEconomist,
        ExpertType::PoliticalEconomist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpertType::Economist => "economist",
            ExpertType::TechSpecialist => "tech_specialist",
            ExpertType::Futurist => "futurist",
            ExpertType::InvestmentStrategist => "investment_strategist",
            ExpertType::BlockchainSpecialist => "blockchain_specialist",
            ExpertType::DataAnalyst => "data_analyst",
            ExpertType::BehavioralEconomist => "behavioral_economist",
            ExpertType::PoliticalEconomist => "political_economist",
        }
    }
}

/// One expert's judgment of a category or asset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertAnalysis {
    pub expert_type: ExpertType,
    /// Role label of the expert
    pub perspective: String,
    pub key_points: Vec<String>,
    /// 1.0 to 10.0
    pub score: f64,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concerns: Option<Vec<String>>,
}

/// Aggregate over one panel run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertConsensus {
    pub analyses: Vec<ExpertAnalysis>,
    pub consensus_score: f64,
    pub top_reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissenting_opinion: Option<String>,
    pub bias_guard_triggered: bool,
    /// Score spread exceeded the debate threshold. Observational only.
    #[serde(default)]
    pub debate_triggered: bool,
}

/// Investable grouping scored on a 1-10 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategory {
    pub name: String,
    pub growth_score: f64,
    pub innovation_score: f64,
    pub sustainability_score: f64,
    pub trust_score: f64,
    pub compound_potential: f64,
    pub average_score: f64,
    pub consensus_score: f64,
    /// Percent
    pub cagr: f64,
    pub sharpe_ratio: f64,
    /// Percent
    pub max_drawdown: f64,
    pub selected: bool,
}

/// Individual instrument inside a category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub category: String,
    pub ticker: String,
    pub name: String,
    pub industry: String,
    pub key_growth_points: Vec<String>,
    /// Percent
    #[serde(rename = "expectedCAGR")]
    pub expected_cagr: f64,
    pub trust_grade: SourceGrade,
    pub sources: Vec<Source>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub buy_price: Option<f64>,
    #[serde(default)]
    pub sell_price: Option<f64>,
    /// Years
    pub holding_period: u32,
    pub expected_return: f64,
}

/// What an expert is asked to evaluate
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Category(&'a AssetCategory),
    Asset(&'a Asset),
}

impl<'a> Subject<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Subject::Category(c) => &c.name,
            Subject::Asset(a) => &a.name,
        }
    }

    /// Category name or ticker, used to key panel results
    pub fn key(&self) -> &'a str {
        match self {
            Subject::Category(c) => &c.name,
            Subject::Asset(a) => &a.ticker,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAllocation {
    pub category: String,
    pub ticker: String,
    /// Percent of the portfolio
    pub allocation: f64,
    pub amount: f64,
    pub expected_return: f64,
    pub cagr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyType {
    Conservative,
    Aggressive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_investment: f64,
    /// Allocation-weighted CAGR, percent
    #[serde(rename = "targetCAGR")]
    pub target_cagr: f64,
    pub target_return: f64,
    pub allocations: Vec<PortfolioAllocation>,
    pub expert_consensus: ExpertConsensus,
    pub risk_level: RiskLevel,
    pub strategy_type: StrategyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBreakdown {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
    pub gain: f64,
}

/// Monthly-contribution projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundCalculation {
    pub monthly_investment: f64,
    /// Months
    pub investment_period: u32,
    pub cagr: f64,
    pub total_invested: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub yearly_breakdown: Vec<YearlyBreakdown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioKind {
    Bull,
    Base,
    Bear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSimulation {
    pub scenario: ScenarioKind,
    /// Percent
    pub probability: f64,
    pub expected_return: f64,
    pub cagr: f64,
    /// Percent
    pub drawdown: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSimulation {
    pub scenarios: Vec<ScenarioSimulation>,
    #[serde(rename = "weightedROI")]
    pub weighted_roi: f64,
    pub sharpe_ratio: f64,
    pub volatility: f64,
    pub policy_risk: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub report_date: NaiveDate,
    pub version: String,
    pub monthly_investment: f64,
    pub five_year_goal: f64,
    #[serde(rename = "weeklyROIChange")]
    pub weekly_roi_change: f64,
}

/// Root aggregate handed to presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub metadata: ReportMetadata,
    pub user_context: UserContext,
    pub selected_categories: Vec<AssetCategory>,
    pub top_assets: Vec<Asset>,
    pub portfolio: Portfolio,
    pub simulation: PortfolioSimulation,
    pub compound_calculation: CompoundCalculation,
    pub expert_consensus: ExpertConsensus,
    /// Verified sources only
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalFeasibility {
    pub achievable: bool,
    /// 0-100
    pub confidence: f64,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> UserContext {
        UserContext {
            name: "tester".to_string(),
            monthly_investment: 3_000_000.0,
            total_investment_period: 60,
            target_return: 1_000_000_000.0,
            investment_goal: None,
            investment_style: None,
            current_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
        }
    }

    #[test]
    fn test_context_validation() {
        assert!(context().validate().is_ok());

        let mut ctx = context();
        ctx.monthly_investment = 0.0;
        assert!(matches!(ctx.validate(), Err(ReportError::InvalidContext(_))));

        let mut ctx = context();
        ctx.total_investment_period = 0;
        assert!(ctx.validate().is_err());

        let mut ctx = context();
        ctx.target_return = f64::NAN;
        assert!(ctx.validate().is_err());
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(serde_json::to_string(&SourceGrade::APlus).unwrap(), "\"A+\"");
        assert_eq!(
            serde_json::to_string(&MisinfoType::FalseLikely).unwrap(),
            "\"FALSE_LIKELY\""
        );
        assert_eq!(serde_json::to_string(&ScenarioKind::Bull).unwrap(), "\"BULL\"");
        assert_eq!(
            serde_json::to_string(&ExpertType::TechSpecialist).unwrap(),
            "\"tech_specialist\""
        );
    }

    #[test]
    fn test_optional_concerns_omitted() {
        let analysis = ExpertAnalysis {
            expert_type: ExpertType::Economist,
            perspective: "Macro".to_string(),
            key_points: vec![],
            score: 8.0,
            reasoning: String::new(),
            concerns: None,
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("concerns").is_none());
        assert_eq!(value["expertType"], "economist");
    }
}
