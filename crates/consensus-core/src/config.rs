//! Engine configuration.
//!
//! Every weight table and threshold used by the scoring crates lives here.
//! An `EngineConfig` is built once at startup and passed by reference (or
//! behind an `Arc`) into each entry point; nothing reads ambient globals.

use serde::{Deserialize, Serialize};

use crate::{ExpertType, ReportError};

/// Weights of the trust-score linear blend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustWeights {
    pub base_score: f64,
    pub recency: f64,
    pub corroboration: f64,
    pub author_credibility: f64,
    pub transparency: f64,
    pub correction_speed: f64,
    /// Negative: conflicts lower the score
    pub conflict_of_interest: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            base_score: 0.35,
            recency: 0.15,
            corroboration: 0.15,
            author_credibility: 0.15,
            transparency: 0.10,
            correction_speed: 0.05,
            conflict_of_interest: -0.05,
        }
    }
}

/// Publisher reputation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherTier {
    Tier1,
    Tier2,
    Tier3,
    Unlisted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherTiers {
    pub tier1: Vec<String>,
    pub tier2: Vec<String>,
    pub tier3: Vec<String>,
}

impl PublisherTiers {
    /// Exact-name lookup, matching how publishers are recorded on sources
    pub fn tier(&self, publisher: &str) -> PublisherTier {
        if self.tier1.iter().any(|p| p == publisher) {
            PublisherTier::Tier1
        } else if self.tier2.iter().any(|p| p == publisher) {
            PublisherTier::Tier2
        } else if self.tier3.iter().any(|p| p == publisher) {
            PublisherTier::Tier3
        } else {
            PublisherTier::Unlisted
        }
    }
}

impl Default for PublisherTiers {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            tier1: owned(&["Bloomberg", "Reuters", "Morningstar"]),
            tier2: owned(&["CNBC", "CoinDesk", "FnGuide", "Financial Times"]),
            tier3: owned(&["Yahoo Finance", "MarketWatch", "Investing.com"]),
        }
    }
}

/// Source screening (SAVL) thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavlThresholds {
    pub watchlist_min: f64,
    pub verified_min: f64,
    pub cross_validation_min: u32,
    /// Repeats of the same content before the noise gate fires
    pub noise_gate_threshold: usize,
    pub noise_gate_penalty: f64,
    /// Growth signal fed into the opportunity score
    pub growth_signal: f64,
    /// Volatility context fed into the opportunity score
    pub volatility_context: f64,
    pub backtrack_top_n: usize,
}

impl Default for SavlThresholds {
    fn default() -> Self {
        Self {
            watchlist_min: 60.0,
            verified_min: 75.0,
            cross_validation_min: 2,
            noise_gate_threshold: 3,
            noise_gate_penalty: -30.0,
            growth_signal: 70.0,
            volatility_context: 60.0,
            backtrack_top_n: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentGoals {
    pub target_cagr: f64,
    pub min_acceptable_cagr: f64,
    pub min_consensus_score: f64,
    pub min_average_score: f64,
    pub max_holdings: usize,
    /// Share of positive experts that raises the bias guard
    pub bias_guard_threshold: f64,
    /// Score at or above which an expert counts as positive
    pub positive_score: f64,
    /// Max-min score spread above which a debate is flagged
    pub debate_spread: f64,
}

impl Default for InvestmentGoals {
    fn default() -> Self {
        Self {
            target_cagr: 30.0,
            min_acceptable_cagr: 18.0,
            min_consensus_score: 8.0,
            min_average_score: 7.0,
            max_holdings: 10,
            bias_guard_threshold: 0.6,
            positive_score: 7.0,
            debate_spread: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Categories at or above this drawdown are screened out
    pub max_drawdown_warning: f64,
    pub min_sharpe_ratio: f64,
    pub diversification_min_categories: usize,
    pub max_categories: usize,
    pub rebalance_threshold: f64,
    pub high_risk_cagr: f64,
    pub medium_risk_cagr: f64,
    pub aggressive_cagr: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            max_drawdown_warning: 25.0,
            min_sharpe_ratio: 0.5,
            diversification_min_categories: 3,
            max_categories: 5,
            rebalance_threshold: 5.0,
            high_risk_cagr: 35.0,
            medium_risk_cagr: 25.0,
            aggressive_cagr: 30.0,
        }
    }
}

/// Scenario probabilities (fractions, sum to 1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioWeights {
    pub bull: f64,
    pub base: f64,
    pub bear: f64,
}

impl Default for ScenarioWeights {
    fn default() -> Self {
        Self {
            bull: 0.25,
            base: 0.5,
            bear: 0.25,
        }
    }
}

/// Per-archetype importance in the consensus mean
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertWeights {
    pub economist: f64,
    pub tech_specialist: f64,
    pub futurist: f64,
    pub investment_strategist: f64,
    pub blockchain_specialist: f64,
    pub data_analyst: f64,
    pub behavioral_economist: f64,
    pub political_economist: f64,
}

impl ExpertWeights {
    pub fn weight(&self, expert: ExpertType) -> f64 {
        match expert {
            ExpertType::Economist => self.economist,
            ExpertType::TechSpecialist => self.tech_specialist,
            ExpertType::Futurist => self.futurist,
            ExpertType::InvestmentStrategist => self.investment_strategist,
            ExpertType::BlockchainSpecialist => self.blockchain_specialist,
            ExpertType::DataAnalyst => self.data_analyst,
            ExpertType::BehavioralEconomist => self.behavioral_economist,
            ExpertType::PoliticalEconomist => self.political_economist,
        }
    }
}

impl Default for ExpertWeights {
    fn default() -> Self {
        Self {
            economist: 1.15,
            tech_specialist: 1.15,
            futurist: 0.9,
            investment_strategist: 1.0,
            blockchain_specialist: 1.0,
            data_analyst: 1.15,
            behavioral_economist: 0.9,
            political_economist: 0.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub trust_weights: TrustWeights,
    pub publisher_tiers: PublisherTiers,
    pub savl: SavlThresholds,
    pub goals: InvestmentGoals,
    pub risk: RiskThresholds,
    pub scenarios: ScenarioWeights,
    pub expert_weights: ExpertWeights,
    pub report_version: String,
    /// Assets picked per category when assembling the full report
    pub assets_per_category: usize,
    /// Assets picked by the standalone top-asset helper
    pub standalone_top_assets: usize,
    /// Percent
    pub risk_free_rate: f64,
    /// Percent
    pub default_volatility: f64,
    pub policy_risk: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trust_weights: TrustWeights::default(),
            publisher_tiers: PublisherTiers::default(),
            savl: SavlThresholds::default(),
            goals: InvestmentGoals::default(),
            risk: RiskThresholds::default(),
            scenarios: ScenarioWeights::default(),
            expert_weights: ExpertWeights::default(),
            report_version: "v4.2".to_string(),
            assets_per_category: 2,
            standalone_top_assets: 3,
            risk_free_rate: 3.0,
            default_volatility: 15.0,
            policy_risk: 15.0,
        }
    }
}

impl EngineConfig {
    /// Reject tables that would make the scoring formulas meaningless
    pub fn validate(&self) -> Result<(), ReportError> {
        let scenario_sum = self.scenarios.bull + self.scenarios.base + self.scenarios.bear;
        if (scenario_sum - 1.0).abs() > 1e-6 {
            return Err(ReportError::InvalidConfig(format!(
                "scenario weights must sum to 1.0, got {scenario_sum:.4}"
            )));
        }
        if self.savl.watchlist_min > self.savl.verified_min {
            return Err(ReportError::InvalidConfig(
                "watchlist threshold must not exceed the verified threshold".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.goals.bias_guard_threshold) {
            return Err(ReportError::InvalidConfig(
                "bias guard threshold must be a fraction in [0, 1]".to_string(),
            ));
        }
        if ExpertType::ALL
            .iter()
            .any(|e| self.expert_weights.weight(*e) < 0.0)
        {
            return Err(ReportError::InvalidConfig(
                "expert weights must be non-negative".to_string(),
            ));
        }
        if self.assets_per_category == 0 || self.standalone_top_assets == 0 {
            return Err(ReportError::InvalidConfig(
                "top-asset counts must be at least 1".to_string(),
            ));
        }
        if self.risk.max_categories == 0 {
            return Err(ReportError::InvalidConfig(
                "category cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
