use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use consensus_core::{ExpertScorer, UserContext};
use expert_panel::{scoring::DEFAULT_BASE_SCORE, FixtureScorer, JitterScorer};

/// Which expert scoring strategy backs the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    Fixture,
    /// Seeded when `SCORER_SEED` is set, entropy otherwise
    Jitter(Option<u64>),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub cache_max_age_secs: i64,
    pub enable_hsts: bool,
    pub scorer: ScorerKind,
    pub user_name: String,
    pub monthly_investment: f64,
    pub investment_period_months: u32,
    pub target_return: f64,
    pub investment_goal: Option<String>,
    pub investment_style: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            cache_max_age_secs: 3600,
            enable_hsts: false,
            scorer: ScorerKind::Fixture,
            user_name: "default".to_string(),
            monthly_investment: 3_000_000.0,
            investment_period_months: 60,
            target_return: 1_000_000_000.0,
            investment_goal: Some("Long-term value investing".to_string()),
            investment_style: Some("Monthly dollar-cost averaging".to_string()),
        }
    }
}

impl ServerConfig {
    /// Read settings from the environment. Call after `.env` is loaded.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let scorer = match env::var("SCORER")
            .unwrap_or_else(|_| "fixture".to_string())
            .to_lowercase()
            .as_str()
        {
            "fixture" => ScorerKind::Fixture,
            "jitter" => ScorerKind::Jitter(
                env::var("SCORER_SEED")
                    .ok()
                    .map(|s| s.parse::<u64>())
                    .transpose()
                    .context("SCORER_SEED must be an unsigned integer")?,
            ),
            other => bail!("Invalid SCORER: {}. Must be 'fixture' or 'jitter'", other),
        };

        let config = Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cache_max_age_secs: env::var("CACHE_MAX_AGE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("CACHE_MAX_AGE_SECS must be an integer")?,
            enable_hsts: env::var("ENABLE_HSTS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            scorer,
            user_name: env::var("USER_NAME").unwrap_or(defaults.user_name),
            monthly_investment: env::var("MONTHLY_INVESTMENT")
                .unwrap_or_else(|_| "3000000".to_string())
                .parse()
                .context("MONTHLY_INVESTMENT must be a number")?,
            investment_period_months: env::var("INVESTMENT_PERIOD_MONTHS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("INVESTMENT_PERIOD_MONTHS must be a whole number of months")?,
            target_return: env::var("TARGET_RETURN")
                .unwrap_or_else(|_| "1000000000".to_string())
                .parse()
                .context("TARGET_RETURN must be a number")?,
            investment_goal: env::var("INVESTMENT_GOAL").ok().or(defaults.investment_goal),
            investment_style: env::var("INVESTMENT_STYLE").ok().or(defaults.investment_style),
        };

        if config.cache_max_age_secs < 0 {
            bail!("CACHE_MAX_AGE_SECS must not be negative");
        }
        Ok(config)
    }

    /// The configured investor profile as of `today`
    pub fn user_context(&self, today: NaiveDate) -> UserContext {
        UserContext {
            name: self.user_name.clone(),
            monthly_investment: self.monthly_investment,
            total_investment_period: self.investment_period_months,
            target_return: self.target_return,
            investment_goal: self.investment_goal.clone(),
            investment_style: self.investment_style.clone(),
            current_date: today,
        }
    }

    pub fn build_scorer(&self) -> Arc<dyn ExpertScorer> {
        match self.scorer {
            ScorerKind::Fixture => Arc::new(FixtureScorer::default()),
            ScorerKind::Jitter(Some(seed)) => Arc::new(JitterScorer::seeded(DEFAULT_BASE_SCORE, seed)),
            ScorerKind::Jitter(None) => Arc::new(JitterScorer::from_entropy(DEFAULT_BASE_SCORE)),
        }
    }
}
