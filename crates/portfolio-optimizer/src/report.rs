use std::sync::Arc;

use chrono::Utc;
use consensus_core::{
    Asset, AssetCategory, EngineConfig, ExpertScorer, Portfolio, PortfolioReport, ReportError,
    ReportMetadata, Source, Subject, UserContext,
};
use expert_panel::{ExpertPanel, FixtureScorer};
use finance_calculator::{calculate_compound_return, run_portfolio_simulation};
use source_validator::{SourceValidator, TrustScorer};
use tracing::info;

use crate::allocation::{
    calculate_portfolio_cagr, classify_risk, classify_strategy, optimize_allocations,
};
use crate::catalog::{MockUniverse, UniverseProvider};
use crate::selection::{select_categories, select_top_assets};

/// Intermediate result of the selection and weighting steps
struct PortfolioPlan {
    categories: Vec<AssetCategory>,
    assets: Vec<Asset>,
    portfolio: Portfolio,
}

/// Assembles portfolio reports from a universe, an expert scorer and an
/// immutable configuration. Shared read-only between requests.
#[derive(Clone)]
pub struct ReportEngine {
    config: Arc<EngineConfig>,
    universe: Arc<dyn UniverseProvider>,
    panel: ExpertPanel,
    trust: TrustScorer,
    validator: SourceValidator,
}

impl ReportEngine {
    pub fn new(
        config: EngineConfig,
        universe: Arc<dyn UniverseProvider>,
        scorer: Arc<dyn ExpertScorer>,
    ) -> Result<Self, ReportError> {
        config.validate()?;

        let panel = ExpertPanel::new(scorer, config.goals.clone(), config.expert_weights.clone());
        let trust = TrustScorer::new(&config);
        let validator = SourceValidator::new(config.savl.clone());

        Ok(Self {
            config: Arc::new(config),
            universe,
            panel,
            trust,
            validator,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn panel(&self) -> &ExpertPanel {
        &self.panel
    }

    /// Top assets of one category using the standalone pick count
    pub fn top_assets(&self, category: &AssetCategory) -> Vec<Asset> {
        select_top_assets(self.universe.as_ref(), category, self.config.standalone_top_assets)
    }

    /// Screen, pick, weight and review. The panel reviews the lead asset.
    pub fn generate_portfolio(&self, ctx: &UserContext) -> Result<Portfolio, ReportError> {
        ctx.validate()?;
        Ok(self.plan_portfolio(ctx)?.portfolio)
    }

    fn plan_portfolio(&self, ctx: &UserContext) -> Result<PortfolioPlan, ReportError> {
        let universe = self.universe.categories();
        if universe.is_empty() {
            return Err(ReportError::EmptyUniverse(
                "universe provides no categories".to_string(),
            ));
        }

        let categories = select_categories(&universe, &self.config.goals, &self.config.risk);
        let assets: Vec<Asset> = categories
            .iter()
            .flat_map(|category| {
                select_top_assets(self.universe.as_ref(), category, self.config.assets_per_category)
            })
            .collect();

        let Some(lead) = assets.first() else {
            return Err(ReportError::EmptyUniverse(format!(
                "no assets passed screening across {} categories",
                universe.len()
            )));
        };

        let allocations = optimize_allocations(&assets, ctx.monthly_investment);
        let portfolio_cagr = calculate_portfolio_cagr(&allocations);

        let review_context = format!(
            "Whole-portfolio review: {} per month over {} months toward {}",
            ctx.monthly_investment, ctx.total_investment_period, ctx.target_return
        );
        let expert_consensus = self
            .panel
            .run_expert_panel(Subject::Asset(lead), &review_context)?;

        let now = Utc::now();
        let portfolio = Portfolio {
            user_id: ctx.name.clone(),
            created_at: now,
            updated_at: now,
            total_investment: ctx.monthly_investment,
            target_cagr: portfolio_cagr,
            target_return: ctx.target_return,
            allocations,
            expert_consensus,
            risk_level: classify_risk(portfolio_cagr, &self.config.risk),
            strategy_type: classify_strategy(portfolio_cagr, &self.config.risk),
        };

        Ok(PortfolioPlan {
            categories,
            assets,
            portfolio,
        })
    }

    /// Score the reference material and keep the verified tier, most
    /// trusted first.
    fn verified_sources(&self, ctx: &UserContext) -> Vec<Source> {
        let sources: Vec<Source> = self
            .universe
            .reference_sources()
            .into_iter()
            .map(|input| self.trust.create_source(input, ctx.current_date))
            .collect();

        let validation = self.validator.perform_savl_validation(&sources);
        self.validator
            .perform_source_backtracking(&validation.verified, self.config.savl.backtrack_top_n);
        self.validator
            .filter_and_sort_sources(&validation.verified, self.config.savl.verified_min)
    }

    /// Full pipeline for one user context. Any failing step aborts the
    /// report.
    pub fn generate_full_report(&self, ctx: &UserContext) -> Result<PortfolioReport, ReportError> {
        ctx.validate()?;
        info!(user = %ctx.name, "Generating portfolio report");

        let PortfolioPlan {
            categories,
            assets,
            portfolio,
        } = self.plan_portfolio(ctx)?;

        let compound_calculation = calculate_compound_return(
            ctx.monthly_investment,
            portfolio.target_cagr,
            ctx.total_investment_period,
        );
        if !compound_calculation.final_value.is_finite() {
            return Err(ReportError::Calculation(format!(
                "projection diverged at CAGR {:.2}%",
                portfolio.target_cagr
            )));
        }

        let simulation = run_portfolio_simulation(
            portfolio.target_cagr,
            compound_calculation.total_return,
            self.config.default_volatility,
            &self.config,
        );

        let sources = self.verified_sources(ctx);

        let top_assets: Vec<Asset> = portfolio
            .allocations
            .iter()
            .filter_map(|allocation| {
                let asset = assets.iter().find(|a| a.ticker == allocation.ticker)?;
                Some(Asset {
                    expected_return: allocation.expected_return,
                    sources: sources_mentioning(asset, &sources),
                    ..asset.clone()
                })
            })
            .collect();

        let report = PortfolioReport {
            metadata: ReportMetadata {
                report_date: ctx.current_date,
                version: self.config.report_version.clone(),
                monthly_investment: ctx.monthly_investment,
                five_year_goal: ctx.target_return,
                weekly_roi_change: 0.0,
            },
            user_context: ctx.clone(),
            selected_categories: categories,
            top_assets,
            expert_consensus: portfolio.expert_consensus.clone(),
            portfolio,
            simulation,
            compound_calculation,
            sources,
        };

        info!(
            user = %ctx.name,
            holdings = report.portfolio.allocations.len(),
            portfolio_cagr = report.portfolio.target_cagr,
            final_value = report.compound_calculation.final_value,
            "Portfolio report ready"
        );
        Ok(report)
    }
}

/// Sources whose title names the asset or its ticker
fn sources_mentioning(asset: &Asset, sources: &[Source]) -> Vec<Source> {
    let name = asset.name.to_lowercase();
    let ticker = asset.ticker.to_lowercase();
    sources
        .iter()
        .filter(|s| {
            let title = s.title.to_lowercase();
            title.contains(&name) || title.contains(&ticker)
        })
        .cloned()
        .collect()
}

impl Default for ReportEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let panel = ExpertPanel::new(
            Arc::new(FixtureScorer::default()),
            config.goals.clone(),
            config.expert_weights.clone(),
        );
        Self {
            trust: TrustScorer::new(&config),
            validator: SourceValidator::new(config.savl.clone()),
            config: Arc::new(config),
            universe: Arc::new(MockUniverse),
            panel,
        }
    }
}

impl std::fmt::Debug for ReportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use consensus_core::{MisinfoType, RiskLevel, StrategyType};
    use source_validator::SourceInput;

    use crate::catalog::AI_ML;

    fn context() -> UserContext {
        UserContext {
            name: "investor".to_string(),
            monthly_investment: 3_000_000.0,
            total_investment_period: 60,
            target_return: 1_000_000_000.0,
            investment_goal: Some("Long-term value investing".to_string()),
            investment_style: None,
            current_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
        }
    }

    #[test]
    fn test_portfolio_from_mock_universe() {
        let engine = ReportEngine::default();
        let portfolio = engine.generate_portfolio(&context()).unwrap();

        let tickers: Vec<_> = portfolio.allocations.iter().map(|a| a.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["PLTR", "NVDA", "AMD", "ASML", "TSLA", "ENPH"]);

        // Σ cagr² / Σ cagr = 5314 / 178
        assert_relative_eq!(portfolio.target_cagr, 5_314.0 / 178.0, epsilon = 0.05);
        assert_eq!(portfolio.risk_level, RiskLevel::Medium);
        assert_eq!(portfolio.strategy_type, StrategyType::Conservative);
        assert_eq!(portfolio.total_investment, 3_000_000.0);
        assert_eq!(portfolio.expert_consensus.analyses.len(), 8);
    }

    #[test]
    fn test_full_report() {
        let engine = ReportEngine::default();
        let report = engine.generate_full_report(&context()).unwrap();

        assert_eq!(report.selected_categories.len(), 3);
        assert_eq!(report.top_assets.len(), 6);
        assert_eq!(report.metadata.version, "v4.2");
        assert_eq!(report.compound_calculation.total_invested, 180_000_000.0);
        assert_eq!(report.compound_calculation.yearly_breakdown.len(), 5);
        assert_eq!(report.simulation.scenarios.len(), 3);
        assert_eq!(
            report.expert_consensus.consensus_score,
            report.portfolio.expert_consensus.consensus_score
        );

        assert_eq!(report.sources.len(), 2);
        assert!(report
            .sources
            .iter()
            .all(|s| s.misinfo_type == MisinfoType::Verified));
        assert!(report.sources[0].trust_score >= report.sources[1].trust_score);

        let nvda = report.top_assets.iter().find(|a| a.ticker == "NVDA").unwrap();
        assert_eq!(nvda.sources.len(), 1);
        assert!(nvda.expected_return > 0.0);
    }

    #[test]
    fn test_invalid_context_rejected() {
        let engine = ReportEngine::default();
        let mut ctx = context();
        ctx.monthly_investment = -1.0;
        assert!(matches!(
            engine.generate_full_report(&ctx),
            Err(ReportError::InvalidContext(_))
        ));
    }

    struct EmptyUniverse;

    impl UniverseProvider for EmptyUniverse {
        fn categories(&self) -> Vec<AssetCategory> {
            Vec::new()
        }
        fn assets(&self, _category: &str) -> Vec<Asset> {
            Vec::new()
        }
        fn reference_sources(&self) -> Vec<SourceInput> {
            Vec::new()
        }
    }

    /// Categories that all fail screening
    struct RiskyUniverse;

    impl UniverseProvider for RiskyUniverse {
        fn categories(&self) -> Vec<AssetCategory> {
            MockUniverse
                .categories()
                .into_iter()
                .map(|c| AssetCategory {
                    max_drawdown: 60.0,
                    ..c
                })
                .collect()
        }
        fn assets(&self, category: &str) -> Vec<Asset> {
            MockUniverse.assets(category)
        }
        fn reference_sources(&self) -> Vec<SourceInput> {
            Vec::new()
        }
    }

    #[test]
    fn test_empty_universe_errors() {
        let engine = ReportEngine::new(
            EngineConfig::default(),
            Arc::new(EmptyUniverse),
            Arc::new(FixtureScorer::default()),
        )
        .unwrap();
        assert!(matches!(
            engine.generate_full_report(&context()),
            Err(ReportError::EmptyUniverse(_))
        ));

        let engine = ReportEngine::new(
            EngineConfig::default(),
            Arc::new(RiskyUniverse),
            Arc::new(FixtureScorer::default()),
        )
        .unwrap();
        assert!(matches!(
            engine.generate_portfolio(&context()),
            Err(ReportError::EmptyUniverse(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.scenarios.base = 0.9;
        let result = ReportEngine::new(
            config,
            Arc::new(MockUniverse),
            Arc::new(FixtureScorer::default()),
        );
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
    }

    #[test]
    fn test_standalone_top_assets() {
        let engine = ReportEngine::default();
        let ai = MockUniverse
            .categories()
            .into_iter()
            .find(|c| c.name == AI_ML)
            .unwrap();
        assert_eq!(engine.top_assets(&ai).len(), 3);
    }

    #[test]
    fn test_report_serializes_with_wire_names() {
        let report = ReportEngine::default().generate_full_report(&context()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["portfolio"]["targetCAGR"].is_number());
        assert!(value["simulation"]["weightedROI"].is_number());
        assert_eq!(value["metadata"]["reportDate"], "2025-10-20");
    }
}
