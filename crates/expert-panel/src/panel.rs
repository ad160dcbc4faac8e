use std::collections::HashMap;
use std::sync::Arc;

use consensus_core::numeric::{clamp_or_min, round_to};
use consensus_core::{
    Asset, AssetCategory, ExpertConsensus, ExpertScorer, ExpertType, ExpertWeights,
    InvestmentGoals, ReportError, Subject,
};
use tracing::debug;

use crate::consensus::create_expert_consensus;
use crate::scoring::FixtureScorer;

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Runs the full roster against a subject through the configured scorer.
#[derive(Clone)]
pub struct ExpertPanel {
    scorer: Arc<dyn ExpertScorer>,
    goals: InvestmentGoals,
    weights: ExpertWeights,
}

impl ExpertPanel {
    pub fn new(scorer: Arc<dyn ExpertScorer>, goals: InvestmentGoals, weights: ExpertWeights) -> Self {
        Self {
            scorer,
            goals,
            weights,
        }
    }

    /// One analysis per archetype, in roster order, aggregated into a consensus.
    ///
    /// Scores from the scorer are clamped to 1-10 and rounded to one decimal
    /// before aggregation.
    pub fn run_expert_panel(
        &self,
        subject: Subject<'_>,
        context: &str,
    ) -> Result<ExpertConsensus, ReportError> {
        let analyses = ExpertType::ALL
            .iter()
            .map(|expert| {
                let mut analysis = self.scorer.analyze(*expert, subject, context)?;
                analysis.score = round_to(clamp_or_min(analysis.score, MIN_SCORE, MAX_SCORE), 1);
                Ok(analysis)
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let consensus = create_expert_consensus(analyses, &self.goals, &self.weights);
        debug!(
            subject = subject.key(),
            consensus_score = consensus.consensus_score,
            bias_guard = consensus.bias_guard_triggered,
            "Expert panel complete"
        );
        Ok(consensus)
    }

    /// Consensus per category, keyed by category name
    pub fn analyze_categories(
        &self,
        categories: &[AssetCategory],
        context: &str,
    ) -> Result<HashMap<String, ExpertConsensus>, ReportError> {
        categories
            .iter()
            .map(|category| {
                let consensus = self.run_expert_panel(Subject::Category(category), context)?;
                Ok((category.name.clone(), consensus))
            })
            .collect()
    }

    /// Consensus per asset, keyed by ticker
    pub fn analyze_assets(
        &self,
        assets: &[Asset],
        context: &str,
    ) -> Result<HashMap<String, ExpertConsensus>, ReportError> {
        assets
            .iter()
            .map(|asset| {
                let consensus = self.run_expert_panel(Subject::Asset(asset), context)?;
                Ok((asset.ticker.clone(), consensus))
            })
            .collect()
    }
}

impl Default for ExpertPanel {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureScorer::default()),
            InvestmentGoals::default(),
            ExpertWeights::default(),
        )
    }
}

impl std::fmt::Debug for ExpertPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpertPanel")
            .field("goals", &self.goals)
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}
