use std::sync::Mutex;

use consensus_core::numeric::{clamp_or_min, round_to};
use consensus_core::{ExpertAnalysis, ExpertScorer, ExpertType, ReportError, Subject};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::roster::profile;

/// Score every generated analysis starts from
pub const DEFAULT_BASE_SCORE: f64 = 7.5;

/// Scores below this carry concerns
const CONCERN_BELOW: f64 = 7.0;

/// Per-archetype deviation from the base score, in roster order
const FIXTURE_OFFSETS: [f64; 8] = [0.6, 0.9, -0.4, 0.2, -0.8, 0.5, -0.2, 0.1];

/// Template analysis around a raw score: clamped to 1-10 and rounded to one
/// decimal, three key points from the archetype's criteria, concerns below 7.
fn templated_analysis(expert: ExpertType, subject: Subject<'_>, raw_score: f64) -> ExpertAnalysis {
    let profile = profile(expert);
    let name = subject.name();
    let score = round_to(clamp_or_min(raw_score, 1.0, 10.0), 1);

    let first = profile.criteria[0];
    let second = profile.criteria.get(1).copied().unwrap_or(first);
    let third = profile.criteria.get(2).copied().unwrap_or(first);

    let verdict = if score >= CONCERN_BELOW { "positive" } else { "neutral" };

    ExpertAnalysis {
        expert_type: expert,
        perspective: profile.role.to_string(),
        key_points: vec![
            format!("{name}: {first} analysis is positive"),
            format!("Growth potential confirmed on {second}"),
            format!("Promising long-term outlook for {third}"),
        ],
        score,
        reasoning: format!(
            "From a {} perspective, {} rates {} on {}.",
            profile.role,
            name,
            verdict,
            profile.criteria.join(", ")
        ),
        concerns: (score < CONCERN_BELOW).then(|| {
            vec![
                "Short-term volatility".to_string(),
                "Market uncertainty".to_string(),
            ]
        }),
    }
}

/// Deterministic scorer: base score plus a fixed offset per archetype.
#[derive(Debug, Clone)]
pub struct FixtureScorer {
    base_score: f64,
}

impl FixtureScorer {
    pub fn new(base_score: f64) -> Self {
        Self { base_score }
    }
}

impl Default for FixtureScorer {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_SCORE)
    }
}

impl ExpertScorer for FixtureScorer {
    fn analyze(
        &self,
        expert: ExpertType,
        subject: Subject<'_>,
        _context: &str,
    ) -> Result<ExpertAnalysis, ReportError> {
        let offset = FIXTURE_OFFSETS[expert as usize];
        Ok(templated_analysis(expert, subject, self.base_score + offset))
    }
}

/// Demo scorer: base score plus uniform jitter in [-1, 1].
///
/// Seeded runs are reproducible as long as calls arrive in the same order.
#[derive(Debug)]
pub struct JitterScorer {
    base_score: f64,
    rng: Mutex<StdRng>,
}

impl JitterScorer {
    pub fn seeded(base_score: f64, seed: u64) -> Self {
        Self {
            base_score,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy(base_score: f64) -> Self {
        Self {
            base_score,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl ExpertScorer for JitterScorer {
    fn analyze(
        &self,
        expert: ExpertType,
        subject: Subject<'_>,
        _context: &str,
    ) -> Result<ExpertAnalysis, ReportError> {
        let jitter: f64 = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| ReportError::Scoring("jitter rng lock poisoned".to_string()))?;
            rng.gen_range(-1.0..=1.0)
        };
        Ok(templated_analysis(expert, subject, self.base_score + jitter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::AssetCategory;

    fn category() -> AssetCategory {
        AssetCategory {
            name: "AI & Semiconductors".to_string(),
            growth_score: 9.5,
            innovation_score: 9.8,
            sustainability_score: 8.0,
            trust_score: 8.5,
            compound_potential: 9.5,
            average_score: 9.1,
            consensus_score: 9.2,
            cagr: 35.0,
            sharpe_ratio: 1.8,
            max_drawdown: 22.0,
            selected: true,
        }
    }

    #[test]
    fn test_fixture_scores() {
        let scorer = FixtureScorer::default();
        let cat = category();
        let scores: Vec<f64> = ExpertType::ALL
            .iter()
            .map(|e| scorer.analyze(*e, Subject::Category(&cat), "").unwrap().score)
            .collect();
        assert_eq!(scores, vec![8.1, 8.4, 7.1, 7.7, 6.7, 8.0, 7.3, 7.6]);
    }

    #[test]
    fn test_concerns_below_seven() {
        let scorer = FixtureScorer::default();
        let cat = category();
        let low = scorer
            .analyze(ExpertType::BlockchainSpecialist, Subject::Category(&cat), "")
            .unwrap();
        assert_eq!(low.key_points.len(), 3);
        assert!(low.concerns.is_some());

        let high = scorer
            .analyze(ExpertType::Economist, Subject::Category(&cat), "")
            .unwrap();
        assert!(high.concerns.is_none());
        assert!(high.key_points[0].starts_with("AI & Semiconductors"));
    }

    #[test]
    fn test_scores_are_clamped() {
        let cat = category();
        let high = FixtureScorer::new(12.0)
            .analyze(ExpertType::TechSpecialist, Subject::Category(&cat), "")
            .unwrap();
        assert_eq!(high.score, 10.0);

        let low = FixtureScorer::new(-3.0)
            .analyze(ExpertType::Futurist, Subject::Category(&cat), "")
            .unwrap();
        assert_eq!(low.score, 1.0);
    }

    #[test]
    fn test_jitter_is_bounded_and_reproducible() {
        let cat = category();
        let a = JitterScorer::seeded(DEFAULT_BASE_SCORE, 42);
        let b = JitterScorer::seeded(DEFAULT_BASE_SCORE, 42);

        for expert in ExpertType::ALL {
            let x = a.analyze(expert, Subject::Category(&cat), "").unwrap();
            let y = b.analyze(expert, Subject::Category(&cat), "").unwrap();
            assert_eq!(x.score, y.score);
            assert!((6.5..=8.5).contains(&x.score), "{}", x.score);
        }
    }
}
