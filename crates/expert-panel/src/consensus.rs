use std::collections::HashSet;

use consensus_core::numeric::round_to;
use consensus_core::{ExpertAnalysis, ExpertConsensus, ExpertWeights, InvestmentGoals};
use tracing::info;

use crate::roster::profile;

const TOP_REASON_COUNT: usize = 3;

/// Weighted mean of the scores using the archetype weights; 0 when the
/// weights sum to zero.
pub fn calculate_consensus_score(analyses: &[ExpertAnalysis], weights: &ExpertWeights) -> f64 {
    let (weighted_sum, total_weight) = analyses.iter().fold((0.0, 0.0), |(sum, total), a| {
        let w = weights.weight(a.expert_type);
        (sum + a.score * w, total + w)
    });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// True when the share of experts scoring at least `positive_score` reaches
/// `threshold`. An empty panel never triggers.
pub fn check_bias_guard(analyses: &[ExpertAnalysis], threshold: f64, positive_score: f64) -> bool {
    if analyses.is_empty() {
        return false;
    }
    let positive = analyses.iter().filter(|a| a.score >= positive_score).count();
    positive as f64 / analyses.len() as f64 >= threshold
}

/// Score spread strictly above `spread`; needs at least two opinions.
pub fn needs_debate(analyses: &[ExpertAnalysis], spread: f64) -> bool {
    if analyses.len() < 2 {
        return false;
    }
    let max = analyses.iter().map(|a| a.score).fold(f64::NEG_INFINITY, f64::max);
    let min = analyses.iter().map(|a| a.score).fold(f64::INFINITY, f64::min);
    max - min > spread
}

/// First concern of the lowest scorer, prefixed with its role. Ties go to
/// the earliest analysis.
pub fn extract_dissenting_opinion(analyses: &[ExpertAnalysis]) -> Option<String> {
    let lowest = analyses.iter().reduce(|lowest, a| {
        if a.score < lowest.score {
            a
        } else {
            lowest
        }
    })?;

    let concern = lowest.concerns.as_ref()?.first()?;
    Some(format!("{}: {}", profile(lowest.expert_type).role, concern))
}

/// First three distinct key points, in the order they were first seen
pub fn extract_top_reasons(analyses: &[ExpertAnalysis]) -> Vec<String> {
    let mut seen = HashSet::new();
    analyses
        .iter()
        .flat_map(|a| a.key_points.iter())
        .filter(|point| seen.insert(*point))
        .take(TOP_REASON_COUNT)
        .cloned()
        .collect()
}

/// Aggregate a panel run. The consensus score is rounded to one decimal.
pub fn create_expert_consensus(
    analyses: Vec<ExpertAnalysis>,
    goals: &InvestmentGoals,
    weights: &ExpertWeights,
) -> ExpertConsensus {
    let consensus_score = round_to(calculate_consensus_score(&analyses, weights), 1);
    let top_reasons = extract_top_reasons(&analyses);
    let dissenting_opinion = extract_dissenting_opinion(&analyses);
    let bias_guard_triggered =
        check_bias_guard(&analyses, goals.bias_guard_threshold, goals.positive_score);
    let debate_triggered = needs_debate(&analyses, goals.debate_spread);

    if debate_triggered {
        info!(
            experts = analyses.len(),
            "Expert debate triggered: score spread above {} points", goals.debate_spread
        );
    }

    ExpertConsensus {
        analyses,
        consensus_score,
        top_reasons,
        dissenting_opinion,
        bias_guard_triggered,
        debate_triggered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use consensus_core::ExpertType;

    fn analysis(expert: ExpertType, score: f64, points: &[&str], concerns: Option<&[&str]>) -> ExpertAnalysis {
        ExpertAnalysis {
            expert_type: expert,
            perspective: profile(expert).role.to_string(),
            key_points: points.iter().map(|p| p.to_string()).collect(),
            score,
            reasoning: String::new(),
            concerns: concerns.map(|c| c.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_weighted_consensus() {
        let weights = ExpertWeights::default();
        let analyses = vec![
            analysis(ExpertType::Economist, 9.0, &[], None),
            analysis(ExpertType::Futurist, 6.0, &[], None),
        ];
        // (9*1.15 + 6*0.9) / 2.05
        assert_relative_eq!(
            calculate_consensus_score(&analyses, &weights),
            (9.0 * 1.15 + 6.0 * 0.9) / 2.05,
            epsilon = 1e-9
        );
        assert_eq!(calculate_consensus_score(&[], &weights), 0.0);
    }

    #[test]
    fn test_zero_weights() {
        let weights = ExpertWeights {
            economist: 0.0,
            ..ExpertWeights::default()
        };
        let analyses = vec![analysis(ExpertType::Economist, 9.0, &[], None)];
        assert_eq!(calculate_consensus_score(&analyses, &weights), 0.0);
    }

    #[test]
    fn test_bias_guard() {
        let five_of_eight: Vec<_> = ExpertType::ALL
            .iter()
            .enumerate()
            .map(|(i, e)| analysis(*e, if i < 5 { 8.0 } else { 5.0 }, &[], None))
            .collect();
        // 5/8 = 0.625
        assert!(check_bias_guard(&five_of_eight, 0.6, 7.0));
        assert!(!check_bias_guard(&five_of_eight[3..], 0.6, 7.0));
        assert!(!check_bias_guard(&[], 0.6, 7.0));
    }

    #[test]
    fn test_debate_spread() {
        let wide = vec![
            analysis(ExpertType::Economist, 9.0, &[], None),
            analysis(ExpertType::Futurist, 5.5, &[], None),
        ];
        let edge = vec![
            analysis(ExpertType::Economist, 9.0, &[], None),
            analysis(ExpertType::Futurist, 6.0, &[], None),
        ];
        assert!(needs_debate(&wide, 3.0));
        assert!(!needs_debate(&edge, 3.0));
        assert!(!needs_debate(&wide[..1], 3.0));
    }

    #[test]
    fn test_dissent_tie_goes_to_first() {
        let analyses = vec![
            analysis(ExpertType::Economist, 8.0, &[], None),
            analysis(ExpertType::Futurist, 5.0, &[], Some(&["Policy reversal"])),
            analysis(ExpertType::DataAnalyst, 5.0, &[], Some(&["Stretched multiples"])),
        ];
        assert_eq!(
            extract_dissenting_opinion(&analyses).as_deref(),
            Some("Social, environmental and policy trends: Policy reversal")
        );
    }

    #[test]
    fn test_dissent_absent_without_concerns() {
        let analyses = vec![
            analysis(ExpertType::Economist, 4.0, &[], None),
            analysis(ExpertType::Futurist, 6.0, &[], Some(&["Policy reversal"])),
        ];
        assert!(extract_dissenting_opinion(&analyses).is_none());
        assert!(extract_dissenting_opinion(&[]).is_none());
    }

    #[test]
    fn test_top_reasons_first_seen() {
        let analyses = vec![
            analysis(ExpertType::Economist, 8.0, &["a", "b"], None),
            analysis(ExpertType::Futurist, 8.0, &["b", "c", "d"], None),
        ];
        assert_eq!(extract_top_reasons(&analyses), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_create_consensus_flags() {
        let analyses = vec![
            analysis(ExpertType::Economist, 9.5, &["x"], None),
            analysis(ExpertType::Futurist, 4.0, &["y"], Some(&["Too early"])),
        ];
        let consensus =
            create_expert_consensus(analyses, &InvestmentGoals::default(), &ExpertWeights::default());
        assert!(consensus.debate_triggered);
        assert!(!consensus.bias_guard_triggered);
        assert_eq!(consensus.analyses.len(), 2);
        assert_eq!(consensus.top_reasons, vec!["x", "y"]);
        assert!(consensus.dissenting_opinion.is_some());
    }
}
