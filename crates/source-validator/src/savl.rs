use std::collections::HashMap;
use std::sync::Arc;

use consensus_core::{MisinfoType, SavlThresholds, Source};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fingerprint::{ContentFingerprint, TitleFingerprint};

/// `0.3×growth + 0.4×trust + 0.2×recency + 0.1×volatility context`
pub fn calculate_opportunity_score(
    growth_signal: f64,
    trust_score: f64,
    recency: f64,
    volatility_context: f64,
) -> f64 {
    0.3 * growth_signal + 0.4 * trust_score + 0.2 * recency + 0.1 * volatility_context
}

/// Result of the two-layer screening
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavlValidation {
    pub watchlist: Vec<Source>,
    pub verified: Vec<Source>,
    /// Mean opportunity score of the verified tier; 0 when it is empty
    pub opportunity_score: f64,
    /// Percent, 0 or negative
    pub noise_gate_penalty: f64,
}

impl SavlValidation {
    /// Opportunity score with the noise-gate penalty applied as a percentage
    pub fn adjusted_opportunity_score(&self) -> f64 {
        self.opportunity_score * (1.0 + self.noise_gate_penalty / 100.0)
    }
}

/// Sorts sources by trust score, highest first. Stable for equal scores.
fn sort_by_trust_desc(sources: &mut [Source]) {
    sources.sort_by(|a, b| {
        b.trust_score
            .partial_cmp(&a.trust_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Screens source sets. Watchlist: trust ≥ 60. Verified: trust ≥ 75 with at
/// least 2 cross-validations and classified VERIFIED.
#[derive(Clone)]
pub struct SourceValidator {
    thresholds: SavlThresholds,
    fingerprint: Arc<dyn ContentFingerprint>,
}

impl SourceValidator {
    pub fn new(thresholds: SavlThresholds) -> Self {
        Self::with_fingerprint(thresholds, Arc::new(TitleFingerprint))
    }

    pub fn with_fingerprint(
        thresholds: SavlThresholds,
        fingerprint: Arc<dyn ContentFingerprint>,
    ) -> Self {
        Self {
            thresholds,
            fingerprint,
        }
    }

    pub fn thresholds(&self) -> &SavlThresholds {
        &self.thresholds
    }

    pub fn is_watchlisted(&self, source: &Source) -> bool {
        source.trust_score >= self.thresholds.watchlist_min
    }

    pub fn is_verified(&self, source: &Source) -> bool {
        source.trust_score >= self.thresholds.verified_min
            && source.cross_validation_count >= self.thresholds.cross_validation_min
            && source.misinfo_type == MisinfoType::Verified
    }

    pub fn perform_savl_validation(&self, sources: &[Source]) -> SavlValidation {
        let watchlist: Vec<Source> = sources
            .iter()
            .filter(|s| self.is_watchlisted(s))
            .cloned()
            .collect();
        let verified: Vec<Source> = sources
            .iter()
            .filter(|s| self.is_verified(s))
            .cloned()
            .collect();

        let opportunity_score = if verified.is_empty() {
            0.0
        } else {
            verified
                .iter()
                .map(|s| {
                    calculate_opportunity_score(
                        self.thresholds.growth_signal,
                        s.trust_score,
                        s.recency,
                        self.thresholds.volatility_context,
                    )
                })
                .sum::<f64>()
                / verified.len() as f64
        };

        SavlValidation {
            watchlist,
            verified,
            opportunity_score,
            noise_gate_penalty: self.apply_noise_gate_penalty(sources),
        }
    }

    /// Penalty when any single piece of content is repeated across at least
    /// `noise_gate_threshold` sources.
    pub fn apply_noise_gate_penalty(&self, sources: &[Source]) -> f64 {
        let mut counts = HashMap::new();
        for source in sources {
            *counts.entry(self.fingerprint.fingerprint(source)).or_insert(0usize) += 1;
        }

        let repeated = counts
            .values()
            .any(|&count| count >= self.thresholds.noise_gate_threshold);
        if repeated {
            self.thresholds.noise_gate_penalty
        } else {
            0.0
        }
    }

    /// VERIFIED sources with trust at or above `min_trust_score`, highest first
    pub fn filter_and_sort_sources(&self, sources: &[Source], min_trust_score: f64) -> Vec<Source> {
        let mut kept: Vec<Source> = sources
            .iter()
            .filter(|s| s.trust_score >= min_trust_score && s.misinfo_type == MisinfoType::Verified)
            .cloned()
            .collect();
        sort_by_trust_desc(&mut kept);
        kept
    }

    /// Re-check the `top_n` most trusted sources. Weak ones are reported,
    /// not replaced.
    pub fn perform_source_backtracking(&self, sources: &[Source], top_n: usize) -> Vec<Source> {
        let mut ranked = sources.to_vec();
        sort_by_trust_desc(&mut ranked);
        ranked.truncate(top_n);

        for source in &ranked {
            if source.trust_score < self.thresholds.verified_min
                || source.misinfo_type != MisinfoType::Verified
            {
                warn!(
                    title = %source.title,
                    trust_score = source.trust_score,
                    "Source needs replacement"
                );
            }
        }
        ranked
    }
}

impl Default for SourceValidator {
    fn default() -> Self {
        Self::new(SavlThresholds::default())
    }
}

impl std::fmt::Debug for SourceValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceValidator")
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}
