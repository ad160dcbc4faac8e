use chrono::NaiveDate;
use consensus_core::numeric::{clamp_percent, round_to};
use consensus_core::{
    EngineConfig, MisinfoType, PublisherTier, PublisherTiers, SavlThresholds, Source, SourceGrade,
    TrustWeights,
};
use serde::{Deserialize, Serialize};

/// Sub-score assumed when a component was not measured
const NEUTRAL_SUBSCORE: f64 = 50.0;

/// Trust below this is treated as likely misinformation
const FALSE_LIKELY_BELOW: f64 = 50.0;

/// Days since publication → freshness score
pub fn recency_score(publish_date: NaiveDate, as_of: NaiveDate) -> f64 {
    let days = (as_of - publish_date).num_days();
    match days {
        d if d <= 7 => 100.0,
        d if d <= 30 => 90.0,
        d if d <= 90 => 75.0,
        d if d <= 180 => 60.0,
        d if d <= 365 => 40.0,
        _ => 20.0,
    }
}

pub fn corroboration_score(cross_validation_count: u32) -> f64 {
    match cross_validation_count {
        n if n >= 5 => 100.0,
        n if n >= 3 => 85.0,
        2 => 70.0,
        1 => 50.0,
        _ => 30.0,
    }
}

pub fn author_credibility_score(publisher: &str, tiers: &PublisherTiers) -> f64 {
    match tiers.tier(publisher) {
        PublisherTier::Tier1 => 95.0,
        PublisherTier::Tier2 => 80.0,
        PublisherTier::Tier3 => 65.0,
        PublisherTier::Unlisted => 50.0,
    }
}

pub fn transparency_score(has_data_source: bool, has_citation: bool) -> f64 {
    let mut score = 50.0;
    if has_data_source {
        score += 25.0;
    }
    if has_citation {
        score += 25.0;
    }
    score
}

/// Hours taken to publish a correction; `None` when no correction record exists.
pub fn correction_speed_score(correction_hours: Option<f64>) -> f64 {
    match correction_hours {
        None => NEUTRAL_SUBSCORE,
        Some(h) if h <= 24.0 => 85.0,
        Some(h) if h <= 72.0 => 35.0,
        Some(_) => 15.0,
    }
}

pub fn conflict_of_interest_score(has_conflict: bool) -> f64 {
    if has_conflict {
        -30.0
    } else {
        0.0
    }
}

/// Components of the trust blend. Unset components count as neutral (50),
/// except conflict of interest which counts as none (0).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustSubscores {
    pub base_score: Option<f64>,
    pub recency: Option<f64>,
    pub corroboration: Option<f64>,
    pub author_credibility: Option<f64>,
    pub transparency: Option<f64>,
    pub correction_speed: Option<f64>,
    pub conflict_of_interest: Option<f64>,
}

/// Raw metadata handed to [`TrustScorer::create_source`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInput {
    pub url: String,
    pub title: String,
    pub publisher: String,
    pub publish_date: NaiveDate,
    #[serde(default)]
    pub cross_validation_count: u32,
    #[serde(default = "default_true")]
    pub has_data_source: bool,
    #[serde(default = "default_true")]
    pub has_citation: bool,
    #[serde(default)]
    pub correction_hours: Option<f64>,
    #[serde(default)]
    pub has_conflict: bool,
}

fn default_true() -> bool {
    true
}

impl SourceInput {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
        publish_date: NaiveDate,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            publisher: publisher.into(),
            publish_date,
            cross_validation_count: 0,
            has_data_source: true,
            has_citation: true,
            correction_hours: None,
            has_conflict: false,
        }
    }

    pub fn with_cross_validations(mut self, count: u32) -> Self {
        self.cross_validation_count = count;
        self
    }

    pub fn with_conflict(mut self, has_conflict: bool) -> Self {
        self.has_conflict = has_conflict;
        self
    }

    pub fn with_correction_hours(mut self, hours: f64) -> Self {
        self.correction_hours = Some(hours);
        self
    }
}

/// Scores, grades and classifies sources against the configured tables.
#[derive(Debug, Clone)]
pub struct TrustScorer {
    weights: TrustWeights,
    tiers: PublisherTiers,
    thresholds: SavlThresholds,
}

impl TrustScorer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.trust_weights.clone(),
            tiers: config.publisher_tiers.clone(),
            thresholds: config.savl.clone(),
        }
    }

    /// Weighted blend of the sub-scores, clamped to [0, 100]
    pub fn calculate_trust_score(&self, scores: &TrustSubscores) -> f64 {
        let w = &self.weights;
        let neutral = |v: Option<f64>| v.unwrap_or(NEUTRAL_SUBSCORE);

        let raw = w.base_score * neutral(scores.base_score)
            + w.recency * neutral(scores.recency)
            + w.corroboration * neutral(scores.corroboration)
            + w.author_credibility * neutral(scores.author_credibility)
            + w.transparency * neutral(scores.transparency)
            + w.correction_speed * neutral(scores.correction_speed)
            + w.conflict_of_interest * scores.conflict_of_interest.unwrap_or(0.0);

        clamp_percent(raw)
    }

    pub fn determine_source_grade(&self, publisher: &str, trust_score: f64) -> SourceGrade {
        match self.tiers.tier(publisher) {
            PublisherTier::Tier1 => {
                if trust_score >= 90.0 {
                    SourceGrade::APlus
                } else {
                    SourceGrade::A
                }
            }
            PublisherTier::Tier2 => match trust_score {
                t if t >= 85.0 => SourceGrade::A,
                t if t >= 75.0 => SourceGrade::B,
                _ => SourceGrade::C,
            },
            PublisherTier::Tier3 | PublisherTier::Unlisted => match trust_score {
                t if t >= 90.0 => SourceGrade::APlus,
                t if t >= 80.0 => SourceGrade::A,
                t if t >= 70.0 => SourceGrade::B,
                _ => SourceGrade::C,
            },
        }
    }

    pub fn determine_misinfo_type(&self, trust_score: f64, cross_validation_count: u32) -> MisinfoType {
        if trust_score >= self.thresholds.verified_min
            && cross_validation_count >= self.thresholds.cross_validation_min
        {
            MisinfoType::Verified
        } else if trust_score < FALSE_LIKELY_BELOW {
            MisinfoType::FalseLikely
        } else {
            MisinfoType::Disputed
        }
    }

    /// Build a fully scored [`Source`]. Recency is measured against `as_of`.
    ///
    /// Grade and misinformation class are decided on the unrounded trust
    /// score; the stored score is rounded to a whole number.
    pub fn create_source(&self, input: SourceInput, as_of: NaiveDate) -> Source {
        let author_credibility = author_credibility_score(&input.publisher, &self.tiers);
        let recency = recency_score(input.publish_date, as_of);
        let corroboration = corroboration_score(input.cross_validation_count);
        let transparency = transparency_score(input.has_data_source, input.has_citation);
        let correction_speed = correction_speed_score(input.correction_hours);
        let conflict_of_interest = conflict_of_interest_score(input.has_conflict);

        let trust_score = self.calculate_trust_score(&TrustSubscores {
            base_score: Some(author_credibility),
            recency: Some(recency),
            corroboration: Some(corroboration),
            author_credibility: Some(author_credibility),
            transparency: Some(transparency),
            correction_speed: Some(correction_speed),
            conflict_of_interest: Some(conflict_of_interest),
        });

        let grade = self.determine_source_grade(&input.publisher, trust_score);
        let misinfo_type = self.determine_misinfo_type(trust_score, input.cross_validation_count);
        let rounded = round_to(trust_score, 0);

        Source {
            reasoning: format!(
                "TrustScore {}, {} cross-validations, {}",
                rounded, input.cross_validation_count, misinfo_type
            ),
            url: input.url,
            title: input.title,
            publisher: input.publisher,
            publish_date: input.publish_date,
            grade,
            trust_score: rounded,
            base_score: author_credibility,
            recency,
            corroboration,
            author_credibility,
            transparency,
            correction_speed,
            conflict_of_interest,
            cross_validation_count: input.cross_validation_count,
            misinfo_type,
            adopted_in_analysis: misinfo_type == MisinfoType::Verified,
        }
    }
}

impl Default for TrustScorer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
