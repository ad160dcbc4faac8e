//! Source credibility scoring and screening.
//!
//! [`TrustScorer`] turns raw source metadata into a graded [`Source`];
//! [`SourceValidator`] splits a source set into the watchlist and verified
//! tiers (SAVL) and derives the opportunity score and noise-gate penalty.
//!
//! [`Source`]: consensus_core::Source

pub mod fingerprint;
pub mod savl;
pub mod trust;

pub use fingerprint::{normalize_content, ContentFingerprint, ContentHash, TitleFingerprint};
pub use savl::{calculate_opportunity_score, SavlValidation, SourceValidator};
pub use trust::{
    author_credibility_score, conflict_of_interest_score, corroboration_score,
    correction_speed_score, recency_score, transparency_score, SourceInput, TrustScorer,
    TrustSubscores,
};
