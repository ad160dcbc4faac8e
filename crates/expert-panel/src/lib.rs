//! Eight-archetype expert panel.
//!
//! Each archetype's opinion comes from an injected [`ExpertScorer`]; this
//! crate only aggregates (weighted consensus, bias guard, debate flag,
//! dissent, top reasons). Randomness is confined to [`JitterScorer`].
//!
//! [`ExpertScorer`]: consensus_core::ExpertScorer

pub mod consensus;
pub mod panel;
pub mod prompt;
pub mod roster;
pub mod scoring;

pub use consensus::{
    calculate_consensus_score, check_bias_guard, create_expert_consensus,
    extract_dissenting_opinion, extract_top_reasons, needs_debate,
};
pub use panel::ExpertPanel;
pub use prompt::{create_expert_prompt, parse_expert_response};
pub use roster::{profile, ExpertProfile};
pub use scoring::{FixtureScorer, JitterScorer};
