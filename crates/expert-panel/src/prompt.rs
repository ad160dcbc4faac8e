use consensus_core::numeric::{clamp_or_min, round_to};
use consensus_core::{ExpertAnalysis, ExpertType, ReportError, Subject};
use regex::Regex;
use std::sync::LazyLock;

use crate::roster::profile;

/// Score used when a response does not state one
const DEFAULT_PARSED_SCORE: f64 = 7.0;
const MAX_KEY_POINTS: usize = 5;
const MAX_REASONING_CHARS: usize = 500;

type CompiledRegex = LazyLock<Result<Regex, regex::Error>>;

static SCORE_RE: CompiledRegex = LazyLock::new(|| Regex::new(r"(?i)score\s*:\s*(\d+(?:\.\d+)?)"));
static HEADING_RE: CompiledRegex = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+\.\s*)?(key\s*points?|score|reasoning|concerns?)\b")
});
static BULLET_RE: CompiledRegex = LazyLock::new(|| Regex::new(r"^(?:[-•*]|\d+\.)\s*"));

fn compiled(re: &'static CompiledRegex) -> Result<&'static Regex, ReportError> {
    re.as_ref().map_err(|e| ReportError::Scoring(e.to_string()))
}

/// Analysis request for one archetype, in the format
/// [`parse_expert_response`] reads back.
pub fn create_expert_prompt(expert: ExpertType, subject: Subject<'_>, context: &str) -> String {
    let profile = profile(expert);
    let subject_info = match subject {
        Subject::Asset(asset) => format!(
            "Asset: {} ({})\nIndustry: {}\nKey growth points: {}\nExpected CAGR: {}%",
            asset.name,
            asset.ticker,
            asset.industry,
            asset.key_growth_points.join(", "),
            asset.expected_cagr
        ),
        Subject::Category(category) => format!(
            "Asset category: {}\nGrowth: {}/10\nInnovation: {}/10",
            category.name, category.growth_score, category.innovation_score
        ),
    };

    format!(
        "You are an expert in {role}.\n\
         Evaluation criteria: {criteria}\n\
         \n\
         Analyze the following investment target:\n\
         {subject_info}\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Answer in this format:\n\
         1. Key Points (3-5 bullet points)\n\
         2. Score (1-10)\n\
         3. Reasoning (2-3 sentences)\n\
         4. Concerns (1-2, if any)\n\
         \n\
         Goal: long-term value investing (5+ years), CAGR of 30% or more, low risk",
        role = profile.role,
        criteria = profile.criteria.join(", "),
    )
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Preamble,
    KeyPoints,
    Concerns,
    Other,
}

/// Read a free-text answer back into an [`ExpertAnalysis`].
///
/// Bullets (`-`, `•`, `1.`) are collected under the "Key Points" and
/// "Concerns" headings. A missing score reads as 7; any score is clamped
/// to 1-10.
pub fn parse_expert_response(expert: ExpertType, response: &str) -> Result<ExpertAnalysis, ReportError> {
    let score_re = compiled(&SCORE_RE)?;
    let heading_re = compiled(&HEADING_RE)?;
    let bullet_re = compiled(&BULLET_RE)?;

    let score = score_re
        .captures(response)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(DEFAULT_PARSED_SCORE);

    let mut section = Section::Preamble;
    let mut key_points = Vec::new();
    let mut concerns = Vec::new();

    for line in response.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(caps) = heading_re.captures(line) {
            let heading = caps[1].to_lowercase();
            section = if heading.starts_with("key") {
                Section::KeyPoints
            } else if heading.starts_with("concern") {
                Section::Concerns
            } else {
                Section::Other
            };
            continue;
        }

        let Some(bullet) = bullet_re.find(line) else {
            continue;
        };
        let text = line[bullet.end()..].trim().to_string();
        if text.is_empty() {
            continue;
        }
        match section {
            Section::KeyPoints => key_points.push(text),
            Section::Concerns => concerns.push(text),
            Section::Preamble | Section::Other => {}
        }
    }

    key_points.truncate(MAX_KEY_POINTS);

    Ok(ExpertAnalysis {
        expert_type: expert,
        perspective: profile(expert).role.to_string(),
        key_points,
        score: round_to(clamp_or_min(score, 1.0, 10.0), 1),
        reasoning: response.chars().take(MAX_REASONING_CHARS).collect(),
        concerns: (!concerns.is_empty()).then_some(concerns),
    })
}
