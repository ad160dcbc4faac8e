use crate::{ExpertAnalysis, ExpertType, ReportError, Subject};

/// Capability that produces one expert's analysis of a subject.
///
/// The panel aggregation never scores on its own: fixture generators, seeded
/// demo jitter and any future model-backed scorer all plug in here.
pub trait ExpertScorer: Send + Sync {
    fn analyze(
        &self,
        expert: ExpertType,
        subject: Subject<'_>,
        context: &str,
    ) -> Result<ExpertAnalysis, ReportError>;
}
