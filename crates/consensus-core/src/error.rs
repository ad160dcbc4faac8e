use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid user context: {0}")]
    InvalidContext(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Empty universe: {0}")]
    EmptyUniverse(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}
