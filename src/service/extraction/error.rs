//! Error type for semantic extraction

/// Errors surfaced by the semantic extraction layer. Callers are expected to
/// degrade to neutral defaults rather than abort the evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction request timed out after {0} seconds")]
    Timeout(u64),

    #[error("semantic extraction failed: {0}")]
    Unavailable(String),
}
