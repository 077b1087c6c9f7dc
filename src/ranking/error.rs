use serde::Serialize;
use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Run-fatal errors. Only the reference side of a ranking can fail the whole run.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("description is empty")]
    EmptyDescription,

    #[error("reference embedding failed: {0}")]
    ReferenceEmbedding(#[source] EmbeddingError),

    #[error("reference vector is empty")]
    EmptyReference,

    #[error("reference vector is unusable: {reason}")]
    InvalidReference { reason: String },
}

pub type RankingResult<T> = Result<T, RankingError>;

/// Per-candidate degradation. Recorded on the candidate; never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateFailure {
    /// No text could be read from the source document.
    #[error("document could not be read")]
    UnreadableInput,

    /// Text was present but no embedding was produced.
    #[error("embedding failed: {reason}")]
    EmbeddingFailure { reason: String },

    /// The summarizer failed; the justification describes the error instead.
    #[error("summarization failed: {reason}")]
    SummarizationFailure { reason: String },

    /// The candidate's embedding cannot be compared with the reference.
    #[error("invalid vector: {reason}")]
    InvalidVector { reason: String },
}
