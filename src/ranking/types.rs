use serde::Serialize;

use crate::constants::DEFAULT_DISPLAY_NAME;
use crate::penalty::PenaltyNote;

use super::error::CandidateFailure;

/// One document to rank.
///
/// `raw_text == None` means the source could not be read. `vector` is always `None` when
/// `raw_text` is, and may also be `None` when embedding failed.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    /// Unique id, e.g. the file name.
    pub identifier: String,
    pub display_name: String,
    pub raw_text: Option<String>,
    pub vector: Option<Vec<f32>>,
}

impl CandidateRecord {
    /// Creates a record with the default display name and no vector.
    pub fn new(identifier: impl Into<String>, raw_text: Option<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            raw_text,
            vector: None,
        }
    }

    /// Creates a record for a document that could not be read.
    pub fn unreadable(identifier: impl Into<String>) -> Self {
        Self::new(identifier, None)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.raw_text.is_some()
    }
}

/// A ranked candidate. Built once per run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    identifier: String,
    display_name: String,
    raw_similarity: f64,
    justification: String,
    penalty_factor: f64,
    adjusted_score: f64,
    penalty_note: PenaltyNote,
    failures: Vec<CandidateFailure>,
}

impl ScoredCandidate {
    pub(crate) fn new(
        record: &CandidateRecord,
        raw_similarity: f64,
        justification: String,
        penalty_factor: f64,
        penalty_note: PenaltyNote,
        failures: Vec<CandidateFailure>,
    ) -> Self {
        Self {
            identifier: record.identifier.clone(),
            display_name: record.display_name.clone(),
            raw_similarity,
            justification,
            penalty_factor,
            adjusted_score: crate::scoring::round2(raw_similarity * penalty_factor),
            penalty_note,
            failures,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Cosine similarity as a percentage, two decimals.
    pub fn raw_similarity(&self) -> f64 {
        self.raw_similarity
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }

    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    /// `raw_similarity * penalty_factor`, two decimals. Ranking key.
    pub fn adjusted_score(&self) -> f64 {
        self.adjusted_score
    }

    pub fn penalty_note(&self) -> PenaltyNote {
        self.penalty_note
    }

    /// Degradations recorded while scoring this candidate (empty when all went well).
    pub fn failures(&self) -> &[CandidateFailure] {
        &self.failures
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}
