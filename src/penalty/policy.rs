use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::constants::{
    DEFAULT_MAX_TOKENS, DEFAULT_TRUNCATION_PENALTY, DEFAULT_UNREADABLE_PENALTY, NO_PENALTY,
};
use crate::ranking::CandidateRecord;

/// Why a penalty was (or was not) applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PenaltyNote {
    /// Input was used as-is.
    None,
    /// Input exceeded the token limit and was cut down.
    Truncated,
    /// No text could be read from the source document.
    Unreadable,
}

impl PenaltyNote {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PenaltyNote::None => "none",
            PenaltyNote::Truncated => "truncated",
            PenaltyNote::Unreadable => "unreadable",
        }
    }
}

impl std::fmt::Display for PenaltyNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the penalty-and-truncation step.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyOutcome {
    /// Multiplier in `[0, 1]` applied to the raw similarity.
    pub factor: f64,
    /// Text to summarize (and fingerprint). `None` when the input was unreadable.
    pub text: Option<String>,
    pub note: PenaltyNote,
}

impl PenaltyOutcome {
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.note == PenaltyNote::Truncated
    }

    #[inline]
    pub fn is_unreadable(&self) -> bool {
        self.note == PenaltyNote::Unreadable
    }
}

/// Maps input-quality conditions to a penalty factor.
///
/// Token counting is a coarse whitespace split, not a model tokenizer. Only the threshold
/// semantics matter: a text of exactly `max_tokens` tokens is untouched, one more token
/// triggers truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyPolicy {
    max_tokens: usize,
    truncation_penalty: f64,
    unreadable_penalty: f64,
}

impl Default for PenaltyPolicy {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            truncation_penalty: DEFAULT_TRUNCATION_PENALTY,
            unreadable_penalty: DEFAULT_UNREADABLE_PENALTY,
        }
    }
}

impl PenaltyPolicy {
    pub fn new(max_tokens: usize, truncation_penalty: f64, unreadable_penalty: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&truncation_penalty),
            "truncation_penalty must be between 0.0 and 1.0"
        );
        assert!(
            (0.0..=1.0).contains(&unreadable_penalty),
            "unreadable_penalty must be between 0.0 and 1.0"
        );
        Self {
            max_tokens,
            truncation_penalty,
            unreadable_penalty,
        }
    }

    /// Builds a policy from a validated [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_tokens,
            config.truncation_penalty,
            config.unreadable_penalty,
        )
    }

    /// Sets the token limit.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn truncation_penalty(&self) -> f64 {
        self.truncation_penalty
    }

    pub fn unreadable_penalty(&self) -> f64 {
        self.unreadable_penalty
    }

    /// Counts tokens in the candidate's text and computes its penalty.
    pub fn assess(&self, candidate: &CandidateRecord) -> PenaltyOutcome {
        let token_count = candidate.raw_text.as_deref().map_or(0, count_tokens);
        self.compute_penalty(candidate, token_count)
    }

    /// Computes the penalty for a candidate given a precomputed token count.
    pub fn compute_penalty(&self, candidate: &CandidateRecord, token_count: usize) -> PenaltyOutcome {
        let Some(text) = candidate.raw_text.as_deref() else {
            return PenaltyOutcome {
                factor: self.unreadable_penalty,
                text: None,
                note: PenaltyNote::Unreadable,
            };
        };

        if token_count > self.max_tokens {
            debug!(
                identifier = %candidate.identifier,
                token_count,
                max_tokens = self.max_tokens,
                "Truncating candidate text"
            );
            return PenaltyOutcome {
                factor: self.truncation_penalty,
                text: Some(truncate_tokens(text, self.max_tokens)),
                note: PenaltyNote::Truncated,
            };
        }

        PenaltyOutcome {
            factor: NO_PENALTY,
            text: Some(text.to_string()),
            note: PenaltyNote::None,
        }
    }
}

/// Whitespace-delimited token count.
#[inline]
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keeps the first `max_tokens` whitespace tokens, re-joined with single spaces.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    let mut out = String::with_capacity(text.len().min(max_tokens.saturating_mul(8)));
    for (i, token) in text.split_whitespace().take(max_tokens).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
