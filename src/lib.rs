//! Candidate-match library crate (used by the CLI binary and integration tests).
//!
//! Ranks a batch of candidate documents against one target description by embedding
//! similarity, discounts candidates whose input was degraded, and attaches a memoized
//! natural-language justification to each.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`Ranker`], [`RankingOptions`] - Orchestrates one ranking run
//! - [`CandidateRecord`], [`ScoredCandidate`] - Input and output records
//! - [`RankingError`] (run-fatal), [`CandidateFailure`] (per-candidate, recorded)
//!
//! ## Building blocks
//! - [`similarity_score`], [`cosine_similarity`] - Vector scoring
//! - [`PenaltyPolicy`], [`PenaltyOutcome`] - Truncation and unreadable penalties
//! - [`JustificationCache`] - Fingerprint-keyed justification memo
//! - [`hash_pair`] - Cache key derivation
//!
//! ## Collaborators
//! - [`Embedder`] with [`OpenAiEmbedder`]
//! - [`Summarizer`] with [`GenaiSummarizer`]
//! - [`documents`] - Resume files to [`CandidateRecord`]s
//! - [`export`] - CSV and JSON output of a ranking
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] and [`MockSummarizer`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod documents;
pub mod embedding;
pub mod export;
pub mod hashing;
pub mod penalty;
pub mod ranking;
pub mod scoring;
pub mod summary;

pub use cache::{CacheStats, JustificationCache};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use documents::{DocumentError, load_directory, load_document};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{Embedder, EmbeddingError, OpenAiEmbedder};
pub use export::{ExportError, write_csv, write_json};
pub use hashing::{Fingerprint, hash_pair};
pub use penalty::{PenaltyNote, PenaltyOutcome, PenaltyPolicy};
pub use ranking::{
    CandidateFailure, CandidateRecord, Ranker, RankingError, RankingOptions, RankingResult,
    ScoredCandidate,
};
pub use scoring::{ScoringError, cosine_similarity, similarity_score};
#[cfg(any(test, feature = "mock"))]
pub use summary::MockSummarizer;
pub use summary::{GenaiSummarizer, Summarizer, SummaryError};
