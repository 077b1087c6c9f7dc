//! Similarity scoring between a reference embedding and candidate embeddings.
//!
//! Scores are cosine similarities expressed as a percentage in `[0, 100]` with two-decimal
//! precision. A candidate without an embedding scores `0.0`; a candidate whose embedding
//! disagrees with the reference on dimensionality is an error, never a silently wrong number.

pub mod error;
pub mod scorer;


pub use error::{ScoringError, ScoringResult};
pub use scorer::{cosine_similarity, round2, similarity_score};
