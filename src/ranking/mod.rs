//! Ranking orchestration.
//!
//! [`Ranker`] ties the pieces together for one run:
//!
//! 1. embed the description (run-fatal on failure) and each readable candidate
//! 2. score each candidate against the reference ([`crate::scoring`])
//! 3. apply the input-quality penalty and truncate ([`crate::penalty`])
//! 4. fetch or generate a justification ([`crate::cache`], [`crate::summary`])
//! 5. sort by adjusted score, descending and stable
//!
//! Per-candidate failures never abort a run. They are recorded as [`CandidateFailure`]s on the
//! affected [`ScoredCandidate`].

mod error;
mod ranker;
mod types;

#[cfg(test)]
mod tests;

pub use error::{CandidateFailure, RankingError, RankingResult};
pub use ranker::{Ranker, RankingOptions};
pub use types::{CandidateRecord, ScoredCandidate};
