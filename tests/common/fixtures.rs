//! Shared fixtures for integration tests.

#![allow(dead_code)]

use candidate_match::{CandidateRecord, MockEmbedder};

pub const JOB: &str = "Platform engineer: Rust, Kubernetes, observability";

/// A readable candidate whose text is also its embedding key.
pub fn candidate(id: &str, text: &str) -> CandidateRecord {
    CandidateRecord::new(id, Some(text.to_string()))
}

/// Embedder mapping `JOB` to `[1, 0]` and each `(text, vector)` pair as given.
pub fn embedder(pairs: &[(&str, [f32; 2])]) -> MockEmbedder {
    pairs
        .iter()
        .fold(MockEmbedder::new().with_vector(JOB, vec![1.0, 0.0]), |e, (text, v)| {
            e.with_vector(*text, v.to_vec())
        })
}

/// `n` whitespace-separated words.
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}
