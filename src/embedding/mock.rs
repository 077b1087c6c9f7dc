use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::Embedder;
use super::error::{EmbeddingError, EmbeddingResult};

/// In-memory [`Embedder`] returning canned vectors.
///
/// Texts without a registered vector get the fallback vector, or fail if none is set.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
    fallback: Option<Vec<f32>>,
    calls: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the vector returned for `text`.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Makes `embed(text)` fail.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Vector returned for texts with no registered vector.
    pub fn with_fallback(mut self, vector: Vec<f32>) -> Self {
        self.fallback = Some(vector);
        self
    }

    /// Number of `embed` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Texts passed to `embed`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        self.calls.lock().push(text.to_string());

        if self.failing.contains(text) {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock failure".to_string(),
            });
        }

        self.vectors
            .get(text)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or(EmbeddingError::EmptyResponse)
    }
}
