//! Text embedding collaborators.
//!
//! - [`Embedder`] is the seam the ranker depends on.
//! - [`openai`] provides an OpenAI-compatible HTTP implementation.
//! - [`MockEmbedder`] provides canned vectors for tests and demos.

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// OpenAI-compatible `/v1/embeddings` client.
pub mod openai;

use async_trait::async_trait;

pub use error::{EmbeddingError, EmbeddingResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use openai::OpenAiEmbedder;

/// Turns text into a fixed-length vector.
///
/// Implementations own their own retry, rate-limit and timeout behavior; callers treat any
/// error as "no embedding for this input".
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;
}

#[async_trait]
impl<T: Embedder + ?Sized> Embedder for std::sync::Arc<T> {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        (**self).embed(text).await
    }
}
