//! Justification generation.
//!
//! A [`Summarizer`] explains in a few sentences why a candidate fits a description. The ranker
//! only calls it on a justification cache miss.

/// genai-backed chat summarizer.
pub mod chat;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod prompt;

use async_trait::async_trait;

pub use chat::GenaiSummarizer;
pub use error::{SummaryError, SummaryResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSummarizer;
pub use prompt::build_prompt;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces justification text for `text` against `description`.
    async fn summarize(&self, description: &str, text: &str) -> SummaryResult<String>;
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for std::sync::Arc<T> {
    async fn summarize(&self, description: &str, text: &str) -> SummaryResult<String> {
        (**self).summarize(description, text).await
    }
}
