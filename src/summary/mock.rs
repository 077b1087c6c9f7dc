use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::Summarizer;
use super::error::{SummaryError, SummaryResult};

/// In-memory [`Summarizer`] that echoes a deterministic justification.
///
/// Output is `"Fit: <first token of text>"`; texts registered with
/// [`failing_on`](Self::failing_on) fail instead.
#[derive(Debug, Default)]
pub struct MockSummarizer {
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `summarize(_, text)` fail.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Sleeps before answering, to widen concurrency windows in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `summarize` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _description: &str, text: &str) -> SummaryResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(text) {
            return Err(SummaryError::Provider {
                reason: "mock failure".to_string(),
            });
        }

        let first = text.split_whitespace().next().unwrap_or_default();
        Ok(format!("Fit: {first}"))
    }
}
