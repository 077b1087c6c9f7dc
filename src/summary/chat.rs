use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error};

use crate::config::{
    Config, DEFAULT_SUMMARY_MAX_TOKENS, DEFAULT_SUMMARY_MODEL, DEFAULT_SUMMARY_TEMPERATURE,
};

use super::Summarizer;
use super::error::{SummaryError, SummaryResult};
use super::prompt::build_prompt;

/// [`Summarizer`] backed by a [`genai::Client`] chat completion.
///
/// Provider credentials are resolved by genai from the environment (e.g. `OPENAI_API_KEY`).
#[derive(Clone)]
pub struct GenaiSummarizer {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl std::fmt::Debug for GenaiSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiSummarizer")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GenaiSummarizer {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            options: ChatOptions::default()
                .with_temperature(DEFAULT_SUMMARY_TEMPERATURE)
                .with_max_tokens(DEFAULT_SUMMARY_MAX_TOKENS),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.summary_model.clone()).with_sampling(
            config.summary_temperature,
            config.summary_max_tokens,
        )
    }

    /// Sets temperature and completion budget.
    pub fn with_sampling(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.options = ChatOptions::default()
            .with_temperature(temperature)
            .with_max_tokens(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for GenaiSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_MODEL)
    }
}

#[async_trait]
impl Summarizer for GenaiSummarizer {
    async fn summarize(&self, description: &str, text: &str) -> SummaryResult<String> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        debug!(
            model = %self.model,
            description_len = description.len(),
            text_len = text.len(),
            "Requesting justification"
        );

        let request = ChatRequest::new(vec![ChatMessage::user(build_prompt(description, text))]);
        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await
            .map_err(|e| {
                error!("Summary provider error: {}", e);
                SummaryError::from(e)
            })?;

        let summary = response.first_text().unwrap_or_default().trim().to_string();
        if summary.is_empty() {
            return Err(SummaryError::EmptyResponse);
        }

        Ok(summary)
    }
}
