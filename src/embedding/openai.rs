use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::{Config, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL};

use super::Embedder;
use super::error::{EmbeddingError, EmbeddingResult};

/// Environment variable holding the bearer token.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// [`Embedder`] backed by an OpenAI-compatible embeddings endpoint.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("model", &self.model)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl OpenAiEmbedder {
    /// Creates an embedder with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> EmbeddingResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EmbeddingError::MissingApiKey { var: API_KEY_ENV });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            url: DEFAULT_EMBEDDING_URL.to_string(),
        })
    }

    /// Creates an embedder from `OPENAI_API_KEY` and the model/endpoint in `config`.
    pub fn from_env(config: &Config) -> EmbeddingResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| EmbeddingError::MissingApiKey { var: API_KEY_ENV })?;
        Ok(Self::new(api_key)?
            .with_model(config.embedding_model.clone())
            .with_url(config.embedding_url.clone()))
    }

    /// Sets the model name (e.g. `text-embedding-3-large`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Collapses newlines, which degrade embedding quality for some models.
pub(crate) fn prepare_input(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let input = prepare_input(text);
        if input.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        debug!(model = %self.model, text_len = input.len(), "Requesting embedding");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: &input,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(%status, "Embedding API error");
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(EmbeddingError::EmptyResponse)?;

        if embedding.is_empty() {
            return Err(EmbeddingError::EmptyResponse);
        }

        Ok(embedding)
    }
}
