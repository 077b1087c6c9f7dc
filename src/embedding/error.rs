use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding input is empty")]
    EmptyInput,

    #[error("embedding API key not configured (set {var})")]
    MissingApiKey { var: &'static str },

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("embedding response contained no vectors")]
    EmptyResponse,

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::RequestFailed {
            reason: err.to_string(),
        }
    }
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;
