use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summary provider request failed: {reason}")]
    Provider { reason: String },

    #[error("summary provider returned no text")]
    EmptyResponse,

    #[error("summary input is empty")]
    EmptyInput,
}

impl From<genai::Error> for SummaryError {
    fn from(err: genai::Error) -> Self {
        SummaryError::Provider {
            reason: err.to_string(),
        }
    }
}

pub type SummaryResult<T> = Result<T, SummaryError>;
