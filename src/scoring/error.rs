use thiserror::Error;

use crate::constants::DimValidationError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid vector: {0}")]
    InvalidVector(#[from] DimValidationError),

    #[error("invalid vector: component {index} is not finite")]
    NonFiniteComponent { index: usize },
}

pub type ScoringResult<T> = Result<T, ScoringError>;
