//! Cross-cutting, shared constants.
//!
//! Configurable values ([`crate::config::Config`]) default to the constants below. The text
//! constants are user-visible and show up verbatim in ranking output.

/// Largest whitespace-token count sent to the summarizer before truncation kicks in.
pub const DEFAULT_MAX_TOKENS: usize = 3500;

/// Penalty applied to a candidate whose text had to be truncated.
pub const DEFAULT_TRUNCATION_PENALTY: f64 = 0.8;

/// Penalty applied to a candidate whose text could not be read at all.
pub const DEFAULT_UNREADABLE_PENALTY: f64 = 0.0;

/// Penalty applied when nothing is wrong with the input.
pub const NO_PENALTY: f64 = 1.0;

/// Maximum number of candidates ranked in one session.
pub const DEFAULT_MAX_CANDIDATES: usize = 30;

/// Default number of candidates processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Display name used when a document yields no usable name.
pub const DEFAULT_DISPLAY_NAME: &str = "Unknown";

/// Fixed justification for candidates whose document could not be read.
pub const UNREADABLE_JUSTIFICATION: &str =
    "Unable to read resume. This candidate could not be evaluated.";

/// Prefix added to justifications computed from truncated text.
pub const TRUNCATION_NOTICE: &str =
    "Resume exceeded input limit. Analysis performed on truncated content.\n\n";

/// Prefix for justifications replaced by a summarizer failure.
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary";

/// Error returned when two vectors that must agree on dimensionality do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Vector has no components.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a candidate embedding dimension matches the reference dimension.
///
/// # Example
///
/// ```
/// use candidate_match::constants::validate_embedding_dim;
///
/// validate_embedding_dim(1536, 1536).unwrap();
/// assert!(validate_embedding_dim(768, 1536).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
