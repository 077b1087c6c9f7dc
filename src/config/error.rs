//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An integer setting could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    IntParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A floating-point setting could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A penalty factor is outside `[0, 1]`.
    #[error("invalid {name} {value}: must be between 0.0 and 1.0")]
    PenaltyOutOfRange { name: &'static str, value: f64 },

    /// A setting that must be positive was zero.
    #[error("invalid {name}: must be greater than zero")]
    ZeroValue { name: &'static str },

    /// Sampling temperature outside what chat providers accept.
    #[error("invalid summary temperature {value}: must be between 0.0 and 2.0")]
    InvalidTemperature { value: f64 },

    /// A string setting was present but blank.
    #[error("{name} cannot be empty")]
    EmptyValue { name: &'static str },
}
