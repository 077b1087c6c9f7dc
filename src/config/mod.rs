//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `MATCH_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_TOKENS, DEFAULT_TRUNCATION_PENALTY,
    DEFAULT_UNREADABLE_PENALTY,
};

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default OpenAI-compatible embeddings endpoint.
pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1/embeddings";

/// Default chat model used for justifications.
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-3.5-turbo";

/// Default sampling temperature for justifications.
pub const DEFAULT_SUMMARY_TEMPERATURE: f64 = 0.3;

/// Default completion budget for one justification.
pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 120;

/// Ranking configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `MATCH_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whitespace-token limit before candidate text is truncated. Default: `3500`.
    pub max_tokens: usize,

    /// Penalty factor for truncated candidates. Default: `0.8`.
    pub truncation_penalty: f64,

    /// Penalty factor for unreadable candidates. Default: `0.0`.
    pub unreadable_penalty: f64,

    /// Candidates ranked per session; extras are dropped. Default: `30`.
    pub max_candidates: usize,

    /// Candidates embedded/summarized concurrently. Default: `8`.
    pub concurrency: usize,

    /// Embedding model name. Default: `text-embedding-3-small`.
    pub embedding_model: String,

    /// Embeddings endpoint URL.
    pub embedding_url: String,

    /// Chat model used for justifications. Default: `gpt-3.5-turbo`.
    pub summary_model: String,

    /// Sampling temperature for justifications. Default: `0.3`.
    pub summary_temperature: f64,

    /// Max completion tokens per justification. Default: `120`.
    pub summary_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            truncation_penalty: DEFAULT_TRUNCATION_PENALTY,
            unreadable_penalty: DEFAULT_UNREADABLE_PENALTY,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            concurrency: DEFAULT_CONCURRENCY,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            summary_temperature: DEFAULT_SUMMARY_TEMPERATURE,
            summary_max_tokens: DEFAULT_SUMMARY_MAX_TOKENS,
        }
    }
}

impl Config {
    const ENV_MAX_TOKENS: &'static str = "MATCH_MAX_TOKENS";
    const ENV_TRUNCATION_PENALTY: &'static str = "MATCH_TRUNCATION_PENALTY";
    const ENV_UNREADABLE_PENALTY: &'static str = "MATCH_UNREADABLE_PENALTY";
    const ENV_MAX_CANDIDATES: &'static str = "MATCH_MAX_CANDIDATES";
    const ENV_CONCURRENCY: &'static str = "MATCH_CONCURRENCY";
    const ENV_EMBEDDING_MODEL: &'static str = "MATCH_EMBEDDING_MODEL";
    const ENV_EMBEDDING_URL: &'static str = "MATCH_EMBEDDING_URL";
    const ENV_SUMMARY_MODEL: &'static str = "MATCH_SUMMARY_MODEL";
    const ENV_SUMMARY_TEMPERATURE: &'static str = "MATCH_SUMMARY_TEMPERATURE";
    const ENV_SUMMARY_MAX_TOKENS: &'static str = "MATCH_SUMMARY_MAX_TOKENS";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Malformed numbers are errors rather than silent fallbacks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_tokens = Self::parse_int_from_env(Self::ENV_MAX_TOKENS, defaults.max_tokens)?;
        let truncation_penalty =
            Self::parse_f64_from_env(Self::ENV_TRUNCATION_PENALTY, defaults.truncation_penalty)?;
        let unreadable_penalty =
            Self::parse_f64_from_env(Self::ENV_UNREADABLE_PENALTY, defaults.unreadable_penalty)?;
        let max_candidates =
            Self::parse_int_from_env(Self::ENV_MAX_CANDIDATES, defaults.max_candidates)?;
        let concurrency = Self::parse_int_from_env(Self::ENV_CONCURRENCY, defaults.concurrency)?;
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, defaults.embedding_url);
        let summary_model =
            Self::parse_string_from_env(Self::ENV_SUMMARY_MODEL, defaults.summary_model);
        let summary_temperature =
            Self::parse_f64_from_env(Self::ENV_SUMMARY_TEMPERATURE, defaults.summary_temperature)?;
        let summary_max_tokens =
            Self::parse_int_from_env(Self::ENV_SUMMARY_MAX_TOKENS, defaults.summary_max_tokens)?;

        Ok(Self {
            max_tokens,
            truncation_penalty,
            unreadable_penalty,
            max_candidates,
            concurrency,
            embedding_model,
            embedding_url,
            summary_model,
            summary_temperature,
            summary_max_tokens,
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            (Self::ENV_TRUNCATION_PENALTY, self.truncation_penalty),
            (Self::ENV_UNREADABLE_PENALTY, self.unreadable_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::PenaltyOutOfRange { name, value });
            }
        }

        for (name, value) in [
            (Self::ENV_MAX_TOKENS, self.max_tokens),
            (Self::ENV_MAX_CANDIDATES, self.max_candidates),
            (Self::ENV_CONCURRENCY, self.concurrency),
            (Self::ENV_SUMMARY_MAX_TOKENS, self.summary_max_tokens as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroValue { name });
            }
        }

        if !(0.0..=2.0).contains(&self.summary_temperature) {
            return Err(ConfigError::InvalidTemperature {
                value: self.summary_temperature,
            });
        }

        for (name, value) in [
            (Self::ENV_EMBEDDING_MODEL, &self.embedding_model),
            (Self::ENV_EMBEDDING_URL, &self.embedding_url),
            (Self::ENV_SUMMARY_MODEL, &self.summary_model),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue { name });
            }
        }

        Ok(())
    }

    fn parse_int_from_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        match env::var(name) {
            Ok(value) => {
                let parsed = value.trim().parse();
                parsed.map_err(|e| ConfigError::IntParseError {
                    name,
                    value,
                    source: e,
                })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_f64_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => {
                let parsed = value.trim().parse();
                parsed.map_err(|e| ConfigError::FloatParseError {
                    name,
                    value,
                    source: e,
                })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(name: &str, default: String) -> String {
        env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
