use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{Currency, CurrencyPair, SourceId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure to pull a number out of a fetched document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no extraction strategy matched (tried: {})", attempted.join(", "))]
    NoMatch { attempted: Vec<String> },
}

/// Failure of a single (pair, source) fetch.
///
/// These never abort a run; they end up inside a failed reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{provider} does not serve {pair}")]
    UnsupportedPair {
        provider: SourceId,
        pair: CurrencyPair,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{code} is missing from the feed")]
    DataUnavailable { code: Currency },

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Every requested fetch in a run failed.
    #[error("all {attempted} rate fetches failed")]
    AggregationFailed { attempted: usize },

    /// The run was interrupted before it finished.
    #[error("cancelled")]
    Cancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
