//! A single rate observation from one source.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::currency::CurrencyPair;
use super::error::DomainError;
use super::source::SourceId;
use crate::error::FetchError;

/// Outcome of one fetch. A failed reading carries no value.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ReadingStatus {
    Ok {
        value: Decimal,
    },
    Failed {
        #[serde(rename = "reason", serialize_with = "serialize_display")]
        error: FetchError,
    },
}

fn serialize_display<S: Serializer>(error: &FetchError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Immutable rate observation for one (pair, source) slot.
///
/// Construct with [`RateReading::ok`] or [`RateReading::failed`].
#[derive(Debug, Clone, Serialize)]
pub struct RateReading {
    pair: CurrencyPair,
    source: SourceId,
    #[serde(flatten)]
    status: ReadingStatus,
    fetched_at: DateTime<Utc>,
}

impl RateReading {
    /// A successful reading. The value must be strictly positive.
    pub fn ok(
        pair: CurrencyPair,
        source: SourceId,
        value: Decimal,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::NonPositiveRate { value });
        }
        Ok(Self {
            pair,
            source,
            status: ReadingStatus::Ok { value },
            fetched_at,
        })
    }

    /// A failed reading carrying the fetch error.
    pub fn failed(
        pair: CurrencyPair,
        source: SourceId,
        error: FetchError,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pair,
            source,
            status: ReadingStatus::Failed { error },
            fetched_at,
        }
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    /// The observed value, or `None` for a failed reading.
    pub fn value(&self) -> Option<Decimal> {
        match self.status {
            ReadingStatus::Ok { value } => Some(value),
            ReadingStatus::Failed { .. } => None,
        }
    }

    /// The fetch error, or `None` for a successful reading.
    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            ReadingStatus::Ok { .. } => None,
            ReadingStatus::Failed { error } => Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, ReadingStatus::Ok { .. })
    }
}
