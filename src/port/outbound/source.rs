//! Rate source port.
//!
//! A [`RateSource`] turns a [`CurrencyPair`] into a [`RateReading`]. Each
//! source serves a fixed set of pairs; asking for anything else is a
//! contract violation reported as [`FetchError::UnsupportedPair`].

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::domain::{CurrencyPair, RateReading, SourceId};
use crate::error::FetchError;

/// Outcome of fetching one pair.
pub type PairResult = (CurrencyPair, Result<RateReading, FetchError>);

/// A named provider of rate readings.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn id(&self) -> SourceId;

    /// Whether this source can serve `pair`.
    fn supports(&self, pair: &CurrencyPair) -> bool;

    /// Fetch a single pair. No timeout is applied here; see
    /// [`fetch_with_timeout`].
    async fn fetch(&self, pair: &CurrencyPair) -> Result<RateReading, FetchError>;

    /// Fetch several pairs, each bounded by `timeout`.
    ///
    /// The default fetches pairs concurrently, one request per pair. Sources
    /// that publish many pairs in one document override this to download it
    /// once.
    async fn fetch_batch(&self, pairs: &[CurrencyPair], timeout: Duration) -> Vec<PairResult> {
        let fetches = pairs.iter().map(|pair| async move {
            let result = fetch_with_timeout(self, pair, timeout).await;
            (pair.clone(), result)
        });
        join_all(fetches).await
    }
}

/// Fetch `pair` from `source`, turning an elapsed deadline into
/// [`FetchError::Timeout`] and unsupported pairs into
/// [`FetchError::UnsupportedPair`] without touching the network.
pub async fn fetch_with_timeout<S>(
    source: &S,
    pair: &CurrencyPair,
    timeout: Duration,
) -> Result<RateReading, FetchError>
where
    S: RateSource + ?Sized,
{
    if !source.supports(pair) {
        return Err(FetchError::UnsupportedPair {
            provider: source.id(),
            pair: pair.clone(),
        });
    }

    match tokio::time::timeout(timeout, source.fetch(pair)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout)),
    }
}
