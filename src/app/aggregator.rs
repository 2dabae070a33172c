//! Concurrent fan-out over every rate source for one comparison run.
//!
//! Each source gets its own future that fetches all the pairs it supports.
//! The futures run concurrently via `join_all`, so a slow or failing source
//! never holds up or aborts another. Dropping the run future cancels every
//! in-flight fetch.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{error, info, warn};

use crate::domain::{CurrencyPair, RateReading, RateSnapshot};
use crate::error::{Error, FetchError, Result};
use crate::port::outbound::source::RateSource;

/// Runs every configured source for a set of pairs.
pub struct Aggregator {
    sources: Vec<Arc<dyn RateSource>>,
    timeout: Duration,
}

impl Aggregator {
    /// `timeout` bounds each individual fetch.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn RateSource>>, timeout: Duration) -> Self {
        Self { sources, timeout }
    }

    pub fn sources(&self) -> &[Arc<dyn RateSource>] {
        &self.sources
    }

    /// Fetch every (pair, source) slot the sources support.
    ///
    /// Individual failures become failed readings. The run fails with
    /// [`Error::AggregationFailed`] only when no slot produced a value.
    pub async fn run(&self, pairs: &[CurrencyPair]) -> Result<RateSnapshot> {
        let pairs: Vec<CurrencyPair> = pairs
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let futures: Vec<_> = self
            .sources
            .iter()
            .filter_map(|source| {
                let wanted: Vec<CurrencyPair> =
                    pairs.iter().filter(|p| source.supports(p)).cloned().collect();
                if wanted.is_empty() {
                    return None;
                }
                let timeout = self.timeout;
                Some(async move {
                    let results = source.fetch_batch(&wanted, timeout).await;
                    (Arc::clone(source), wanted, results)
                })
            })
            .collect();

        let attempted: usize = futures.len();
        let batches = join_all(futures).await;

        let mut readings = Vec::new();
        for (source, wanted, results) in batches {
            for pair in wanted {
                let result = results
                    .iter()
                    .find(|(p, _)| *p == pair)
                    .map(|(_, result)| result.clone())
                    .unwrap_or_else(|| {
                        Err(FetchError::TaskFailed(format!(
                            "{} returned no result for {pair}",
                            source.id()
                        )))
                    });

                let reading = match result {
                    Ok(reading) => reading,
                    Err(e) => {
                        warn!(source = %source.id(), pair = %pair, error = %e, "Fetch failed");
                        RateReading::failed(pair, source.id(), e, Utc::now())
                    }
                };
                readings.push(reading);
            }
        }

        let snapshot = RateSnapshot::from_readings(readings);
        let (ok, failed) = (snapshot.ok_count(), snapshot.failed_count());

        if ok == 0 {
            error!(sources = attempted, slots = snapshot.len(), "Every fetch failed");
            return Err(Error::AggregationFailed {
                attempted: snapshot.len(),
            });
        }

        info!(sources = attempted, ok, failed, "Aggregation complete");
        Ok(snapshot)
    }
}
