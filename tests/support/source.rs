//! Scripted rate sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use fxcompare::domain::{CurrencyPair, RateReading, SourceId};
use fxcompare::error::FetchError;
use fxcompare::port::outbound::source::RateSource;

#[derive(Debug, Clone)]
pub enum Outcome {
    Value(Decimal),
    Fail(FetchError),
    /// Never answers within any reasonable timeout.
    Hang,
}

/// A source that answers from a script keyed by pair.
pub struct ScriptedSource {
    id: SourceId,
    script: HashMap<CurrencyPair, Outcome>,
}

impl ScriptedSource {
    pub fn new(id: SourceId) -> Self {
        Self {
            id,
            script: HashMap::new(),
        }
    }

    pub fn with(mut self, pair: &str, outcome: Outcome) -> Self {
        self.script.insert(pair.parse().unwrap(), outcome);
        self
    }
}

#[async_trait]
impl RateSource for ScriptedSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn supports(&self, pair: &CurrencyPair) -> bool {
        self.script.contains_key(pair)
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<RateReading, FetchError> {
        match self.script.get(pair).cloned() {
            Some(Outcome::Value(value)) => RateReading::ok(pair.clone(), self.id, value, Utc::now())
                .map_err(|e| FetchError::Malformed(e.to_string())),
            Some(Outcome::Fail(error)) => Err(error),
            Some(Outcome::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(FetchError::Transport("woke up".into()))
            }
            None => Err(FetchError::UnsupportedPair {
                provider: self.id,
                pair: pair.clone(),
            }),
        }
    }
}

/// Sets its flag when dropped.
struct ReleaseOnDrop(Arc<AtomicBool>);

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// A source whose fetch never finishes and records when it starts and when
/// its in-flight state is dropped.
pub struct HangingSource {
    id: SourceId,
    pair: CurrencyPair,
    started: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl HangingSource {
    pub fn new(id: SourceId, pair: &str) -> Self {
        Self {
            id,
            pair: pair.parse().unwrap(),
            started: Arc::new(AtomicBool::new(false)),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn started(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.started)
    }

    pub fn released(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.released)
    }
}

#[async_trait]
impl RateSource for HangingSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn supports(&self, pair: &CurrencyPair) -> bool {
        *pair == self.pair
    }

    async fn fetch(&self, _pair: &CurrencyPair) -> Result<RateReading, FetchError> {
        self.started.store(true, Ordering::SeqCst);
        let _guard = ReleaseOnDrop(Arc::clone(&self.released));
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(FetchError::Transport("woke up".into()))
    }
}

pub fn pair(s: &str) -> CurrencyPair {
    s.parse().unwrap()
}
