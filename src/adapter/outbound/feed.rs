//! Structured feed rate source (central bank daily XML).
//!
//! The feed is a single document listing every currency against the home
//! currency:
//!
//! ```xml
//! <ValCurs Date="18.10.2026" name="Foreign Currency Market">
//!   <Valute ID="R01375">
//!     <CharCode>CNY</CharCode>
//!     <Nominal>10</Nominal>
//!     <Value>129,5000</Value>
//!   </Valute>
//! </ValCurs>
//! ```
//!
//! Values are quoted per `Nominal` units, so they are divided down to a
//! per-unit rate when the document is indexed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::extract::{parse_number, NumberFormat};
use crate::app::config::FeedSettings;
use crate::domain::{Currency, CurrencyPair, RateReading, SourceId};
use crate::error::FetchError;
use crate::port::outbound::fetcher::Fetcher;
use crate::port::outbound::source::{PairResult, RateSource};

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "Valute", default)]
    entries: Vec<Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Nominal")]
    nominal: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Parsed feed: per-unit rate in the home currency, keyed by currency code.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    rates: HashMap<Currency, Decimal>,
}

impl FeedDocument {
    /// Parse and index a feed document.
    ///
    /// Entries with an unknown code shape or a non-positive value are skipped.
    /// A document that is not XML of the expected shape, or that has no
    /// entries at all, is [`FetchError::Malformed`].
    pub fn parse(xml: &str) -> Result<Self, FetchError> {
        let parsed: ValCurs =
            quick_xml::de::from_str(xml).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut rates = HashMap::with_capacity(parsed.entries.len());
        for entry in parsed.entries {
            let Ok(code) = Currency::new(&entry.char_code) else {
                debug!(code = %entry.char_code, "Skipping feed entry with odd code");
                continue;
            };
            let Some(per_unit) = per_unit(&entry) else {
                debug!(code = %code, "Skipping unparseable feed entry");
                continue;
            };
            rates.insert(code, per_unit);
        }

        if rates.is_empty() {
            return Err(FetchError::Malformed("feed has no currency entries".into()));
        }
        Ok(Self { rates })
    }

    /// Per-unit rate for `code`, or [`FetchError::DataUnavailable`].
    pub fn per_unit(&self, code: &Currency) -> Result<Decimal, FetchError> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| FetchError::DataUnavailable { code: code.clone() })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn per_unit(entry: &Valute) -> Option<Decimal> {
    let nominal: u32 = entry.nominal.trim().parse().ok().filter(|n| *n > 0)?;
    let value = parse_number(&entry.value, NumberFormat::DecimalComma)?;
    value.checked_div(Decimal::from(nominal))
}

/// A source backed by one structured document per run.
///
/// Every entry is quoted in `home_currency`, so only pairs quoted in it are
/// served, whatever `pairs` lists.
pub struct FeedSource {
    id: SourceId,
    url: String,
    home_currency: Currency,
    pairs: Vec<CurrencyPair>,
    fetcher: Arc<dyn Fetcher>,
}

impl FeedSource {
    #[must_use]
    pub fn new(
        id: SourceId,
        url: impl Into<String>,
        home_currency: Currency,
        pairs: Vec<CurrencyPair>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            id,
            url: url.into(),
            home_currency,
            pairs,
            fetcher,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &FeedSettings, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(
            settings.id,
            settings.url.clone(),
            settings.home_currency.clone(),
            settings.pairs.clone(),
            fetcher,
        )
    }

    async fn load(&self) -> Result<FeedDocument, FetchError> {
        debug!(source = %self.id, url = %self.url, "Downloading feed");
        let body = self.fetcher.fetch(&self.url).await?;
        let document = FeedDocument::parse(&body)?;
        info!(source = %self.id, currencies = document.len(), "Feed loaded");
        Ok(document)
    }

    fn reading(
        &self,
        document: &FeedDocument,
        pair: &CurrencyPair,
    ) -> Result<RateReading, FetchError> {
        let value = document.per_unit(pair.base())?;
        RateReading::ok(pair.clone(), self.id, value, Utc::now())
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }

    fn unsupported(&self, pair: &CurrencyPair) -> FetchError {
        FetchError::UnsupportedPair {
            provider: self.id,
            pair: pair.clone(),
        }
    }
}

#[async_trait]
impl RateSource for FeedSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn supports(&self, pair: &CurrencyPair) -> bool {
        pair.quote() == &self.home_currency && self.pairs.contains(pair)
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<RateReading, FetchError> {
        if !self.supports(pair) {
            return Err(self.unsupported(pair));
        }
        let document = self.load().await?;
        self.reading(&document, pair)
    }

    /// Downloads the feed once and answers every supported pair from it.
    async fn fetch_batch(&self, pairs: &[CurrencyPair], timeout: Duration) -> Vec<PairResult> {
        if !pairs.iter().any(|pair| self.supports(pair)) {
            return pairs
                .iter()
                .map(|pair| (pair.clone(), Err(self.unsupported(pair))))
                .collect();
        }

        let document = match tokio::time::timeout(timeout, self.load()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        };
        if let Err(e) = &document {
            warn!(source = %self.id, error = %e, "Feed unavailable");
        }

        pairs
            .iter()
            .map(|pair| {
                let result = if !self.supports(pair) {
                    Err(self.unsupported(pair))
                } else {
                    match &document {
                        Ok(document) => self.reading(document, pair),
                        Err(e) => Err(e.clone()),
                    }
                };
                (pair.clone(), result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DAILY: &str = r#"<?xml version="1.0" encoding="windows-1251"?>
<ValCurs Date="18.10.2026" name="Foreign Currency Market">
  <Valute ID="R01235">
    <NumCode>840</NumCode>
    <CharCode>USD</CharCode>
    <Nominal>1</Nominal>
    <Name>US Dollar</Name>
    <Value>93,2000</Value>
    <VunitRate>93,2</VunitRate>
  </Valute>
  <Valute ID="R01375">
    <NumCode>156</NumCode>
    <CharCode>CNY</CharCode>
    <Nominal>10</Nominal>
    <Name>Yuan Renminbi</Name>
    <Value>129,5000</Value>
    <VunitRate>12,95</VunitRate>
  </Valute>
</ValCurs>"#;

    struct CountingFetcher {
        body: Result<String, FetchError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone()
        }
    }

    fn fetcher(body: Result<&str, FetchError>) -> Arc<CountingFetcher> {
        Arc::new(CountingFetcher {
            body: body.map(str::to_string),
            calls: AtomicUsize::new(0),
        })
    }

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    fn source(fetcher: Arc<CountingFetcher>) -> FeedSource {
        FeedSource::new(
            SourceId::CentralBank,
            "https://feed.test/daily.xml",
            Currency::new("RUB").unwrap(),
            vec![pair("USD/RUB"), pair("CNY/RUB"), pair("EUR/RUB"), pair("USD/EUR")],
            fetcher,
        )
    }

    #[test]
    fn parse_normalizes_by_nominal() {
        let document = FeedDocument::parse(DAILY).unwrap();

        assert_eq!(document.len(), 2);
        assert_eq!(document.per_unit(&Currency::new("USD").unwrap()), Ok(dec!(93.2)));
        assert_eq!(document.per_unit(&Currency::new("CNY").unwrap()), Ok(dec!(12.95)));
    }

    #[test]
    fn missing_code_is_data_unavailable() {
        let document = FeedDocument::parse(DAILY).unwrap();
        let eur = Currency::new("EUR").unwrap();

        assert_eq!(
            document.per_unit(&eur),
            Err(FetchError::DataUnavailable { code: eur.clone() })
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            FeedDocument::parse("<html><body>blocked</body></html>"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn batch_downloads_feed_once() {
        let fetcher = fetcher(Ok(DAILY));
        let source = source(Arc::clone(&fetcher));
        let pairs = [pair("USD/RUB"), pair("CNY/RUB"), pair("EUR/RUB"), pair("USD/CNY")];

        let results = source.fetch_batch(&pairs, Duration::from_secs(5)).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].1.as_ref().unwrap().value(), Some(dec!(93.2)));
        assert_eq!(results[1].1.as_ref().unwrap().value(), Some(dec!(12.95)));
        assert!(matches!(results[2].1, Err(FetchError::DataUnavailable { .. })));
        assert!(matches!(results[3].1, Err(FetchError::UnsupportedPair { .. })));
    }

    #[tokio::test]
    async fn pairs_outside_home_currency_are_not_served() {
        let fetcher = fetcher(Ok(DAILY));
        let source = source(Arc::clone(&fetcher));

        assert!(source.supports(&pair("USD/RUB")));
        assert!(!source.supports(&pair("USD/EUR")));

        let results = source
            .fetch_batch(&[pair("USD/RUB"), pair("USD/EUR")], Duration::from_secs(5))
            .await;
        assert_eq!(results[0].1.as_ref().unwrap().value(), Some(dec!(93.2)));
        assert!(matches!(results[1].1, Err(FetchError::UnsupportedPair { .. })));

        let direct = source.fetch(&pair("USD/EUR")).await;
        assert!(matches!(direct, Err(FetchError::UnsupportedPair { .. })));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn batch_spreads_download_failure_to_every_pair() {
        let fetcher = fetcher(Err(FetchError::Transport("HTTP 503".into())));
        let source = source(fetcher);
        let pairs = [pair("USD/RUB"), pair("CNY/RUB")];

        let results = source.fetch_batch(&pairs, Duration::from_secs(5)).await;

        for (_, result) in results {
            assert_eq!(result.unwrap_err(), FetchError::Transport("HTTP 503".into()));
        }
    }

    #[tokio::test]
    async fn batch_of_unsupported_pairs_skips_download() {
        let fetcher = fetcher(Ok(DAILY));
        let source = source(Arc::clone(&fetcher));

        let results = source
            .fetch_batch(&[pair("USD/CNY")], Duration::from_secs(5))
            .await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(matches!(results[0].1, Err(FetchError::UnsupportedPair { .. })));
    }
}
