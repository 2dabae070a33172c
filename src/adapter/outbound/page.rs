//! Page-scrape rate source.
//!
//! Downloads one HTML page per pair and runs the ranked extraction strategies
//! over it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::extract::{extract, Strategy};
use crate::app::config::PageSettings;
use crate::domain::{CurrencyPair, RateReading, SourceId};
use crate::error::{ConfigError, FetchError};
use crate::port::outbound::fetcher::Fetcher;
use crate::port::outbound::source::RateSource;

/// Fill `{base}` and `{quote}` with lower-case currency codes.
#[must_use]
pub fn render_url(template: &str, pair: &CurrencyPair) -> String {
    template
        .replace("{base}", &pair.base().as_str().to_ascii_lowercase())
        .replace("{quote}", &pair.quote().as_str().to_ascii_lowercase())
}

/// A source that scrapes one page per pair.
pub struct PageSource {
    id: SourceId,
    url_template: String,
    pairs: Vec<CurrencyPair>,
    strategies: Vec<Strategy>,
    fetcher: Arc<dyn Fetcher>,
}

impl PageSource {
    #[must_use]
    pub fn new(
        id: SourceId,
        url_template: impl Into<String>,
        pairs: Vec<CurrencyPair>,
        strategies: Vec<Strategy>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            id,
            url_template: url_template.into(),
            pairs,
            strategies,
            fetcher,
        }
    }

    /// Build from resolved settings, compiling the strategy selectors.
    pub fn from_settings(
        settings: &PageSettings,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, ConfigError> {
        let strategies = settings
            .strategies
            .iter()
            .map(Strategy::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(
            settings.id,
            settings.url_template.clone(),
            settings.pairs.clone(),
            strategies,
            fetcher,
        ))
    }
}

#[async_trait]
impl RateSource for PageSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn supports(&self, pair: &CurrencyPair) -> bool {
        self.pairs.contains(pair)
    }

    async fn fetch(&self, pair: &CurrencyPair) -> Result<RateReading, FetchError> {
        let url = render_url(&self.url_template, pair);
        debug!(source = %self.id, pair = %pair, url = %url, "Scraping page");

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(source = %self.id, pair = %pair, error = %e, "Page fetch failed");
                return Err(e);
            }
        };

        let value = match extract(&body, &self.strategies) {
            Ok(value) => value,
            Err(e) => {
                warn!(source = %self.id, pair = %pair, error = %e, "Extraction failed");
                return Err(e.into());
            }
        };

        info!(source = %self.id, pair = %pair, value = %value, "Rate scraped");
        RateReading::ok(pair.clone(), self.id, value, Utc::now())
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
