//! Builds the rate sources named by the configuration.

use std::sync::Arc;

use tracing::debug;

use super::config::Config;
use crate::adapter::outbound::feed::FeedSource;
use crate::adapter::outbound::page::PageSource;
use crate::error::ConfigError;
use crate::port::outbound::fetcher::Fetcher;
use crate::port::outbound::source::RateSource;

/// Instantiate every enabled source over a shared fetcher.
///
/// The structured feed comes first, then page sources in table order; this
/// is also the column order in reports.
pub fn build_sources(
    config: &Config,
    fetcher: Arc<dyn Fetcher>,
) -> Result<Vec<Arc<dyn RateSource>>, ConfigError> {
    let mut sources: Vec<Arc<dyn RateSource>> = Vec::new();

    if let Some(feed) = config.sources.feed() {
        debug!(source = %feed.id, pairs = feed.pairs.len(), "Feed source enabled");
        sources.push(Arc::new(FeedSource::from_settings(&feed, Arc::clone(&fetcher))));
    }

    for page in config.sources.pages() {
        debug!(
            source = %page.id,
            pairs = page.pairs.len(),
            strategies = page.strategies.len(),
            "Page source enabled"
        );
        sources.push(Arc::new(PageSource::from_settings(&page, Arc::clone(&fetcher))?));
    }

    Ok(sources)
}
