//! Rate source configuration.
//!
//! Each provider table is optional; omitted fields fall back to the built-in
//! settings for that provider, so `[sources.profinance] enabled = false` is a
//! complete override.

use serde::Deserialize;

use crate::adapter::outbound::extract::NumberFormat;
use crate::domain::{Currency, CurrencyPair, SourceId};

/// One ranked extraction strategy: a CSS selector, optionally reading an
/// attribute instead of the node text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StrategyConfig {
    pub selector: String,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub format: NumberFormat,
}

impl StrategyConfig {
    fn text(selector: &str, format: NumberFormat) -> Self {
        Self {
            selector: selector.into(),
            attribute: None,
            format,
        }
    }

    fn attribute(selector: &str, attribute: &str, format: NumberFormat) -> Self {
        Self {
            selector: selector.into(),
            attribute: Some(attribute.into()),
            format,
        }
    }
}

/// Structured feed overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedSourceConfig {
    pub enabled: bool,
    pub url: Option<String>,
    /// Currency every feed entry is quoted in.
    pub home_currency: Option<Currency>,
    pub pairs: Option<Vec<CurrencyPair>>,
}

impl Default for FeedSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            home_currency: None,
            pairs: None,
        }
    }
}

/// Page-scrape source overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageSourceConfig {
    pub enabled: bool,
    /// URL with `{base}` and `{quote}` placeholders (lower-case codes).
    pub url_template: Option<String>,
    pub pairs: Option<Vec<CurrencyPair>>,
    /// Ordered from most specific to most generic.
    pub strategies: Option<Vec<StrategyConfig>>,
}

impl Default for PageSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url_template: None,
            pairs: None,
            strategies: None,
        }
    }
}

/// Fully resolved structured feed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub id: SourceId,
    pub url: String,
    pub home_currency: Currency,
    pub pairs: Vec<CurrencyPair>,
}

/// Fully resolved page-scrape settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub id: SourceId,
    pub url_template: String,
    pub pairs: Vec<CurrencyPair>,
    pub strategies: Vec<StrategyConfig>,
}

/// All provider tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub central_bank: FeedSourceConfig,
    pub investing: PageSourceConfig,
    pub profinance: PageSourceConfig,
}

impl SourcesConfig {
    /// The enabled structured feed, with defaults filled in.
    #[must_use]
    pub fn feed(&self) -> Option<FeedSettings> {
        let config = &self.central_bank;
        if !config.enabled {
            return None;
        }
        let defaults = central_bank_defaults();
        Some(FeedSettings {
            id: defaults.id,
            url: config.url.clone().unwrap_or(defaults.url),
            home_currency: config.home_currency.clone().unwrap_or(defaults.home_currency),
            pairs: config.pairs.clone().unwrap_or(defaults.pairs),
        })
    }

    /// Enabled page sources, with defaults filled in.
    #[must_use]
    pub fn pages(&self) -> Vec<PageSettings> {
        [
            (&self.investing, investing_defaults()),
            (&self.profinance, profinance_defaults()),
        ]
        .into_iter()
        .filter(|(config, _)| config.enabled)
        .map(|(config, defaults)| PageSettings {
            id: defaults.id,
            url_template: config.url_template.clone().unwrap_or(defaults.url_template),
            pairs: config.pairs.clone().unwrap_or(defaults.pairs),
            strategies: config.strategies.clone().unwrap_or(defaults.strategies),
        })
        .collect()
    }

    /// Pairs served by an enabled source, or `None` if it is disabled.
    #[must_use]
    pub fn pairs_for(&self, id: SourceId) -> Option<Vec<CurrencyPair>> {
        if id == SourceId::CentralBank {
            return self.feed().map(|feed| feed.pairs);
        }
        self.pages()
            .into_iter()
            .find(|page| page.id == id)
            .map(|page| page.pairs)
    }
}

fn pairs(list: &[(&'static str, &'static str)]) -> Vec<CurrencyPair> {
    list.iter()
        .map(|&(base, quote)| CurrencyPair::known(base, quote))
        .collect()
}

fn central_bank_defaults() -> FeedSettings {
    FeedSettings {
        id: SourceId::CentralBank,
        url: "https://www.cbr.ru/scripts/XML_daily.asp".into(),
        home_currency: Currency::known("RUB"),
        pairs: pairs(&[("USD", "RUB"), ("CNY", "RUB")]),
    }
}

fn investing_defaults() -> PageSettings {
    PageSettings {
        id: SourceId::Investing,
        url_template: "https://www.investing.com/currencies/{base}-{quote}".into(),
        pairs: pairs(&[("USD", "RUB"), ("CNY", "RUB"), ("USD", "CNY")]),
        strategies: vec![
            StrategyConfig::text(
                r#"div[data-test="instrument-price-last"]"#,
                NumberFormat::Grouped,
            ),
            StrategyConfig::text(
                r#"span[data-test="instrument-price-last"]"#,
                NumberFormat::Grouped,
            ),
            StrategyConfig::text("#last_last", NumberFormat::Grouped),
        ],
    }
}

fn profinance_defaults() -> PageSettings {
    PageSettings {
        id: SourceId::Profinance,
        url_template: "https://www.profinance.ru/chart/{base}{quote}/".into(),
        pairs: pairs(&[("USD", "RUB"), ("CNY", "RUB")]),
        strategies: vec![
            StrategyConfig::text("span.price", NumberFormat::DecimalComma),
            StrategyConfig::text(".quote .price", NumberFormat::DecimalComma),
            StrategyConfig::attribute(
                r#"meta[itemprop="price"]"#,
                "content",
                NumberFormat::DecimalComma,
            ),
        ],
    }
}
