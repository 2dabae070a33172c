//! Ranked-fallback number extraction from HTML documents.
//!
//! A page source carries an ordered list of [`Strategy`] values. Extraction
//! walks them lazily: the first strategy with at least one parseable match
//! wins, and a strategy whose matches exist but do not parse simply yields to
//! the next one. Order strategies from most specific to most generic so that
//! markup drift degrades to a broader selector instead of a failure.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::app::config::StrategyConfig;
use crate::error::{ConfigError, ExtractError};

/// How separators in a matched number are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// `,` is the decimal separator (`93,4400`).
    #[default]
    DecimalComma,
    /// `,` groups thousands (`1,093.44`).
    Grouped,
}

/// Parse a positive decimal out of free text.
///
/// Everything except digits, `.` and `,` is stripped first, so currency
/// signs, spaces and arrows around the number are ignored.
pub fn parse_number(text: &str, format: NumberFormat) -> Option<Decimal> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let normalized = match format {
        NumberFormat::DecimalComma => kept.replace(',', "."),
        NumberFormat::Grouped => kept.replace(',', ""),
    };

    Decimal::from_str(&normalized)
        .ok()
        .filter(|value| *value > Decimal::ZERO)
}

/// Where to find candidate text in a document.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    attribute: Option<String>,
    raw: String,
}

impl Locator {
    pub fn css(selector: &str) -> Result<Self, ConfigError> {
        let parsed = Selector::parse(selector).map_err(|e| ConfigError::InvalidValue {
            field: "selector",
            reason: format!("`{selector}`: {e}"),
        })?;
        Ok(Self {
            selector: parsed,
            attribute: None,
            raw: selector.to_string(),
        })
    }

    /// Read `attribute` of each match instead of its text.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    fn candidate(&self, node: ElementRef<'_>) -> Option<String> {
        match &self.attribute {
            Some(name) => node.value().attr(name).map(str::to_string),
            None => Some(node.text().collect()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "{}@{}", self.raw, attribute),
            None => f.write_str(&self.raw),
        }
    }
}

/// One locator paired with the number format of what it finds.
#[derive(Debug, Clone)]
pub struct Strategy {
    locator: Locator,
    format: NumberFormat,
}

impl Strategy {
    #[must_use]
    pub fn new(locator: Locator, format: NumberFormat) -> Self {
        Self { locator, format }
    }

    pub fn from_config(config: &StrategyConfig) -> Result<Self, ConfigError> {
        let mut locator = Locator::css(&config.selector)?;
        if let Some(attribute) = &config.attribute {
            locator = locator.with_attribute(attribute.clone());
        }
        Ok(Self::new(locator, config.format))
    }

    /// First parseable value among this strategy's matches.
    fn apply(&self, document: &Html) -> Option<Decimal> {
        document
            .select(&self.locator.selector)
            .filter_map(|node| self.locator.candidate(node))
            .find_map(|text| parse_number(&text, self.format))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locator)
    }
}

/// Extract the first value produced by `strategies`, in order.
pub fn extract(document: &str, strategies: &[Strategy]) -> Result<Decimal, ExtractError> {
    let html = Html::parse_document(document);

    strategies
        .iter()
        .find_map(|strategy| strategy.apply(&html))
        .ok_or_else(|| ExtractError::NoMatch {
            attempted: strategies.iter().map(ToString::to_string).collect(),
        })
}
