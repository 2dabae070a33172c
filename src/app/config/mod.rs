//! Application configuration loading and validation.
//!
//! Configuration is loaded once from a TOML file at startup and treated as
//! read-only afterwards. Secrets (`TELEGRAM_BOT_TOKEN`) come from the
//! environment only.

use std::path::Path;

use serde::Deserialize;

use crate::adapter::outbound::extract::Strategy;
use crate::adapter::outbound::page::render_url;
use crate::domain::{ArbitrageAnalyzer, CrossRoute, CurrencyPair, SourceId};
use crate::error::{ConfigError, Result};

// Submodules
mod comparison;
mod fetch;
mod logging;
mod source;
mod telegram;

// Re-export all public types from submodules
pub use comparison::ComparisonConfig;
pub use fetch::FetchConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use source::{
    FeedSourceConfig, FeedSettings, PageSourceConfig, PageSettings, SourcesConfig,
    StrategyConfig,
};
pub use telegram::TelegramAppConfig;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub fetch: FetchConfig,
    pub comparison: ComparisonConfig,
    pub sources: SourcesConfig,
    pub telegram: TelegramAppConfig,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config = Self::parse(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Built-in provider settings, plus secrets from the environment.
    #[must_use]
    pub fn builtin() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    // Bot token only from the environment, never from the config file
    fn apply_env(&mut self) {
        self.telegram.bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
    }

    /// Parse and validate configuration text.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.validate_fetch()?;
        self.validate_sources()?;
        self.validate_comparison()?;
        Ok(())
    }

    fn validate_fetch(&self) -> std::result::Result<(), ConfigError> {
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "user_agent",
            });
        }
        Ok(())
    }

    fn validate_sources(&self) -> std::result::Result<(), ConfigError> {
        if let Some(feed) = self.sources.feed() {
            url::Url::parse(&feed.url).map_err(|e| ConfigError::InvalidValue {
                field: "url",
                reason: format!("{}: {e}", feed.url),
            })?;
            if let Some(pair) = feed.pairs.iter().find(|p| p.quote() != &feed.home_currency) {
                return Err(ConfigError::InvalidValue {
                    field: "pairs",
                    reason: format!("{pair} is not quoted in {}", feed.home_currency),
                });
            }
        }

        for page in self.sources.pages() {
            if !page.url_template.contains("{base}") || !page.url_template.contains("{quote}") {
                return Err(ConfigError::InvalidValue {
                    field: "url_template",
                    reason: format!("{} needs {{base}} and {{quote}}", page.url_template),
                });
            }
            for pair in &page.pairs {
                let url = render_url(&page.url_template, pair);
                url::Url::parse(&url).map_err(|e| ConfigError::InvalidValue {
                    field: "url_template",
                    reason: format!("{url}: {e}"),
                })?;
            }
            if page.strategies.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "strategies",
                });
            }
            for strategy in &page.strategies {
                Strategy::from_config(strategy)?;
            }
        }

        if self.sources.feed().is_none() && self.sources.pages().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sources",
                reason: "at least one source must be enabled".into(),
            });
        }
        Ok(())
    }

    fn validate_comparison(&self) -> std::result::Result<(), ConfigError> {
        let comparison = &self.comparison;
        ArbitrageAnalyzer::new(comparison.threshold).map_err(|e| ConfigError::InvalidValue {
            field: "threshold",
            reason: e.to_string(),
        })?;

        let route = self.route()?;
        self.require_pairs(
            "cross_source",
            comparison.cross_source,
            &[route.first_leg(), route.second_leg()],
        )?;
        self.require_pairs("direct_source", comparison.direct_source, &[route.target()])?;
        Ok(())
    }

    /// The configured cross route.
    pub fn route(&self) -> std::result::Result<CrossRoute, ConfigError> {
        CrossRoute::new(self.comparison.target.clone(), self.comparison.via.clone()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "via",
                reason: e.to_string(),
            }
        })
    }

    fn require_pairs(
        &self,
        field: &'static str,
        source: SourceId,
        needed: &[&CurrencyPair],
    ) -> std::result::Result<(), ConfigError> {
        let Some(served) = self.sources.pairs_for(source) else {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("{source} is disabled"),
            });
        };
        if let Some(missing) = needed.iter().find(|pair| !served.contains(**pair)) {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("{source} does not serve {missing}"),
            });
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn expect_invalid(toml: &str, expected: &'static str) {
        match Config::parse(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected)
            }
            Err(err) => panic!("expected invalid {expected}, got {err}"),
            Ok(_) => panic!("expected invalid {expected}, got Ok"),
        }
    }

    #[test]
    fn empty_file_gives_working_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.comparison.threshold, dec!(0.3));
        assert_eq!(config.comparison.target.to_string(), "USD/RUB");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        let route = config.route().unwrap();
        assert_eq!(route.first_leg().to_string(), "USD/CNY");
    }

    #[test]
    fn rejects_non_positive_threshold() {
        expect_invalid("[comparison]\nthreshold = 0\n", "threshold");
    }

    #[test]
    fn rejects_zero_timeout() {
        expect_invalid("[fetch]\ntimeout_secs = 0\n", "timeout_secs");
    }

    #[test]
    fn rejects_missing_user_agent() {
        let result = Config::parse("[fetch]\nuser_agent = \"\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "user_agent" }))
        ));
    }

    #[test]
    fn rejects_cross_source_without_legs() {
        expect_invalid("[comparison]\ncross_source = \"profinance\"\n", "cross_source");
    }

    #[test]
    fn rejects_disabled_direct_source() {
        expect_invalid(
            "[comparison]\ndirect_source = \"central_bank\"\n\n\
             [sources.central_bank]\nenabled = false\n",
            "direct_source",
        );
    }

    #[test]
    fn rejects_route_through_target_currency() {
        expect_invalid("[comparison]\nvia = \"RUB\"\n", "via");
    }

    #[test]
    fn rejects_bad_selector() {
        expect_invalid(
            "[[sources.profinance.strategies]]\nselector = \"span[[\"\n",
            "selector",
        );
    }

    #[test]
    fn rejects_template_without_placeholders() {
        expect_invalid(
            "[sources.investing]\nurl_template = \"https://example.com/usd-rub\"\n",
            "url_template",
        );
    }

    #[test]
    fn rejects_feed_pair_in_foreign_currency() {
        expect_invalid(
            "[sources.central_bank]\npairs = [\"USD/CNY\"]\n",
            "pairs",
        );
    }

    #[test]
    fn load_reads_logging_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nformat = \"json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn load_reports_missing_file() {
        let result = Config::load("/definitely/not/here/fxcompare.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}
