//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::app::Config;
use crate::error::Result;

/// Print a summary of an already validated configuration.
pub fn execute_config(config: &Config, path: Option<&Path>) -> Result<()> {
    let comparison = &config.comparison;
    let route = config.route()?;

    output::section("Configuration Check");
    match path {
        Some(path) => output::field("Config", path.display()),
        None => output::field("Config", "built-in defaults"),
    }
    output::success("Configuration is valid");

    output::section("Sources");
    if let Some(feed) = config.sources.feed() {
        output::field(feed.id.name(), pair_list(&feed.pairs));
    }
    for page in config.sources.pages() {
        output::field(
            page.id.name(),
            format!(
                "{} ({} strategies)",
                pair_list(&page.pairs),
                page.strategies.len()
            ),
        );
    }

    output::section("Comparison");
    output::field("Target", route.target());
    output::field(
        "Cross",
        format!(
            "{} x {} via {}",
            route.first_leg(),
            route.second_leg(),
            comparison.cross_source
        ),
    );
    output::field("Direct", comparison.direct_source);
    output::field("Threshold", comparison.threshold);
    output::field("Timeout", format!("{}s", config.fetch.timeout_secs));

    if config.telegram.bot_token.is_some() {
        output::success("Telegram token detected");
    } else {
        output::warning("TELEGRAM_BOT_TOKEN not set (needed for `bot`)");
    }

    Ok(())
}

fn pair_list(pairs: &[crate::domain::CurrencyPair]) -> String {
    pairs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
