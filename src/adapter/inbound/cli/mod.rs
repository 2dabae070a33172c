//! Command-line front end.

pub mod check;
pub mod command;
pub mod compare;
pub mod output;

use std::path::{Path, PathBuf};

use tracing::info;

pub use command::{CheckCommand, Cli, ColorChoice, Commands};

use crate::app::Config;
use crate::error::Result;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configure output, load configuration, start logging and dispatch.
pub async fn run(cli: Cli) -> Result<()> {
    apply_color(&cli.color);
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    let path = config_path(cli.config.as_deref());
    let mut config = load_config(path.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "fxcompare starting");
    output::header(env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Compare => compare::execute(&config).await,
        #[cfg(feature = "telegram")]
        Commands::Bot => crate::adapter::inbound::telegram::run(config).await,
        Commands::Check(CheckCommand::Config) => check::execute_config(&config, path.as_deref()),
    }
}

/// The explicit path, else `config.toml` if it exists, else none.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_PATH);
            fallback.exists().then(|| fallback.to_path_buf())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::builtin()),
    }
}

fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}
