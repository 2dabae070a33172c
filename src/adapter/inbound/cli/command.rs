//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Compare FX rates across sources and flag cross-rate arbitrage
#[derive(Parser, Debug)]
#[command(name = "fxcompare")]
#[command(version, about)]
pub struct Cli {
    /// Configuration file [default: ./config.toml if present, else built-in defaults]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log level (e.g. debug, fxcompare=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every source once and print the comparison report
    Compare,

    /// Serve /compare over Telegram
    #[cfg(feature = "telegram")]
    Bot,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Load and validate the configuration without fetching anything
    Config,
}
