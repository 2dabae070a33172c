//! fxcompare - FX rate comparison and cross-rate arbitrage signals.
//!
//! Fetches a currency pair from several independent sources, derives a
//! synthetic cross rate from two legs (A/B × B/C = A/C), and flags when the
//! direct and cross rates diverge beyond a threshold.
//!
//! # Architecture
//!
//! - **`domain`** - Pairs, readings, snapshots, cross rates and verdicts
//! - **`port`** - `RateSource` and `Fetcher` traits
//! - **`adapter::outbound`** - HTTP fetcher, XML feed source, page-scrape
//!   source with ranked extraction strategies
//! - **`app`** - Configuration, the concurrent aggregator and
//!   `CompareService`
//! - **`adapter::inbound`** - CLI and Telegram front ends
//!
//! # Features
//!
//! - `telegram` - Telegram bot front end (enabled by default)
//!
//! # Example
//!
//! ```no_run
//! use fxcompare::app::{CompareService, Config};
//!
//! # async fn run() -> fxcompare::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let report = CompareService::from_config(&config)?.compare().await?;
//! if let Some(verdict) = report.opportunity() {
//!     println!("gap of {} per unit", verdict.potential_profit());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;
