//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                ┌─────────────────────────┐
//!   CLI ────────▶│      Application        │◀──────── Telegram
//!                │  Aggregator + Compare   │
//!                └────────────┬────────────┘
//!                             │ RateSource
//!          ┌──────────────────┼──────────────────┐
//!          ▼                  ▼                  ▼
//!    ┌───────────┐      ┌───────────┐      ┌───────────┐
//!    │ Feed (XML)│      │ Page (CSS)│      │ Page (CSS)│
//!    └─────┬─────┘      └─────┬─────┘      └─────┬─────┘
//!          └──────────────────┴──── Fetcher ─────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::source::RateSource`] - A named provider of readings
//! - [`outbound::fetcher::Fetcher`] - Transport that turns a URL into a document

pub mod outbound;
