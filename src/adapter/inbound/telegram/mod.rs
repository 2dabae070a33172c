//! Telegram front end.
//!
//! Requires the `telegram` feature to be enabled.

mod bot;
pub mod command;
pub mod format;

pub use bot::run;
