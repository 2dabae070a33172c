//! Inbound adapters (driving side): front ends that trigger comparisons.

pub mod cli;
pub mod present;
#[cfg(feature = "telegram")]
pub mod telegram;
