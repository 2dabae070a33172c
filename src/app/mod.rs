//! Application layer: configuration, source wiring and the comparison run.

pub mod config;

mod aggregator;
mod compare;
mod factory;

pub use aggregator::Aggregator;
pub use compare::CompareService;
pub use config::Config;
pub use factory::build_sources;
