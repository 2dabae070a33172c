//! Source-agnostic domain logic: pairs, readings, cross rates and verdicts.

mod arbitrage;
mod cross;
mod currency;
mod reading;
mod report;
mod snapshot;
mod source;

pub mod error;

pub use arbitrage::{
    Analysis, ArbitrageAnalyzer, ArbitrageVerdict, IndeterminateReason, Side, DEFAULT_THRESHOLD,
};
pub use cross::{CrossRateResult, CrossRoute};
pub use currency::{Currency, CurrencyPair};
pub use error::DomainError;
pub use reading::RateReading;
pub use report::{ComparisonReport, PairSection, SourceQuote};
pub use snapshot::RateSnapshot;
pub use source::SourceId;
