//! What to compare and when to call it an opportunity.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Currency, CurrencyPair, SourceId, DEFAULT_THRESHOLD};

/// Comparison settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Pair compared directly against its cross rate.
    pub target: CurrencyPair,
    /// Intermediate currency of the cross route.
    pub via: Currency,
    /// Source whose leg readings form the cross rate.
    pub cross_source: SourceId,
    /// Source whose reading of `target` is the direct rate.
    pub direct_source: SourceId,
    /// Absolute gap, in quote currency, above which the gap is an opportunity.
    pub threshold: Decimal,
    /// Pairs listed per source in the report.
    pub report_pairs: Vec<CurrencyPair>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            target: CurrencyPair::known("USD", "RUB"),
            via: Currency::known("CNY"),
            cross_source: SourceId::Investing,
            direct_source: SourceId::Investing,
            threshold: DEFAULT_THRESHOLD,
            report_pairs: vec![
                CurrencyPair::known("USD", "RUB"),
                CurrencyPair::known("CNY", "RUB"),
            ],
        }
    }
}
