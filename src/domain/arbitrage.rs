//! Direct vs cross-rate arbitrage analysis.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::cross::CrossRateResult;
use super::error::DomainError;
use super::reading::RateReading;

/// Which way of obtaining the target pair a trade goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The directly quoted pair.
    Direct,
    /// The two legs of the cross rate.
    Cross,
}

/// Signed comparison of a cross rate against a direct rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArbitrageVerdict {
    /// `cross - direct`.
    pub delta: Decimal,
    /// `|delta| > threshold`.
    pub threshold_exceeded: bool,
    pub buy: Side,
    pub sell: Side,
}

impl ArbitrageVerdict {
    /// Gap per unit of the base currency.
    pub fn potential_profit(&self) -> Decimal {
        self.delta.abs()
    }
}

/// Why no verdict could be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateReason {
    /// At least one leg failed, so there is no cross rate.
    MissingCross,
    /// The direct reading failed.
    MissingDirect,
    /// Cross and direct are equal; there is no direction.
    NoSpread,
}

/// Result of an analysis. `Indeterminate` is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Analysis {
    Verdict(ArbitrageVerdict),
    Indeterminate { reason: IndeterminateReason },
}

impl Analysis {
    pub fn verdict(&self) -> Option<&ArbitrageVerdict> {
        match self {
            Self::Verdict(verdict) => Some(verdict),
            Self::Indeterminate { .. } => None,
        }
    }

    pub fn threshold_exceeded(&self) -> bool {
        self.verdict().is_some_and(|v| v.threshold_exceeded)
    }

    pub fn delta(&self) -> Option<Decimal> {
        self.verdict().map(|v| v.delta)
    }
}

/// Absolute threshold in units of the quote currency.
pub const DEFAULT_THRESHOLD: Decimal = dec!(0.3);

/// Compares cross rates against direct rates.
#[derive(Debug, Clone, Copy)]
pub struct ArbitrageAnalyzer {
    threshold: Decimal,
}

impl ArbitrageAnalyzer {
    pub fn new(threshold: Decimal) -> Result<Self, DomainError> {
        if threshold <= Decimal::ZERO {
            return Err(DomainError::NonPositiveThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Compare `cross` against `direct`.
    ///
    /// A positive delta means the cross route is overpriced: buy direct,
    /// sell through the legs. A negative delta is the reverse.
    pub fn analyze(&self, cross: &CrossRateResult, direct: &RateReading) -> Analysis {
        let Some(cross_value) = cross.value() else {
            return Analysis::Indeterminate {
                reason: IndeterminateReason::MissingCross,
            };
        };
        let Some(direct_value) = direct.value() else {
            return Analysis::Indeterminate {
                reason: IndeterminateReason::MissingDirect,
            };
        };

        self.compare(cross_value - direct_value)
    }

    fn compare(&self, delta: Decimal) -> Analysis {
        if delta.is_zero() {
            return Analysis::Indeterminate {
                reason: IndeterminateReason::NoSpread,
            };
        }

        let (buy, sell) = if delta > Decimal::ZERO {
            (Side::Direct, Side::Cross)
        } else {
            (Side::Cross, Side::Direct)
        };

        Analysis::Verdict(ArbitrageVerdict {
            delta,
            threshold_exceeded: delta.abs() > self.threshold,
            buy,
            sell,
        })
    }
}

impl Default for ArbitrageAnalyzer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
