//! Display-ready comparison report.
//!
//! The report is pure data: front ends decide how to render it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::arbitrage::{Analysis, ArbitrageVerdict};
use super::cross::CrossRateResult;
use super::currency::CurrencyPair;
use super::reading::RateReading;
use super::snapshot::RateSnapshot;
use super::source::SourceId;

/// One source's value for a pair; `None` renders as `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceQuote {
    pub source: SourceId,
    pub value: Option<Decimal>,
}

/// All quotes for one pair, in source order.
#[derive(Debug, Clone, Serialize)]
pub struct PairSection {
    pub pair: CurrencyPair,
    pub quotes: Vec<SourceQuote>,
}

/// Everything one comparison run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    generated_at: DateTime<Utc>,
    sections: Vec<PairSection>,
    cross: CrossRateResult,
    direct: RateReading,
    analysis: Analysis,
    threshold: Decimal,
    readings_ok: usize,
    readings_failed: usize,
}

impl ComparisonReport {
    /// Lay out a snapshot and its analysis.
    ///
    /// Sections follow `pairs`; within a section, quotes follow `sources`
    /// and only slots that were requested in this run appear.
    pub fn assemble(
        snapshot: &RateSnapshot,
        pairs: &[CurrencyPair],
        sources: &[SourceId],
        cross: CrossRateResult,
        direct: RateReading,
        analysis: Analysis,
        threshold: Decimal,
    ) -> Self {
        let sections = pairs
            .iter()
            .map(|pair| PairSection {
                pair: pair.clone(),
                quotes: sources
                    .iter()
                    .filter_map(|&source| {
                        snapshot.get(pair, source).map(|reading| SourceQuote {
                            source,
                            value: reading.value(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: snapshot.taken_at(),
            sections,
            cross,
            direct,
            analysis,
            threshold,
            readings_ok: snapshot.ok_count(),
            readings_failed: snapshot.failed_count(),
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn sections(&self) -> &[PairSection] {
        &self.sections
    }

    pub fn cross(&self) -> &CrossRateResult {
        &self.cross
    }

    pub fn direct(&self) -> &RateReading {
        &self.direct
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// The verdict, only when it crosses the threshold.
    pub fn opportunity(&self) -> Option<&ArbitrageVerdict> {
        self.analysis.verdict().filter(|v| v.threshold_exceeded)
    }

    /// `(ok, failed)` reading counts for the run.
    pub fn reading_counts(&self) -> (usize, usize) {
        (self.readings_ok, self.readings_failed)
    }
}
