//! One-shot comparison: fetch, derive the cross rate, analyze, report.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::aggregator::Aggregator;
use super::config::Config;
use super::factory::build_sources;
use crate::adapter::outbound::http::HttpFetcher;
use crate::domain::{
    ArbitrageAnalyzer, ComparisonReport, CrossRoute, CurrencyPair, RateReading, RateSnapshot,
    SourceId,
};
use crate::error::{FetchError, Result};
use crate::port::outbound::fetcher::Fetcher;
use crate::port::outbound::source::RateSource;

/// Entry point for front ends: runs a full comparison on demand.
///
/// Holds only read-only configuration; every call re-fetches everything.
pub struct CompareService {
    aggregator: Aggregator,
    route: CrossRoute,
    analyzer: ArbitrageAnalyzer,
    cross_source: SourceId,
    direct_source: SourceId,
    report_pairs: Vec<CurrencyPair>,
}

impl CompareService {
    /// Wire sources over the plain HTTP fetcher.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.fetch)?);
        Self::with_fetcher(config, fetcher)
    }

    /// Wire sources over any document fetcher.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let sources = build_sources(config, fetcher)?;
        Self::with_sources(config, sources)
    }

    /// Use pre-built sources instead of the configured providers.
    pub fn with_sources(config: &Config, sources: Vec<Arc<dyn RateSource>>) -> Result<Self> {
        let comparison = &config.comparison;
        Ok(Self {
            aggregator: Aggregator::new(sources, config.fetch.timeout()),
            route: config.route()?,
            analyzer: ArbitrageAnalyzer::new(comparison.threshold)?,
            cross_source: comparison.cross_source,
            direct_source: comparison.direct_source,
            report_pairs: comparison.report_pairs.clone(),
        })
    }

    pub fn route(&self) -> &CrossRoute {
        &self.route
    }

    /// Wired sources, in report order.
    #[must_use]
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.aggregator.sources().iter().map(|s| s.id()).collect()
    }

    /// Every pair one run needs: report pairs, both legs and the target.
    #[must_use]
    pub fn requested_pairs(&self) -> Vec<CurrencyPair> {
        let mut pairs = self.report_pairs.clone();
        for pair in [
            self.route.first_leg(),
            self.route.second_leg(),
            self.route.target(),
        ] {
            if !pairs.contains(pair) {
                pairs.push(pair.clone());
            }
        }
        pairs
    }

    /// Run one comparison.
    ///
    /// Fails only when the aggregator sees a total outage; any missing leg
    /// or direct reading makes the analysis indeterminate instead.
    pub async fn compare(&self) -> Result<ComparisonReport> {
        let snapshot = self.aggregator.run(&self.requested_pairs()).await?;

        let leg_ab = self.reading(&snapshot, self.route.first_leg(), self.cross_source);
        let leg_bc = self.reading(&snapshot, self.route.second_leg(), self.cross_source);
        let direct = self.reading(&snapshot, self.route.target(), self.direct_source);

        let cross = self.route.derive(leg_ab, leg_bc);
        let analysis = self.analyzer.analyze(&cross, &direct);

        info!(
            target = %self.route.target(),
            cross = ?cross.value(),
            direct = ?direct.value(),
            delta = ?analysis.delta(),
            exceeded = analysis.threshold_exceeded(),
            "Comparison complete"
        );

        let order = self.source_ids();
        Ok(ComparisonReport::assemble(
            &snapshot,
            &self.report_pairs,
            &order,
            cross,
            direct,
            analysis,
            self.analyzer.threshold(),
        ))
    }

    /// The snapshot reading for a slot, or a failed placeholder when the
    /// source never fetched it.
    fn reading(
        &self,
        snapshot: &RateSnapshot,
        pair: &CurrencyPair,
        source: SourceId,
    ) -> RateReading {
        snapshot.get(pair, source).cloned().unwrap_or_else(|| {
            RateReading::failed(
                pair.clone(),
                source,
                FetchError::UnsupportedPair {
                    provider: source,
                    pair: pair.clone(),
                },
                Utc::now(),
            )
        })
    }
}
