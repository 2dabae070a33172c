//! Frozen set of readings collected during one comparison run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::currency::CurrencyPair;
use super::reading::RateReading;
use super::source::SourceId;

type SlotKey = (CurrencyPair, SourceId);

/// Readings keyed by (pair, source).
///
/// Built once per run from the aggregated readings and never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct RateSnapshot {
    #[serde(serialize_with = "serialize_slots")]
    readings: BTreeMap<SlotKey, RateReading>,
    taken_at: DateTime<Utc>,
}

fn serialize_slots<S: Serializer>(
    readings: &BTreeMap<SlotKey, RateReading>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(readings.values())
}

impl RateSnapshot {
    /// Assemble a snapshot. Each slot is written once; a repeated slot keeps
    /// the first reading.
    pub fn from_readings(readings: impl IntoIterator<Item = RateReading>) -> Self {
        let mut slots = BTreeMap::new();
        for reading in readings {
            let key = (reading.pair().clone(), reading.source());
            slots.entry(key).or_insert(reading);
        }
        Self {
            readings: slots,
            taken_at: Utc::now(),
        }
    }

    pub fn get(&self, pair: &CurrencyPair, source: SourceId) -> Option<&RateReading> {
        self.readings.get(&(pair.clone(), source))
    }

    /// Value for a slot, `None` when the slot is missing or failed.
    pub fn value(&self, pair: &CurrencyPair, source: SourceId) -> Option<Decimal> {
        self.get(pair, source).and_then(RateReading::value)
    }

    /// All readings for one pair, in source order.
    pub fn for_pair(&self, pair: &CurrencyPair) -> impl Iterator<Item = &RateReading> {
        let pair = pair.clone();
        self.readings
            .iter()
            .filter(move |((slot_pair, _), _)| *slot_pair == pair)
            .map(|(_, reading)| reading)
    }

    pub fn ok_count(&self) -> usize {
        self.readings.values().filter(|r| r.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.readings.len() - self.ok_count()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}
