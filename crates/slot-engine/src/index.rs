//! Coverage index builder: slot → names of the participants available then.
//!
//! The index is rebuilt from the full record set on every query; there is no
//! incremental maintenance. Keys iterate chronologically (see [`SlotKey`]),
//! which is what makes selection tie-breaks reproducible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::SlotKey;
use crate::error::SlotError;
use crate::record::{AvailabilityRecord, Day};

/// How the builder treats tokens that are not catalog slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Accept any non-empty token verbatim as an index key.
    #[default]
    Permissive,
    /// Skip tokens that are not catalog slots and report them.
    Strict,
}

/// Slot → attendee names, in chronological key order.
///
/// Each attendee list holds a name at most once, in order of first appearance
/// across the records. Two records with the same name therefore count once
/// under any slot they share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageIndex {
    slots: BTreeMap<SlotKey, Vec<String>>,
}

impl CoverageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as available at `key`. Returns false if it was already listed.
    pub fn insert(&mut self, key: SlotKey, name: &str) -> bool {
        let attendees = self.slots.entry(key).or_default();
        if attendees.iter().any(|n| n == name) {
            return false;
        }
        attendees.push(name.to_string());
        true
    }

    /// Number of distinct slots with at least one attendee.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn attendees(&self, slot: &str) -> Option<&[String]> {
        self.slots.get(&SlotKey::new(slot)).map(Vec::as_slice)
    }

    /// Attendee count at `slot`; zero for slots nobody selected.
    pub fn count(&self, slot: &str) -> usize {
        self.attendees(slot).map_or(0, <[String]>::len)
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &[String])> {
        self.slots.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Attendee count per slot, chronological.
    pub fn popularity(&self) -> Vec<(SlotKey, usize)> {
        self.slots
            .iter()
            .map(|(k, v)| (k.clone(), v.len()))
            .collect()
    }
}

/// Builder output: the index plus any tokens rejected under [`SlotPolicy::Strict`].
#[derive(Debug, Default)]
pub struct IndexReport {
    pub index: CoverageIndex,
    pub rejected: Vec<SlotError>,
}

/// Build the coverage index from the `times` column, accepting every token.
///
/// An empty record set yields an empty index, which callers treat as
/// "no responses yet".
pub fn build_index(records: &[AvailabilityRecord]) -> CoverageIndex {
    build_index_with(records, SlotPolicy::Permissive, Day::One).index
}

/// Build the coverage index for one day column under the given slot policy.
///
/// Under `Strict`, each non-catalog token is skipped and reported as
/// `SlotError::InvalidSlot`; the rest of the record is still indexed.
pub fn build_index_with(records: &[AvailabilityRecord], policy: SlotPolicy, day: Day) -> IndexReport {
    let mut report = IndexReport::default();

    for record in records {
        tracing::trace!(name = %record.name, times = record.times_for(day), "indexing record");
        for token in record.slots(day) {
            let key = SlotKey::new(token);
            if policy == SlotPolicy::Strict && !key.is_catalog() {
                tracing::warn!(name = %record.name, token, "skipping non-catalog slot");
                report.rejected.push(SlotError::InvalidSlot(token.to_string()));
                continue;
            }
            report.index.insert(key, &record.name);
        }
    }

    report
}
