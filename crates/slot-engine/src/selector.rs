//! Best-slot selection over a [`CoverageIndex`].
//!
//! Both modes use the distinct-name metric: a participant counts once per slot,
//! and once for a pair even when available at both slots.
//!
//! Candidates are enumerated in chronological key order and a candidate only
//! replaces the current best when it is strictly better. Ties therefore go to
//! the earliest slot, or for pairs to the first `(i, j)` with `i < j` in
//! chronological order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::SlotKey;
use crate::index::CoverageIndex;

/// Selection policy requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// The slot with the most attendees.
    Single,
    /// The two slots whose attendee union is largest.
    #[default]
    Pair,
}

/// One chosen slot and who can attend it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotPick {
    pub slot: SlotKey,
    pub attendees: Vec<String>,
}

/// Two chosen slots and the size of their attendee union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairPick {
    pub first: SlotPick,
    pub second: SlotPick,
    pub coverage: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// The index was empty.
    NoResponses,
    /// A single slot. In pair mode this means only one slot had attendees.
    Single(SlotPick),
    Pair(PairPick),
}

impl Selection {
    /// Distinct attendees covered by the selection.
    pub fn coverage(&self) -> usize {
        match self {
            Selection::NoResponses => 0,
            Selection::Single(pick) => pick.attendees.len(),
            Selection::Pair(pair) => pair.coverage,
        }
    }

    /// Chosen slots, chronological.
    pub fn slots(&self) -> Vec<&SlotKey> {
        match self {
            Selection::NoResponses => Vec::new(),
            Selection::Single(pick) => vec![&pick.slot],
            Selection::Pair(pair) => vec![&pair.first.slot, &pair.second.slot],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::NoResponses)
    }
}

/// Select according to `mode`.
pub fn select_best(index: &CoverageIndex, mode: SelectionMode) -> Selection {
    match mode {
        SelectionMode::Single => select_single(index),
        SelectionMode::Pair => select_pair(index),
    }
}

/// The slot with the most attendees; the earliest one on a tie.
pub fn select_single(index: &CoverageIndex) -> Selection {
    let mut best: Option<(&SlotKey, &[String])> = None;
    for (slot, attendees) in index.iter() {
        if best.is_none_or(|(_, b)| attendees.len() > b.len()) {
            best = Some((slot, attendees));
        }
    }

    match best {
        None => Selection::NoResponses,
        Some((slot, attendees)) => {
            tracing::debug!(slot = %slot, coverage = attendees.len(), "selected single slot");
            Selection::Single(pick(slot, attendees))
        }
    }
}

/// The pair of distinct slots maximising the union of attendee names.
///
/// Every unordered pair is examined; with at most 48 catalog slots that is
/// 1128 unions. An index holding a single slot yields `Selection::Single` for
/// that slot, since there is no second slot to pair it with.
pub fn select_pair(index: &CoverageIndex) -> Selection {
    let entries: Vec<(&SlotKey, &[String])> = index.iter().collect();
    if entries.len() < 2 {
        return select_single(index);
    }

    let mut best: Option<(usize, usize, usize)> = None;
    for i in 0..entries.len() {
        let first: HashSet<&str> = entries[i].1.iter().map(String::as_str).collect();
        for j in (i + 1)..entries.len() {
            let extra = entries[j]
                .1
                .iter()
                .filter(|name| !first.contains(name.as_str()))
                .count();
            let coverage = first.len() + extra;
            if best.is_none_or(|(_, _, c)| coverage > c) {
                best = Some((i, j, coverage));
            }
        }
    }

    let Some((i, j, coverage)) = best else {
        return Selection::NoResponses;
    };
    tracing::debug!(
        first = %entries[i].0,
        second = %entries[j].0,
        coverage,
        "selected slot pair"
    );
    Selection::Pair(PairPick {
        first: pick(entries[i].0, entries[i].1),
        second: pick(entries[j].0, entries[j].1),
        coverage,
    })
}

fn pick(slot: &SlotKey, attendees: &[String]) -> SlotPick {
    SlotPick {
        slot: slot.clone(),
        attendees: attendees.to_vec(),
    }
}
