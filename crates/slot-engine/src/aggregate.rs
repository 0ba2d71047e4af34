//! Dual-day aggregation: per-slot heatmap counts and the greedy two-time pick.
//!
//! This is a different metric from [`crate::selector`]. Counts here are raw
//! attendance sums: every record contributes once per slot per day it lists,
//! so two submissions under the same name count twice and a record available
//! at a slot on both days counts twice at that slot. Only catalog slots are
//! counted; other tokens are ignored.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{catalog, SlotId, SLOTS_PER_DAY};
use crate::record::{AvailabilityRecord, Day};

/// Attendance counts for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub slot: SlotId,
    pub day1: usize,
    pub day2: usize,
}

impl HeatmapRow {
    pub fn total(&self) -> usize {
        self.day1 + self.day2
    }
}

/// Per-slot attendance over the whole catalog, both days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    rows: Vec<HeatmapRow>,
}

impl Heatmap {
    pub fn build(records: &[AvailabilityRecord]) -> Self {
        let mut rows: Vec<HeatmapRow> = catalog()
            .iter()
            .map(|&slot| HeatmapRow { slot, day1: 0, day2: 0 })
            .collect();

        for m in records.iter().map(RecordMarks::new) {
            for row in &mut rows {
                let i = row.slot.index();
                row.day1 += usize::from(m.day1[i]);
                row.day2 += usize::from(m.day2[i]);
            }
        }

        Self { rows }
    }

    /// One row per catalog slot, chronological.
    pub fn rows(&self) -> &[HeatmapRow] {
        &self.rows
    }

    pub fn row(&self, slot: SlotId) -> HeatmapRow {
        self.rows[slot.index()]
    }

    pub fn max_total(&self) -> usize {
        self.rows.iter().map(HeatmapRow::total).max().unwrap_or(0)
    }
}

/// A slot chosen by [`select_dual_day`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DualDayPick {
    pub slot: SlotId,
    /// Raw attendance sum over both days that won the slot. For the second
    /// time this counts only records not covered by the first time.
    pub total: usize,
    /// Day-1 attendees followed by day-2 attendees, in record order, over all
    /// records (including people already covered by the first time).
    pub attendees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DualDaySelection {
    /// No records, or no record lists a catalog slot.
    NoResponses,
    Chosen {
        first: DualDayPick,
        /// `None` when everyone left over attends the first slot already.
        second: Option<DualDayPick>,
    },
}

/// Greedy two-time selection under the sum metric.
///
/// The first time is the slot with the highest day-1 + day-2 total. Every
/// record whose name attends the first time (on either day) is then removed,
/// and the second time is the slot with the highest total among the remaining
/// records. Both steps take the earliest slot on a tie.
pub fn select_dual_day(records: &[AvailabilityRecord]) -> DualDaySelection {
    let marks: Vec<RecordMarks<'_>> = records.iter().map(RecordMarks::new).collect();

    let Some((first_slot, first_total)) = best_slot(&marks) else {
        return DualDaySelection::NoResponses;
    };
    let first = dual_day_pick(&marks, first_slot, first_total);

    let covered: HashSet<&str> = first.attendees.iter().map(String::as_str).collect();
    let remaining: Vec<RecordMarks<'_>> = marks
        .iter()
        .filter(|m| !covered.contains(m.name))
        .cloned()
        .collect();
    let second = best_slot(&remaining).map(|(slot, total)| dual_day_pick(&marks, slot, total));

    tracing::debug!(
        first = %first.slot,
        second = ?second.as_ref().map(|p| p.slot.to_string()),
        "selected dual-day times"
    );
    DualDaySelection::Chosen { first, second }
}

/// Catalog membership of one record's slots, per day.
#[derive(Clone)]
struct RecordMarks<'a> {
    name: &'a str,
    day1: [bool; SLOTS_PER_DAY],
    day2: [bool; SLOTS_PER_DAY],
}

impl<'a> RecordMarks<'a> {
    fn new(record: &'a AvailabilityRecord) -> Self {
        Self {
            name: &record.name,
            day1: marks(record, Day::One),
            day2: marks(record, Day::Two),
        }
    }

    fn total(&self, slot: usize) -> usize {
        usize::from(self.day1[slot]) + usize::from(self.day2[slot])
    }
}

fn marks(record: &AvailabilityRecord, day: Day) -> [bool; SLOTS_PER_DAY] {
    let mut marks = [false; SLOTS_PER_DAY];
    for slot in record.slots(day).filter_map(|t| t.parse::<SlotId>().ok()) {
        marks[slot.index()] = true;
    }
    marks
}

/// Earliest slot with the highest non-zero total.
fn best_slot(marks: &[RecordMarks<'_>]) -> Option<(SlotId, usize)> {
    let mut best: Option<(SlotId, usize)> = None;
    for &slot in catalog() {
        let total: usize = marks.iter().map(|m| m.total(slot.index())).sum();
        if total > best.map_or(0, |(_, t)| t) {
            best = Some((slot, total));
        }
    }
    best
}

fn dual_day_pick(marks: &[RecordMarks<'_>], slot: SlotId, total: usize) -> DualDayPick {
    let i = slot.index();
    let day1 = marks.iter().filter(|m| m.day1[i]).map(|m| m.name.to_string());
    let day2 = marks.iter().filter(|m| m.day2[i]).map(|m| m.name.to_string());
    DualDayPick {
        slot,
        total,
        attendees: day1.chain(day2).collect(),
    }
}
