//! Text rendering of selections, heatmaps, and record listings.

use std::fmt::Write;

use slot_engine::aggregate::{DualDayPick, DualDaySelection, Heatmap};
use slot_engine::record::{AvailabilityRecord, Day};
use slot_engine::selector::{Selection, SlotPick};

pub const NO_RESPONSES: &str = "No responses available yet.";
pub const NO_SECOND_TIME: &str = "No second optimal time found.";

pub fn day_number(day: Day) -> u8 {
    match day {
        Day::One => 1,
        Day::Two => 2,
    }
}

/// Records exist but none lists a slot on `day`.
pub fn no_availability(day: Day, records: usize) -> String {
    let other = match day {
        Day::One => 2,
        Day::Two => 1,
    };
    format!(
        "No availability submitted for day {} yet ({records} record(s) stored; try --day {other} or --mode dual-day).",
        day_number(day)
    )
}

/// Render a single- or two-slot selection.
///
/// `want_pair` distinguishes a single-mode result from the pair-mode fallback
/// for an index with only one slot.
pub fn selection(selection: &Selection, want_pair: bool) -> String {
    let mut out = String::new();
    match selection {
        Selection::NoResponses => out.push_str(NO_RESPONSES),
        Selection::Single(pick) if !want_pair => {
            slot_block(&mut out, "Best Meeting Time", pick);
        }
        Selection::Single(pick) => {
            slot_block(&mut out, "Best Meeting Time #1", pick);
            out.push('\n');
            out.push_str(NO_SECOND_TIME);
        }
        Selection::Pair(pair) => {
            slot_block(&mut out, "Best Meeting Time #1", &pair.first);
            out.push('\n');
            slot_block(&mut out, "Best Meeting Time #2", &pair.second);
            let _ = write!(out, "\nCoverage: {} participants", pair.coverage);
        }
    }
    out
}

pub fn dual_day(selection: &DualDaySelection) -> String {
    let mut out = String::new();
    match selection {
        DualDaySelection::NoResponses => out.push_str(NO_RESPONSES),
        DualDaySelection::Chosen { first, second } => {
            dual_day_block(&mut out, "Best Meeting Time #1", first, "across both days");
            out.push('\n');
            match second {
                Some(pick) => dual_day_block(
                    &mut out,
                    "Best Meeting Time #2",
                    pick,
                    "across both days from people not covered by #1",
                ),
                None => out.push_str(NO_SECOND_TIME),
            }
        }
    }
    out
}

/// One line per catalog slot: counts for each day, the total, and a bar.
pub fn heatmap(heatmap: &Heatmap) -> String {
    let mut out = String::from("UTC     Day 1  Day 2  Total\n");
    for row in heatmap.rows() {
        let _ = writeln!(
            out,
            "{}  {:>5}  {:>5}  {:>5}  {}",
            row.slot,
            row.day1,
            row.day2,
            row.total(),
            "#".repeat(row.total())
        );
    }
    out
}

pub fn records(records: &[AvailabilityRecord]) -> String {
    if records.is_empty() {
        return format!("{NO_RESPONSES}\n");
    }
    let mut out = String::new();
    for record in records {
        let _ = write!(out, "{}: {}", record.name, record.times);
        if !record.times_day2.is_empty() {
            let _ = write!(out, " | day 2: {}", record.times_day2);
        }
        if let Some(tz) = &record.timezone {
            let _ = write!(out, " ({tz})");
        }
        out.push('\n');
    }
    out
}

fn slot_block(out: &mut String, title: &str, pick: &SlotPick) {
    let _ = writeln!(out, "{title}: {} UTC", pick.slot);
    let _ = writeln!(out, "Attendees: {}", pick.attendees.join(", "));
}

fn dual_day_block(out: &mut String, title: &str, pick: &DualDayPick, counted: &str) {
    let _ = writeln!(out, "{title}: {} UTC ({} {counted})", pick.slot, pick.total);
    let _ = writeln!(out, "Attendees: {}", pick.attendees.join(", "));
}
