//! Tests for the dual-day heatmap and the greedy sum-metric selection.

use slot_engine::aggregate::{select_dual_day, DualDaySelection, Heatmap};
use slot_engine::catalog::SlotId;
use slot_engine::record::AvailabilityRecord;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn rec(name: &str, day1: &[&str], day2: &[&str]) -> AvailabilityRecord {
    AvailabilityRecord::dual_day(name, day1, day2)
}

fn slot(s: &str) -> SlotId {
    s.parse().unwrap()
}

fn team() -> Vec<AvailabilityRecord> {
    vec![
        rec("Ana", &["09:00", "10:00"], &["09:00"]),
        rec("Bo", &["09:00"], &[]),
        rec("Cy", &["10:00"], &["10:00", "11:00"]),
        rec("Dee", &[], &["11:00"]),
    ]
}

// ── Heatmap ─────────────────────────────────────────────────────────────────

#[test]
fn heatmap_covers_whole_catalog() {
    let heatmap = Heatmap::build(&team());
    assert_eq!(heatmap.rows().len(), 48);
    assert_eq!(heatmap.rows()[0].slot.to_string(), "00:00");
    assert_eq!(heatmap.row(slot("00:00")).total(), 0);
}

#[test]
fn heatmap_counts_each_day_separately() {
    let heatmap = Heatmap::build(&team());

    let nine = heatmap.row(slot("09:00"));
    assert_eq!((nine.day1, nine.day2, nine.total()), (2, 1, 3));

    let eleven = heatmap.row(slot("11:00"));
    assert_eq!((eleven.day1, eleven.day2, eleven.total()), (0, 2, 2));

    assert_eq!(heatmap.max_total(), 3);
}

#[test]
fn heatmap_ignores_non_catalog_tokens() {
    let heatmap = Heatmap::build(&[rec("Ana", &["03:15", "zz"], &["09:00"])]);
    assert_eq!(heatmap.rows().iter().map(|r| r.total()).sum::<usize>(), 1);
}

#[test]
fn heatmap_counts_repeated_names_as_separate_attendance() {
    let records = vec![rec("Ana", &["09:00"], &[]), rec("Ana", &["09:00"], &[])];
    assert_eq!(Heatmap::build(&records).row(slot("09:00")).day1, 2);
}

#[test]
fn empty_heatmap_has_zero_max() {
    assert_eq!(Heatmap::build(&[]).max_total(), 0);
}

// ── Greedy selection ────────────────────────────────────────────────────────

#[test]
fn picks_highest_total_then_best_for_uncovered_people() {
    let selection = select_dual_day(&team());

    let DualDaySelection::Chosen { first, second } = selection else {
        panic!("expected a selection");
    };
    // 09:00 and 10:00 both total 3; the earlier wins.
    assert_eq!(first.slot, slot("09:00"));
    assert_eq!(first.total, 3);
    assert_eq!(first.attendees, ["Ana", "Bo", "Ana"]);

    // Cy and Dee remain; 10:00 and 11:00 both total 2 for them.
    let second = second.expect("a second time");
    assert_eq!(second.slot, slot("10:00"));
    assert_eq!(second.total, 2);
    assert_eq!(second.attendees, ["Ana", "Cy", "Cy"]);
}

#[test]
fn no_second_time_when_everyone_attends_first() {
    let records = vec![rec("Ana", &["09:00"], &[]), rec("Bo", &["09:00", "10:00"], &[])];

    match select_dual_day(&records) {
        DualDaySelection::Chosen { first, second } => {
            assert_eq!(first.slot, slot("09:00"));
            assert!(second.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn removal_is_by_name_across_submissions() {
    let records = vec![
        rec("Ana", &["09:00"], &[]),
        rec("Ana", &["10:00"], &[]),
        rec("Bo", &["10:00"], &[]),
    ];

    match select_dual_day(&records) {
        DualDaySelection::Chosen { first, second } => {
            assert_eq!(first.slot, slot("10:00"));
            assert_eq!(first.total, 2);
            // Ana's 09:00 submission goes with her other one.
            assert!(second.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn no_records_is_no_responses() {
    assert_eq!(select_dual_day(&[]), DualDaySelection::NoResponses);
}

#[test]
fn only_unknown_tokens_is_no_responses() {
    let records = vec![rec("Ana", &["9am"], &["03:15"])];
    assert_eq!(select_dual_day(&records), DualDaySelection::NoResponses);
}
