//! Tests for the coverage index builder.

use slot_engine::error::SlotError;
use slot_engine::index::{build_index, build_index_with, SlotPolicy};
use slot_engine::record::{AvailabilityRecord, Day};

fn rec(name: &str, slots: &[&str]) -> AvailabilityRecord {
    AvailabilityRecord::new(name, slots)
}

#[test]
fn maps_each_slot_to_its_attendees_in_first_appearance_order() {
    let records = vec![
        rec("Cy", &["10:00", "09:00"]),
        rec("Ana", &["09:00"]),
        rec("Bo", &["10:00"]),
    ];
    let index = build_index(&records);

    assert_eq!(index.len(), 2);
    assert_eq!(index.attendees("09:00").unwrap(), ["Cy", "Ana"]);
    assert_eq!(index.attendees("10:00").unwrap(), ["Cy", "Bo"]);
    assert!(index.attendees("11:00").is_none());
}

#[test]
fn iterates_chronologically() {
    let index = build_index(&[rec("A", &["23:30", "00:00", "12:00"])]);
    let keys: Vec<&str> = index.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["00:00", "12:00", "23:30"]);
}

#[test]
fn empty_input_gives_empty_index() {
    assert!(build_index(&[]).is_empty());
}

#[test]
fn empty_times_field_adds_no_key() {
    let index = build_index(&[rec("Ana", &[]), rec("Bo", &["09:00", ""])]);
    assert_eq!(index.len(), 1);
    assert!(index.attendees("").is_none());
}

#[test]
fn permissive_policy_keeps_unknown_tokens_verbatim() {
    let index = build_index(&[rec("Ana", &["09:00", "9am", "03:15"])]);

    assert_eq!(index.len(), 3);
    assert_eq!(index.count("9am"), 1);
    assert_eq!(index.count("03:15"), 1);
}

#[test]
fn strict_policy_skips_and_reports_unknown_tokens() {
    let records = vec![rec("Ana", &["09:00", "9am"]), rec("Bo", &["03:15", "10:30"])];
    let report = build_index_with(&records, SlotPolicy::Strict, Day::One);

    assert_eq!(report.index.len(), 2);
    assert_eq!(report.index.count("09:00"), 1);
    assert_eq!(report.index.count("10:30"), 1);
    assert_eq!(report.rejected.len(), 2);
    assert!(matches!(&report.rejected[0], SlotError::InvalidSlot(t) if t == "9am"));
    assert!(matches!(&report.rejected[1], SlotError::InvalidSlot(t) if t == "03:15"));
}

#[test]
fn indexes_the_requested_day_column() {
    let records = vec![AvailabilityRecord::dual_day("Ana", &["09:00"], &["14:00", "14:30"])];

    let day_two = build_index_with(&records, SlotPolicy::Permissive, Day::Two).index;
    assert_eq!(day_two.len(), 2);
    assert_eq!(day_two.count("14:00"), 1);
    assert_eq!(day_two.count("09:00"), 0);
}

#[test]
fn rebuilding_from_same_records_is_identical() {
    let records = vec![rec("Ana", &["09:00", "zz"]), rec("Bo", &["09:00", "11:30"])];
    assert_eq!(build_index(&records), build_index(&records));
}

#[test]
fn popularity_lists_counts_chronologically() {
    let records = vec![rec("Ana", &["11:00", "09:00"]), rec("Bo", &["09:00"])];
    let counts: Vec<(String, usize)> = build_index(&records)
        .popularity()
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();

    assert_eq!(counts, [("09:00".to_string(), 2), ("11:00".to_string(), 1)]);
}
