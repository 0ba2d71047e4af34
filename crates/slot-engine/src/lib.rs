//! # slot-engine
//!
//! Picks meeting times from half-hour availability submissions.
//!
//! Participants submit the UTC half-hour slots they can attend. The engine
//! builds a coverage index (slot → attendee names) from the full record set and
//! selects either the single most-attended slot or the pair of slots whose
//! combined attendee union is largest. Iteration is always chronological, so
//! ties resolve to the earliest slot (or earliest pair) and results are
//! reproducible.
//!
//! ## Modules
//!
//! - [`catalog`] — the 48 "HH:MM" UTC slots of a day and the index key type
//! - [`record`] — availability records and the comma-joined input adapter
//! - [`index`] — coverage index builder (permissive or strict slot policy)
//! - [`selector`] — single-slot and two-slot selection
//! - [`aggregate`] — dual-day heatmap and the sum-of-counts greedy selection
//! - [`timezone`] — local-time submissions → UTC slot identifiers
//! - [`store`] — record store trait with in-memory and JSON file backends
//! - [`error`] — Error types

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod index;
pub mod record;
pub mod selector;
pub mod store;
pub mod timezone;

pub use aggregate::{select_dual_day, DualDaySelection, Heatmap};
pub use catalog::{catalog, SlotId, SlotKey, SLOTS_PER_DAY};
pub use error::SlotError;
pub use index::{build_index, build_index_with, CoverageIndex, IndexReport, SlotPolicy};
pub use record::{split_slots, AvailabilityRecord, Day};
pub use selector::{select_best, select_pair, select_single, PairPick, Selection, SelectionMode, SlotPick};
pub use store::{load_records, JsonFileStore, MemoryStore, RecordStore};
pub use timezone::{convert_days, to_utc_slots};
