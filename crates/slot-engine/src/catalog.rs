//! The fixed catalog of half-hour UTC slots and the key type used by indices.
//!
//! A day has exactly [`SLOTS_PER_DAY`] slots, "00:00" through "23:30". Stored
//! submissions are not guaranteed to contain only catalog values, so indices
//! are keyed by [`SlotKey`], which carries the raw token and orders catalog
//! slots chronologically ahead of any unrecognised token.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Number of half-hour slots in a day.
pub const SLOTS_PER_DAY: usize = 48;

/// A validated half-hour slot, "HH:MM" in UTC with MM ∈ {00, 30}.
///
/// Internally the position in the day (0 = "00:00", 47 = "23:30"), so the
/// derived ordering is time-of-day ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotId(u8);

impl SlotId {
    /// Build a slot from an hour and a minute.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSlot` unless `hour < 24` and `minute` is 0 or 30.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour < 24 && (minute == 0 || minute == 30) {
            Ok(Self((hour * 2 + minute / 30) as u8))
        } else {
            Err(SlotError::InvalidSlot(format!("{hour:02}:{minute:02}")))
        }
    }

    /// Slot at position `index` of the day, if `index < 48`.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SLOTS_PER_DAY).then(|| Self(index as u8))
    }

    /// Position of this slot in the day, 0..48.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 2)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 2) * 30
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotId {
    type Err = SlotError;

    /// Strict parse: exactly two hour digits, ':', two minute digits.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidSlot(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let hour: u32 = s[..2].parse().map_err(|_| invalid())?;
        let minute: u32 = s[3..].parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for SlotId {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> Self {
        slot.to_string()
    }
}

/// All 48 slots of a day in chronological order.
pub fn catalog() -> &'static [SlotId; SLOTS_PER_DAY] {
    static CATALOG: OnceLock<[SlotId; SLOTS_PER_DAY]> = OnceLock::new();
    CATALOG.get_or_init(|| std::array::from_fn(|i| SlotId(i as u8)))
}

/// Index key: a raw slot token plus its catalog slot, when it is one.
///
/// Ordering puts catalog slots first in time-of-day order, followed by
/// non-catalog tokens in lexicographic order. Equality and hashing use the raw
/// token; catalog tokens parse strictly, so equal catalog slots always have
/// equal raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SlotKey {
    raw: String,
    slot: Option<SlotId>,
}

impl SlotKey {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let slot = raw.parse().ok();
        Self { raw, slot }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The catalog slot for this key, or `None` for an unrecognised token.
    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    pub fn is_catalog(&self) -> bool {
        self.slot.is_some()
    }
}

impl From<SlotId> for SlotKey {
    fn from(slot: SlotId) -> Self {
        Self {
            raw: slot.to_string(),
            slot: Some(slot),
        }
    }
}

impl From<&str> for SlotKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SlotKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<SlotKey> for String {
    fn from(key: SlotKey) -> Self {
        key.raw
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for SlotKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SlotKey {}

impl Hash for SlotKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for SlotKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.slot, other.slot) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for SlotKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_chronological_and_complete() {
        let slots = catalog();
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[0].to_string(), "00:00");
        assert_eq!(slots[1].to_string(), "00:30");
        assert_eq!(slots[47].to_string(), "23:30");
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parse_rejects_off_grid_and_malformed() {
        for bad in ["", "9:00", "09:15", "24:00", "09-00", "0900", " 09:00", "ab:cd", "+9:00"] {
            assert!(bad.parse::<SlotId>().is_err(), "{bad:?} should not parse");
        }
        assert_eq!("13:30".parse::<SlotId>().unwrap().index(), 27);
    }

    #[test]
    fn unknown_keys_sort_after_catalog() {
        let mut keys = vec![
            SlotKey::new("zz"),
            SlotKey::new("23:30"),
            SlotKey::new("03:15"),
            SlotKey::new("00:00"),
        ];
        keys.sort();
        let raw: Vec<&str> = keys.iter().map(SlotKey::as_str).collect();
        assert_eq!(raw, ["00:00", "23:30", "03:15", "zz"]);
    }
}
