//! Availability records and the adapter for their stored representation.
//!
//! A record is one submission: a participant name plus the slots they can
//! attend, stored as a comma-joined string per day (`times`, and `times_day2`
//! in the dual-day schema). Names are attendance tokens, not identities: the
//! same name may be submitted any number of times and every submission is kept.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Which day column of a record to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    /// The `times` column (`times_day1` in the dual-day schema).
    #[default]
    One,
    /// The `times_day2` column.
    Two,
}

/// One participant submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub name: String,
    /// IANA zone the participant submitted from. Slots are already UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Comma-joined slot identifiers for the first (or only) day.
    #[serde(alias = "times_day1")]
    pub times: String,
    /// Comma-joined slot identifiers for the second day; empty when unused.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub times_day2: String,
}

impl AvailabilityRecord {
    /// Single-day record from individual slot identifiers.
    pub fn new<S: AsRef<str>>(name: impl Into<String>, slots: &[S]) -> Self {
        Self {
            name: name.into(),
            timezone: None,
            times: join_slots(slots),
            times_day2: String::new(),
        }
    }

    /// Dual-day record from individual slot identifiers.
    pub fn dual_day<S: AsRef<str>, T: AsRef<str>>(
        name: impl Into<String>,
        day1: &[S],
        day2: &[T],
    ) -> Self {
        Self {
            name: name.into(),
            timezone: None,
            times: join_slots(day1),
            times_day2: join_slots(day2),
        }
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Raw comma-joined column for `day`.
    pub fn times_for(&self, day: Day) -> &str {
        match day {
            Day::One => &self.times,
            Day::Two => &self.times_day2,
        }
    }

    /// Slot tokens for `day`, empty tokens removed.
    pub fn slots(&self, day: Day) -> impl Iterator<Item = &str> {
        split_slots(self.times_for(day))
    }

    /// Intake check for a new submission.
    ///
    /// Stored records are never re-validated; indexing consumes them as they are.
    ///
    /// # Errors
    /// `SlotError::EmptyName` for a blank name, `SlotError::NoSlots` when neither
    /// day column contains a slot token.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SlotError::EmptyName);
        }
        if self.slots(Day::One).next().is_none() && self.slots(Day::Two).next().is_none() {
            return Err(SlotError::NoSlots(self.name.clone()));
        }
        Ok(())
    }
}

/// Split a stored comma-joined column into slot tokens.
///
/// Empty tokens are dropped, so `""` yields nothing and `"09:00,,09:30"`
/// yields two tokens. Non-empty tokens are returned verbatim.
pub fn split_slots(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(|token| !token.is_empty())
}

fn join_slots<S: AsRef<str>>(slots: &[S]) -> String {
    slots
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_column_yields_no_tokens() {
        assert_eq!(split_slots("").count(), 0);
        assert_eq!(split_slots(",,").count(), 0);
        assert_eq!(
            split_slots("09:00,,09:30,").collect::<Vec<_>>(),
            ["09:00", "09:30"]
        );
    }

    #[test]
    fn dual_day_schema_deserializes_via_alias() {
        let json = r#"{"name":"Ana","timezone":"UTC","times_day1":"09:00","times_day2":"10:00,10:30"}"#;
        let record: AvailabilityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.times_for(Day::One), "09:00");
        assert_eq!(record.slots(Day::Two).count(), 2);
    }

    #[test]
    fn validate_requires_name_and_a_slot() {
        assert!(matches!(
            AvailabilityRecord::new("  ", &["09:00"]).validate(),
            Err(SlotError::EmptyName)
        ));
        assert!(matches!(
            AvailabilityRecord::new("Bo", &[""]).validate(),
            Err(SlotError::NoSlots(_))
        ));
        let day2_only = AvailabilityRecord::dual_day("Bo", &[] as &[&str], &["10:00"]);
        assert!(day2_only.validate().is_ok());
    }
}
