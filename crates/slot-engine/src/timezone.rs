//! Conversion of locally-entered slots to UTC slot identifiers.
//!
//! Participants pick slots on their own wall clock; the store holds UTC. The
//! conversion needs a reference date because a zone's UTC offset depends on it
//! (DST). Zones with a non-half-hour offset produce UTC times off the catalog
//! grid, e.g. "09:00" in Asia/Kathmandu → "03:15"; those are returned as-is.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::catalog::SlotId;
use crate::error::{Result, SlotError};
use crate::record::split_slots;

/// Convert local "HH:MM" slots in `timezone` on date `on` to UTC "HH:MM".
///
/// Empty tokens are skipped. An ambiguous local time (DST fall-back) maps to
/// its earliest instant.
///
/// # Errors
/// - `SlotError::InvalidTimezone` if `timezone` is not an IANA identifier.
/// - `SlotError::InvalidSlot` if a token is not a catalog slot.
/// - `SlotError::NonexistentLocalTime` if a token falls in a DST gap.
pub fn to_utc_slots<S: AsRef<str>>(slots: &[S], timezone: &str, on: NaiveDate) -> Result<Vec<String>> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))?;

    slots
        .iter()
        .map(AsRef::as_ref)
        .filter(|token| !token.is_empty())
        .map(|token| -> Result<String> {
            let slot: SlotId = token.parse()?;
            let time = NaiveTime::from_hms_opt(slot.hour(), slot.minute(), 0)
                .ok_or_else(|| SlotError::InvalidSlot(token.to_string()))?;
            let local = tz
                .from_local_datetime(&on.and_time(time))
                .earliest()
                .ok_or_else(|| SlotError::NonexistentLocalTime {
                    time: token.to_string(),
                    timezone: timezone.to_string(),
                    date: on.to_string(),
                })?;
            Ok(local.with_timezone(&Utc).format("%H:%M").to_string())
        })
        .collect()
}

/// Convert both day columns of a submission, returning comma-joined UTC columns.
///
/// # Errors
/// Same as [`to_utc_slots`].
pub fn convert_days(day1: &str, day2: &str, timezone: &str, on: NaiveDate) -> Result<(String, String)> {
    let day1: Vec<&str> = split_slots(day1).collect();
    let day2: Vec<&str> = split_slots(day2).collect();
    Ok((
        to_utc_slots(&day1, timezone, on)?.join(","),
        to_utc_slots(&day2, timezone, on)?.join(","),
    ))
}
