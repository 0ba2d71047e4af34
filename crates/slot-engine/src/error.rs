//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid slot: {0:?} (expected HH:MM on a half hour)")]
    InvalidSlot(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Local time {time} does not exist in {timezone} on {date}")]
    NonexistentLocalTime {
        time: String,
        timezone: String,
        date: String,
    },

    #[error("Participant name must not be empty")]
    EmptyName,

    #[error("Submission for {0:?} contains no slots")]
    NoSlots(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
