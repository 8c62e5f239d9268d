//! Identity types for notekeep entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Note identifier using UUIDv7 so ids sort by creation time.
pub type NoteId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Explicit rank of a note within the revision ordering.
pub type Rank = i64;

/// Generate a new UUIDv7 note id.
pub fn new_note_id() -> NoteId {
    Uuid::now_v7()
}

/// Current time, truncated to microseconds so values survive a
/// round-trip through Postgres `TIMESTAMPTZ` unchanged.
pub fn now() -> Timestamp {
    let now = Utc::now();
    let micros = now.timestamp_micros();
    DateTime::from_timestamp_micros(micros).unwrap_or(now)
}
