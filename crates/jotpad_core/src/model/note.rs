//! Note record and write payloads.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never reused.
//! - `timestamp` is epoch milliseconds and is independent of `id` order.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Monotonically increasing for one store.
pub type NoteId = i64;

/// One persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Free-form user text. No length or format constraint.
    pub text: String,
    /// Unix epoch milliseconds. Creation time unless edited.
    pub timestamp: i64,
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub text: String,
    pub timestamp: i64,
}

impl NewNote {
    pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }

    /// Creates a payload stamped with the current wall-clock time.
    pub fn now(text: impl Into<String>) -> Self {
        Self::new(text, now_epoch_ms())
    }
}

/// Field replacement payload for an existing note.
///
/// `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub text: Option<String>,
    pub timestamp: Option<i64>,
}

impl NotePatch {
    /// Patch that replaces both fields.
    pub fn replace(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: Some(text.into()),
            timestamp: Some(timestamp),
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
