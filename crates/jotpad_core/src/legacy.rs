//! Legacy flat-list note storage and its one-way migration source.
//!
//! Older builds kept every note in one JSON array under a single location.
//! On startup the repository drains that location into the note store.
//!
//! # Invariants
//! - An absent location and a literal `null` document both mean "no notes".
//! - Reading never mutates the location; only `clear` removes it.
//! - `clear` on an already-absent location succeeds.
//! - A malformed entry is skipped on its own; the rest of the list still
//!   migrates.

use crate::model::note::{now_epoch_ms, NewNote};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key the legacy flat list was stored under.
pub const LEGACY_NOTES_KEY: &str = "notes";

#[derive(Debug)]
pub enum LegacyError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl Display for LegacyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "legacy notes io error: {err}"),
            Self::Parse(err) => write!(f, "legacy notes are not a valid note list: {err}"),
        }
    }
}

impl Error for LegacyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LegacyError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for LegacyError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// One entry of the legacy flat list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyNote {
    pub text: String,
    pub timestamp: Option<i64>,
}

/// Entry as written by older builds. Both fields may be absent or `null`,
/// and timestamps may carry a fractional part.
#[derive(Debug, Deserialize)]
struct StoredLegacyNote {
    /// Older documents named this field `note`.
    #[serde(default, alias = "note")]
    text: Option<String>,
    #[serde(default)]
    timestamp: Option<Value>,
}

impl From<StoredLegacyNote> for LegacyNote {
    fn from(value: StoredLegacyNote) -> Self {
        let timestamp = value
            .timestamp
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|millis| millis.is_finite())
            .map(|millis| millis.trunc() as i64);
        Self {
            text: value.text.unwrap_or_default(),
            timestamp,
        }
    }
}

impl LegacyNote {
    /// Converts into an insert payload, stamping `now` when no time was kept.
    pub fn into_new_note(self) -> NewNote {
        let timestamp = self.timestamp.unwrap_or_else(now_epoch_ms);
        NewNote::new(self.text, timestamp)
    }
}

/// Where legacy notes are read from and erased after migration.
pub trait LegacyNoteSource {
    /// Returns the raw serialized list, or `None` when nothing is stored.
    fn read_raw(&self) -> Result<Option<String>, LegacyError>;
    /// Erases the stored list.
    fn clear(&self) -> Result<(), LegacyError>;
}

/// Legacy list kept as one JSON file.
#[derive(Debug, Clone)]
pub struct FileLegacySource {
    path: PathBuf,
}

impl FileLegacySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LegacyNoteSource for FileLegacySource {
    fn read_raw(&self) -> Result<Option<String>, LegacyError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&self) -> Result<(), LegacyError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Parses a serialized legacy list.
///
/// Blank input and `null` parse to an empty list. Entries that are not note
/// objects are logged and dropped.
///
/// # Errors
/// - `Parse` when the document is not JSON or not a list.
pub fn parse_legacy_notes(raw: &str) -> Result<Vec<LegacyNote>, LegacyError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Option<Vec<Value>> = serde_json::from_str(raw)?;
    let notes = entries
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| parse_entry(index, entry))
        .collect();
    Ok(notes)
}

fn parse_entry(index: usize, entry: Value) -> Option<LegacyNote> {
    match serde_json::from_value::<StoredLegacyNote>(entry) {
        Ok(stored) => Some(stored.into()),
        Err(err) => {
            warn!("event=legacy_parse module=legacy status=skip index={index} error={err}");
            None
        }
    }
}
