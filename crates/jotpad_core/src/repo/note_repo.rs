//! Note repository over an explicitly injected store.
//!
//! # Invariants
//! - `add_note` without a timestamp stamps the current time.
//! - `edit_note` always replaces text and timestamp together.
//! - Failures degrade: empty lists, `None` ids, logged errors.

use crate::legacy::{parse_legacy_notes, LegacyNoteSource};
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use crate::store::NoteStore;
use log::{debug, error, info, warn};

/// Note use-cases over a store handle owned by the caller's wiring.
pub struct NoteRepository<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists a new note.
    ///
    /// Returns the assigned id, or `None` when the store rejected the write.
    /// A rejected write is logged, never raised.
    pub fn add_note(&self, text: impl Into<String>, timestamp: Option<i64>) -> Option<NoteId> {
        let note = match timestamp {
            Some(timestamp) => NewNote::new(text, timestamp),
            None => NewNote::now(text),
        };
        self.insert(&note)
    }

    /// Returns every stored note in store order, or nothing on failure.
    pub fn list_notes(&self) -> Vec<Note> {
        match self.store.list_records() {
            Ok(notes) => {
                debug!(
                    "event=note_list module=repo status=ok count={}",
                    notes.len()
                );
                notes
            }
            Err(err) => {
                error!("event=note_list module=repo status=error error={err}");
                Vec::new()
            }
        }
    }

    /// Replaces text and timestamp of one note.
    pub fn edit_note(&self, id: NoteId, text: impl Into<String>, timestamp: i64) {
        let patch = NotePatch::replace(text, timestamp);
        match self.store.update_record(id, &patch) {
            Ok(()) => debug!("event=note_edit module=repo status=ok id={id}"),
            Err(err) => error!("event=note_edit module=repo status=error id={id} error={err}"),
        }
    }

    /// Hard-deletes one note. Removing a missing id is silent.
    pub fn remove_note(&self, id: NoteId) {
        match self.store.delete_record(id) {
            Ok(()) => debug!("event=note_remove module=repo status=ok id={id}"),
            Err(err) => error!("event=note_remove module=repo status=error id={id} error={err}"),
        }
    }

    /// Drains the legacy flat list into the store.
    ///
    /// Returns how many legacy notes were written. Safe to call on every
    /// start: with no legacy data it writes nothing. Unreadable or
    /// unparseable legacy data is logged and left where it is.
    pub fn migrate_legacy_notes<L: LegacyNoteSource + ?Sized>(&self, legacy: &L) -> usize {
        let raw = match legacy.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=legacy_migrate module=repo status=skip reason=absent");
                return 0;
            }
            Err(err) => {
                error!("event=legacy_migrate module=repo status=error stage=read error={err}");
                return 0;
            }
        };

        let entries = match parse_legacy_notes(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                error!("event=legacy_migrate module=repo status=error stage=parse error={err}");
                return 0;
            }
        };

        let total = entries.len();
        let migrated = entries
            .into_iter()
            .filter_map(|entry| self.insert(&entry.into_new_note()))
            .count();
        if let Err(err) = legacy.clear() {
            error!("event=legacy_migrate module=repo status=error stage=clear error={err}");
        }

        if migrated == total {
            info!("event=legacy_migrate module=repo status=ok migrated={migrated} total={total}");
        } else {
            warn!(
                "event=legacy_migrate module=repo status=partial migrated={migrated} total={total}"
            );
        }
        migrated
    }

    fn insert(&self, note: &NewNote) -> Option<NoteId> {
        match self.store.create_record(note) {
            Ok(id) => {
                debug!("event=note_add module=repo status=ok id={id}");
                Some(id)
            }
            Err(err) => {
                error!("event=note_add module=repo status=error error={err}");
                None
            }
        }
    }
}
