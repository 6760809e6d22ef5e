//! Opens the note store without ever stopping the program.
//!
//! A database that cannot be opened is logged and replaced by
//! `NoteBackend::Unavailable`, so the list still renders (empty) and every
//! later action fails through the usual logged-and-swallowed path.

use jotpad_core::db::open_db;
use jotpad_core::NoteBackend;
use log::error;
use rusqlite::Connection;
use std::path::Path;

/// Opens the notes database, creating its parent directory first.
///
/// Returns a printable reason instead of an error value; the caller only
/// needs it for the fallback store.
pub fn open_notes_db(db_path: &Path) -> Result<Connection, String> {
    if let Some(parent) = db_path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            error!("event=db_open module=cli status=error stage=create_dir error={err}");
            return Err(format!("cannot create `{}`: {err}", parent.display()));
        }
    }

    open_db(db_path).map_err(|err| {
        error!("event=db_open module=cli status=error stage=open error={err}");
        format!("cannot open notes at `{}`: {err}", db_path.display())
    })
}

/// Builds the store over `conn`, falling back to an unavailable store.
pub fn connect_store(conn: &Result<Connection, String>) -> NoteBackend<'_> {
    let store = NoteBackend::connect(conn.as_ref().map_err(String::clone));
    if let NoteBackend::Unavailable(reason) = &store {
        error!("event=store_ready module=cli status=error fallback=unavailable reason={reason}");
    }
    store
}
