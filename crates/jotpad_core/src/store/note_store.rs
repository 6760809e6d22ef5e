//! `NoteStore` trait and its SQLite-backed implementation.
//!
//! # Invariants
//! - `list_records` is a full scan in primary-key (insertion) order.
//! - `delete_record` is idempotent.
//! - `update_record` on a missing id reports `StoreError::NotFound`.
//! - `NoteBackend::Unavailable` fails every call with `StoreError::Unavailable`.

use crate::db::DbError;
use crate::model::note::{NewNote, Note, NoteId, NotePatch};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTES_TABLE: &str = "notes";
const NOTES_COLUMNS: [&str; 3] = ["id", "timestamp", "text"];

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the underlying persistence medium.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// The medium could not be opened at startup.
    Unavailable(String),
    NotFound(NoteId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "note store unavailable: {reason}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for note records.
pub trait NoteStore {
    /// Inserts one record and returns its assigned id.
    fn create_record(&self, note: &NewNote) -> StoreResult<NoteId>;
    /// Returns every record in insertion order.
    fn list_records(&self) -> StoreResult<Vec<Note>>;
    /// Replaces the patched fields of one record.
    fn update_record(&self, id: NoteId, patch: &NotePatch) -> StoreResult<()>;
    /// Removes one record. Missing ids are not an error.
    fn delete_record(&self, id: NoteId) -> StoreResult<()>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn create_record(&self, note: &NewNote) -> StoreResult<NoteId> {
        (**self).create_record(note)
    }

    fn list_records(&self) -> StoreResult<Vec<Note>> {
        (**self).list_records()
    }

    fn update_record(&self, id: NoteId, patch: &NotePatch) -> StoreResult<()> {
        (**self).update_record(id, patch)
    }

    fn delete_record(&self, id: NoteId) -> StoreResult<()> {
        (**self).delete_record(id)
    }
}

/// SQLite-backed note store over a migrated connection.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema was not
    ///   migrated.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn create_record(&self, note: &NewNote) -> StoreResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (timestamp, text) VALUES (?1, ?2);",
            params![note.timestamp, note.text.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_records(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, timestamp, text FROM notes ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn update_record(&self, id: NoteId, patch: &NotePatch) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                text = COALESCE(?2, text),
                timestamp = COALESCE(?3, timestamp)
             WHERE id = ?1;",
            params![id, patch.text.as_deref(), patch.timestamp],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete_record(&self, id: NoteId) -> StoreResult<()> {
        self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        Ok(())
    }
}

/// Store chosen at startup: SQLite when the database opened, otherwise a
/// stand-in that rejects every call so the list still renders empty.
pub enum NoteBackend<'conn> {
    Sqlite(SqliteNoteStore<'conn>),
    Unavailable(String),
}

impl<'conn> NoteBackend<'conn> {
    /// Wraps `conn` in a `SqliteNoteStore`, or returns `Unavailable` with the
    /// reason when there is no connection or its schema is unusable.
    pub fn connect(conn: Result<&'conn Connection, String>) -> Self {
        let store = conn.and_then(|conn| {
            SqliteNoteStore::try_new(conn).map_err(|err| err.to_string())
        });
        match store {
            Ok(store) => Self::Sqlite(store),
            Err(reason) => Self::Unavailable(reason),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Sqlite(_))
    }

    fn unavailable<T>(reason: &str) -> StoreResult<T> {
        Err(StoreError::Unavailable(reason.to_string()))
    }
}

impl NoteStore for NoteBackend<'_> {
    fn create_record(&self, note: &NewNote) -> StoreResult<NoteId> {
        match self {
            Self::Sqlite(store) => store.create_record(note),
            Self::Unavailable(reason) => Self::unavailable(reason),
        }
    }

    fn list_records(&self) -> StoreResult<Vec<Note>> {
        match self {
            Self::Sqlite(store) => store.list_records(),
            Self::Unavailable(reason) => Self::unavailable(reason),
        }
    }

    fn update_record(&self, id: NoteId, patch: &NotePatch) -> StoreResult<()> {
        match self {
            Self::Sqlite(store) => store.update_record(id, patch),
            Self::Unavailable(reason) => Self::unavailable(reason),
        }
    }

    fn delete_record(&self, id: NoteId) -> StoreResult<()> {
        match self {
            Self::Sqlite(store) => store.delete_record(id),
            Self::Unavailable(reason) => Self::unavailable(reason),
        }
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let id: NoteId = row.get("id")?;
    let text: Option<String> = row.get("text")?;
    let text =
        text.ok_or_else(|| StoreError::InvalidData(format!("null text in notes row {id}")))?;

    Ok(Note {
        id,
        text,
        timestamp: row.get("timestamp")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, NOTES_TABLE)? {
        return Err(StoreError::MissingRequiredTable(NOTES_TABLE));
    }

    for column in NOTES_COLUMNS {
        if !table_has_column(conn, NOTES_TABLE, column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: NOTES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
