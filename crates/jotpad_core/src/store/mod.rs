//! Note store contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Own durable persistence and id assignment for note records.
//! - Keep SQL details behind the `NoteStore` trait.
//!
//! # Invariants
//! - Every mutation touches exactly one record.
//! - Store failures are reported as `StoreError`; recovery policy lives in
//!   the repository layer.

pub mod note_store;

pub use note_store::{NoteBackend, NoteStore, SqliteNoteStore, StoreError, StoreResult};
