//! Repository facade between user actions and the note store.
//!
//! # Responsibility
//! - Expose note use-cases (add/list/edit/remove/migrate) over any `NoteStore`.
//! - Centralize failure handling so callers never see `StoreError`.
//!
//! # Invariants
//! - Every store failure is logged once at `error` level and swallowed.
//! - No operation is retried.

pub mod note_repo;
