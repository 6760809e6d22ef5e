//! Note domain model.
//!
//! # Invariants
//! - Every persisted note is identified by a store-assigned `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
