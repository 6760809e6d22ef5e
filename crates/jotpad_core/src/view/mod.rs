//! Note list view-model, pure rendering and the edit workflow controller.
//!
//! # Responsibility
//! - Hold per-note UI state as an explicit `NoteViewState`.
//! - Render the list as a pure function of that state.
//! - Route user actions (save, edit, confirm, cancel, delete) to the
//!   repository and rebuild the whole list after every mutation.
//!
//! # Invariants
//! - The list is shown in reverse store order (newest insertion first).
//! - Every full render resets all notes to `Display`.

pub mod controller;
pub mod datetime;
pub mod render;
pub mod state;

pub use controller::{ConfirmGate, NoteListController, ViewError, DELETE_PROMPT};
pub use render::{render_items, BodyView, HeaderView, NoteAction, RenderedNote};
pub use state::{NoteItem, NoteViewState};
