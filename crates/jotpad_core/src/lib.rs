//! Core of jotpad, a local note list.
//!
//! Notes live in an on-device SQLite store. The repository is the only path
//! from user actions to that store, and the view controller rebuilds the
//! whole list after every change.

pub mod db;
pub mod legacy;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use legacy::{FileLegacySource, LegacyError, LegacyNote, LegacyNoteSource};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{now_epoch_ms, NewNote, Note, NoteId, NotePatch};
pub use repo::note_repo::NoteRepository;
pub use store::{NoteBackend, NoteStore, SqliteNoteStore, StoreError, StoreResult};
pub use view::{
    BodyView, ConfirmGate, HeaderView, NoteAction, NoteItem, NoteListController, NoteViewState,
    RenderedNote, ViewError,
};
