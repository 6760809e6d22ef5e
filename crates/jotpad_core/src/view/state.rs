//! Per-note view state.

use crate::model::note::{Note, NoteId};

/// UI state of one list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteViewState {
    Display,
    Editing {
        draft_text: String,
        /// Date-time field value (`YYYY-MM-DDTHH:MM`, viewer's zone).
        draft_timestamp: String,
    },
}

/// Render-local copy of a note plus its UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub note: Note,
    pub state: NoteViewState,
}

impl NoteItem {
    pub fn displayed(note: Note) -> Self {
        Self {
            note,
            state: NoteViewState::Display,
        }
    }

    pub fn id(&self) -> NoteId {
        self.note.id
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, NoteViewState::Editing { .. })
    }
}
