//! Note list controller: entry field, list state and the edit workflow.
//!
//! # Invariants
//! - Mutations go through `NoteRepository`, then the list is fully rebuilt
//!   from a fresh `list_notes` call.
//! - Edit and delete start only from `Display`; confirm and cancel only from
//!   `Editing`.
//! - Several notes may be in `Editing` at once.

use super::datetime::{parse_datetime_local, to_datetime_local};
use super::render::{render_items, RenderedNote};
use super::state::{NoteItem, NoteViewState};
use crate::model::note::NoteId;
use crate::repo::note_repo::NoteRepository;
use crate::store::NoteStore;
use chrono::{Locale, TimeZone};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this note?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// No list item currently shows this note.
    NoteNotRendered(NoteId),
    /// Action requires the note to be in `Editing`.
    NotEditing(NoteId),
    /// Action requires the note to be in `Display`.
    NotInDisplay(NoteId),
    /// The date-time field does not hold a usable local time.
    InvalidDateTime(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotRendered(id) => write!(f, "note {id} is not in the list"),
            Self::NotEditing(id) => write!(f, "note {id} is not being edited"),
            Self::NotInDisplay(id) => write!(f, "note {id} is being edited"),
            Self::InvalidDateTime(value) => {
                write!(f, "invalid date-time `{value}`; expected YYYY-MM-DDTHH:MM")
            }
        }
    }
}

impl Error for ViewError {}

/// Blocking yes/no gate used before destructive actions.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> ConfirmGate for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// View controller for one note list.
///
/// `zone` is the viewer's time zone used for labels and date-time fields.
pub struct NoteListController<S: NoteStore, Tz: TimeZone> {
    repo: NoteRepository<S>,
    zone: Tz,
    locale: Locale,
    entry: String,
    items: Vec<NoteItem>,
}

impl<S, Tz> NoteListController<S, Tz>
where
    S: NoteStore,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Creates a controller with an empty entry field and an empty list.
    ///
    /// Call `render_notes` to load the list.
    pub fn new(repo: NoteRepository<S>, zone: Tz, locale: Locale) -> Self {
        Self {
            repo,
            zone,
            locale,
            entry: String::new(),
            items: Vec::new(),
        }
    }

    pub fn repository(&self) -> &NoteRepository<S> {
        &self.repo
    }

    pub fn items(&self) -> &[NoteItem] {
        &self.items
    }

    pub fn item(&self, id: NoteId) -> Option<&NoteItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn set_entry(&mut self, text: impl Into<String>) {
        self.entry = text.into();
    }

    /// Current list as render output.
    pub fn view(&self) -> Vec<RenderedNote> {
        render_items(&self.items, &self.zone, self.locale)
    }

    /// Re-fetches every note and rebuilds the list, newest insertion first.
    ///
    /// Order follows the store, not `timestamp`: editing a timestamp changes
    /// a note's label but never its position.
    pub fn render_notes(&mut self) {
        let mut notes = self.repo.list_notes();
        notes.reverse();
        self.items = notes.into_iter().map(NoteItem::displayed).collect();
        debug!(
            "event=render_notes module=view status=ok count={}",
            self.items.len()
        );
    }

    /// Saves the entry field as a new note stamped now, clears the field and
    /// rebuilds the list.
    pub fn save_new(&mut self) -> Option<NoteId> {
        let text = std::mem::take(&mut self.entry);
        let id = self.repo.add_note(text, None);
        self.render_notes();
        id
    }

    /// Switches a note to `Editing`, pre-filled with its text and local time.
    pub fn begin_edit(&mut self, id: NoteId) -> Result<(), ViewError> {
        let zone = self.zone.clone();
        let item = self.item_mut(id)?;
        if item.is_editing() {
            return Err(ViewError::NotInDisplay(id));
        }
        item.state = NoteViewState::Editing {
            draft_text: item.note.text.clone(),
            draft_timestamp: to_datetime_local(item.note.timestamp, &zone),
        };
        Ok(())
    }

    pub fn set_draft_text(&mut self, id: NoteId, text: impl Into<String>) -> Result<(), ViewError> {
        let (draft_text, _) = self.drafts_mut(id)?;
        *draft_text = text.into();
        Ok(())
    }

    pub fn set_draft_timestamp(
        &mut self,
        id: NoteId,
        value: impl Into<String>,
    ) -> Result<(), ViewError> {
        let (_, draft_timestamp) = self.drafts_mut(id)?;
        *draft_timestamp = value.into();
        Ok(())
    }

    /// Persists the drafts of an `Editing` note and rebuilds the list.
    ///
    /// An unparseable date-time leaves the note in `Editing` untouched.
    pub fn confirm_edit(&mut self, id: NoteId) -> Result<(), ViewError> {
        let zone = self.zone.clone();
        let (draft_text, draft_timestamp) = self.drafts_mut(id)?;
        let timestamp = parse_datetime_local(draft_timestamp, &zone)?;
        let text = draft_text.clone();

        self.repo.edit_note(id, text, timestamp);
        self.render_notes();
        Ok(())
    }

    /// Drops the drafts of an `Editing` note and rebuilds the list.
    pub fn cancel_edit(&mut self, id: NoteId) -> Result<(), ViewError> {
        self.drafts_mut(id)?;
        self.render_notes();
        Ok(())
    }

    /// Deletes a `Display` note after the gate approves.
    ///
    /// Returns whether the note was removed; a rejected prompt changes
    /// nothing.
    pub fn delete_note<G: ConfirmGate + ?Sized>(
        &mut self,
        id: NoteId,
        gate: &mut G,
    ) -> Result<bool, ViewError> {
        if self.item_mut(id)?.is_editing() {
            return Err(ViewError::NotInDisplay(id));
        }
        if !gate.confirm(DELETE_PROMPT) {
            debug!("event=note_delete module=view status=cancelled id={id}");
            return Ok(false);
        }

        self.repo.remove_note(id);
        self.render_notes();
        Ok(true)
    }

    fn item_mut(&mut self, id: NoteId) -> Result<&mut NoteItem, ViewError> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(ViewError::NoteNotRendered(id))
    }

    fn drafts_mut(&mut self, id: NoteId) -> Result<(&mut String, &mut String), ViewError> {
        match &mut self.item_mut(id)?.state {
            NoteViewState::Editing {
                draft_text,
                draft_timestamp,
            } => Ok((draft_text, draft_timestamp)),
            NoteViewState::Display => Err(ViewError::NotEditing(id)),
        }
    }
}
