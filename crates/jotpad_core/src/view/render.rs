//! Pure rendering of the note list view-model.

use super::datetime::format_date_label;
use super::state::{NoteItem, NoteViewState};
use crate::model::note::NoteId;
use chrono::{Locale, TimeZone};
use std::fmt::Display;

/// Action control shown on a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Edit,
    Delete,
    Cancel,
    Confirm,
}

/// Header slot: a read-only date label or an editable date-time field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderView {
    DateLabel(String),
    DateTimeField(String),
}

/// Body slot: read-only text or an editable multi-line field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    Text(String),
    TextArea(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub id: NoteId,
    pub header: HeaderView,
    pub body: BodyView,
    pub actions: [NoteAction; 2],
}

/// Renders items in the order given.
pub fn render_items<Tz>(items: &[NoteItem], zone: &Tz, locale: Locale) -> Vec<RenderedNote>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    items
        .iter()
        .map(|item| render_item(item, zone, locale))
        .collect()
}

fn render_item<Tz>(item: &NoteItem, zone: &Tz, locale: Locale) -> RenderedNote
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match &item.state {
        NoteViewState::Display => RenderedNote {
            id: item.id(),
            header: HeaderView::DateLabel(format_date_label(item.note.timestamp, zone, locale)),
            body: BodyView::Text(item.note.text.clone()),
            actions: [NoteAction::Edit, NoteAction::Delete],
        },
        NoteViewState::Editing {
            draft_text,
            draft_timestamp,
        } => RenderedNote {
            id: item.id(),
            header: HeaderView::DateTimeField(draft_timestamp.clone()),
            body: BodyView::TextArea(draft_text.clone()),
            actions: [NoteAction::Cancel, NoteAction::Confirm],
        },
    }
}
