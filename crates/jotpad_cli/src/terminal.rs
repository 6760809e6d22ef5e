//! Plain-text drawing of the rendered note list.

use jotpad_core::{BodyView, HeaderView, NoteAction, RenderedNote};
use std::io::{self, Write};

pub const TITLE: &str = "Just enter some notes";
pub const SUBTITLE: &str = "They are stored on your device, no information is sent anywhere";
const EMPTY_LIST: &str = "(no notes yet)";

pub fn print_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{SUBTITLE}")?;
    writeln!(out)
}

/// Writes every note: header line with actions, then the indented body.
pub fn print_notes(out: &mut impl Write, notes: &[RenderedNote]) -> io::Result<()> {
    if notes.is_empty() {
        return writeln!(out, "{EMPTY_LIST}");
    }

    for note in notes {
        let header = match &note.header {
            HeaderView::DateLabel(label) => label.clone(),
            HeaderView::DateTimeField(value) => format!("when: {value}"),
        };
        let actions = note
            .actions
            .iter()
            .map(|action| format!("[{}]", action_label(*action)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "#{}  {header}  {actions}", note.id)?;

        let (prefix, body) = match &note.body {
            BodyView::Text(text) => ("    ", text),
            BodyView::TextArea(text) => ("  | ", text),
        };
        for line in body.split('\n') {
            writeln!(out, "{prefix}{line}")?;
        }
    }
    Ok(())
}

fn action_label(action: NoteAction) -> &'static str {
    match action {
        NoteAction::Edit => "edit",
        NoteAction::Delete => "delete",
        NoteAction::Cancel => "cancel",
        NoteAction::Confirm => "save",
    }
}

#[cfg(test)]
mod tests {
    use super::print_notes;
    use jotpad_core::{BodyView, HeaderView, NoteAction, RenderedNote};

    fn draw(notes: &[RenderedNote]) -> String {
        let mut out = Vec::new();
        print_notes(&mut out, notes).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(draw(&[]), "(no notes yet)\n");
    }

    #[test]
    fn display_and_editing_items_are_drawn_differently() {
        let notes = vec![
            RenderedNote {
                id: 2,
                header: HeaderView::DateTimeField("2023-11-14T22:13".to_string()),
                body: BodyView::TextArea("draft".to_string()),
                actions: [NoteAction::Cancel, NoteAction::Confirm],
            },
            RenderedNote {
                id: 1,
                header: HeaderView::DateLabel("Tue, Nov 14, 22:13".to_string()),
                body: BodyView::Text("Buy milk\nand eggs".to_string()),
                actions: [NoteAction::Edit, NoteAction::Delete],
            },
        ];

        assert_eq!(
            draw(&notes),
            "#2  when: 2023-11-14T22:13  [cancel] [save]\n  | draft\n\
             #1  Tue, Nov 14, 22:13  [edit] [delete]\n    Buy milk\n    and eggs\n"
        );
    }
}
