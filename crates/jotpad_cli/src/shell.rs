//! Interactive line-based front end for the note list.
//!
//! One command per line. Mutating commands redraw the whole list, mirroring
//! the controller's full re-render.

use crate::terminal::{print_banner, print_notes};
use chrono::TimeZone;
use jotpad_core::{ConfirmGate, NoteId, NoteListController, NoteStore};
use log::warn;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  save [text]        save text (or the entry field) as a new note
  entry <text>       fill the entry field without saving
  list               show the list
  refresh            reload the list from storage
  edit <id>          start editing a note
  text <id> <text>   replace the draft text (use \\n for new lines)
  when <id> <time>   replace the draft time, YYYY-MM-DDTHH:MM
  ok <id>            save the drafts
  cancel <id>        drop the drafts
  delete <id>        delete a note (asks first)
  help               show this help
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Noop,
    Help,
    Quit,
    List,
    Refresh,
    Entry(String),
    Save(Option<String>),
    Edit(NoteId),
    DraftText(NoteId, String),
    DraftTime(NoteId, String),
    Confirm(NoteId),
    Cancel(NoteId),
    Delete(NoteId),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "" => Self::Noop,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "list" | "ls" => Self::List,
            "refresh" => Self::Refresh,
            "entry" => Self::Entry(unescape(rest)),
            "save" | "new" => Self::Save((!rest.is_empty()).then(|| unescape(rest))),
            "edit" => Self::Edit(parse_id(rest)?),
            "text" => {
                let (id, text) = split_id(rest)?;
                Self::DraftText(id, unescape(text))
            }
            "when" => {
                let (id, value) = split_id(rest)?;
                Self::DraftTime(id, value.to_string())
            }
            "ok" | "confirm" => Self::Confirm(parse_id(rest)?),
            "cancel" => Self::Cancel(parse_id(rest)?),
            "delete" | "rm" => Self::Delete(parse_id(rest)?),
            other => return Err(format!("unknown command `{other}`; try `help`")),
        };
        Ok(command)
    }
}

/// Shell bound to an input and an output stream.
///
/// Also serves as the delete confirmation gate, reading the answer from the
/// same input.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until `quit` or end of input.
    pub fn run<S, Tz>(&mut self, controller: &mut NoteListController<S, Tz>) -> io::Result<()>
    where
        S: NoteStore,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        print_banner(&mut self.output)?;
        print_notes(&mut self.output, &controller.view())?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match ShellCommand::parse(&line) {
                Ok(ShellCommand::Quit) => return Ok(()),
                Ok(command) => self.apply(controller, command)?,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    fn apply<S, Tz>(
        &mut self,
        controller: &mut NoteListController<S, Tz>,
        command: ShellCommand,
    ) -> io::Result<()>
    where
        S: NoteStore,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let outcome = match command {
            ShellCommand::Noop | ShellCommand::Quit => return Ok(()),
            ShellCommand::Help => return writeln!(self.output, "{HELP}"),
            ShellCommand::List => Ok(()),
            ShellCommand::Refresh => {
                controller.render_notes();
                Ok(())
            }
            ShellCommand::Entry(text) => {
                controller.set_entry(text);
                return writeln!(self.output, "entry: {}", controller.entry());
            }
            ShellCommand::Save(text) => {
                if let Some(text) = text {
                    controller.set_entry(text);
                }
                controller.save_new();
                Ok(())
            }
            ShellCommand::Edit(id) => controller.begin_edit(id),
            ShellCommand::DraftText(id, text) => controller.set_draft_text(id, text),
            ShellCommand::DraftTime(id, value) => controller.set_draft_timestamp(id, value),
            ShellCommand::Confirm(id) => controller.confirm_edit(id),
            ShellCommand::Cancel(id) => controller.cancel_edit(id),
            ShellCommand::Delete(id) => controller.delete_note(id, self).map(|_| ()),
        };

        if let Err(err) = outcome {
            warn!("event=shell_command module=cli status=rejected error={err}");
            writeln!(self.output, "{err}")?;
        }
        print_notes(&mut self.output, &controller.view())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> ConfirmGate for Shell<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        match self.read_line() {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn parse_id(value: &str) -> Result<NoteId, String> {
    value
        .trim()
        .parse::<NoteId>()
        .map_err(|_| format!("expected a note id, got `{value}`"))
}

fn split_id(rest: &str) -> Result<(NoteId, &str), String> {
    let (id, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((parse_id(id)?, tail.trim_start()))
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}
