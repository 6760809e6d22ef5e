//! jotpad: a local note list for the terminal.
//!
//! # Responsibility
//! - Resolve configuration and start logging.
//! - Wire store, repository and view controller explicitly, run the legacy
//!   migration, then hand control to the chosen command.

mod config;
mod shell;
mod startup;
mod terminal;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use config::{AppConfig, ConfigArgs};
use jotpad_core::view::datetime::resolve_locale;
use jotpad_core::{
    init_logging, FileLegacySource, NoteBackend, NoteId, NoteListController, NoteRepository,
};
use log::info;
use shell::{is_yes, Shell};
use std::io::{self, BufRead, Write};

#[derive(Debug, Parser)]
#[command(name = "jotpad", version, about = "Notes kept on this device only")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive session (default).
    Shell,
    /// Save a new note.
    Add {
        text: String,
        /// Timestamp in epoch milliseconds instead of now.
        #[arg(long)]
        at: Option<i64>,
    },
    /// Show the note list, newest first.
    List,
    /// Replace the text and/or time of a note.
    Edit {
        id: NoteId,
        #[arg(long)]
        text: Option<String>,
        /// Local time, YYYY-MM-DDTHH:MM.
        #[arg(long)]
        when: Option<String>,
    },
    /// Delete a note.
    Delete {
        id: NoteId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli.config)?;
    start_logging(&config);

    let conn = startup::open_notes_db(&config.db_path);
    let store = startup::connect_store(&conn);
    if let NoteBackend::Unavailable(reason) = &store {
        eprintln!("jotpad: notes are unavailable, starting with an empty list: {reason}");
    }
    // Legacy notes stay where they are until there is a store to move them to.
    let migrate = store.is_available();
    let repo = NoteRepository::new(store);
    if migrate {
        repo.migrate_legacy_notes(&FileLegacySource::new(&config.legacy_path));
    }

    let mut controller = NoteListController::new(repo, Local, resolve_locale());
    controller.render_notes();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => Shell::new(stdin.lock(), &mut out).run(&mut controller)?,
        Command::Add { text, at } => {
            let id = match at {
                Some(timestamp) => {
                    let id = controller.repository().add_note(text, Some(timestamp));
                    controller.render_notes();
                    id
                }
                None => {
                    controller.set_entry(text);
                    controller.save_new()
                }
            };
            match id {
                Some(id) => writeln!(out, "saved note #{id}")?,
                None => writeln!(out, "note could not be saved; see logs")?,
            }
        }
        Command::List => terminal::print_notes(&mut out, &controller.view())?,
        Command::Edit { id, text, when } => {
            controller.begin_edit(id)?;
            if let Some(text) = text {
                controller.set_draft_text(id, text)?;
            }
            if let Some(when) = when {
                controller.set_draft_timestamp(id, when)?;
            }
            controller.confirm_edit(id)?;
            terminal::print_notes(&mut out, &controller.view())?;
        }
        Command::Delete { id, yes } => {
            let mut input = stdin.lock();
            let mut gate = |prompt: &str| {
                if yes {
                    return true;
                }
                eprint!("{prompt} [y/N] ");
                let mut answer = String::new();
                input.read_line(&mut answer).is_ok() && is_yes(&answer)
            };
            if controller.delete_note(id, &mut gate)? {
                writeln!(out, "deleted note #{id}")?;
            }
        }
    }

    Ok(())
}

fn start_logging(config: &AppConfig) {
    let Some(log_dir) = config.log_dir.to_str() else {
        eprintln!(
            "jotpad: log directory `{}` is not valid UTF-8; logging disabled",
            config.log_dir.display()
        );
        return;
    };
    match init_logging(&config.log_level, log_dir) {
        Ok(()) => info!(
            "event=cli_start module=cli status=ok db_path={} legacy_path={}",
            config.db_path.display(),
            config.legacy_path.display()
        ),
        Err(err) => eprintln!("jotpad: logging disabled: {err}"),
    }
}
