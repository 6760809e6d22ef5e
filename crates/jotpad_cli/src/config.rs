//! Runtime configuration for the jotpad host.
//!
//! Precedence per setting: command-line flag, then environment variable,
//! then the platform data directory. Blank values count as unset.

use anyhow::{Context, Result};
use clap::Args;
use directories::ProjectDirs;
use jotpad_core::default_log_level;
use jotpad_core::legacy::LEGACY_NOTES_KEY;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "jotpad.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// SQLite file holding the notes.
    #[arg(long = "db", env = "JOTPAD_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,
    /// Flat JSON list left by older versions; drained on start.
    #[arg(long = "legacy-file", env = "JOTPAD_LEGACY_PATH", global = true)]
    pub legacy_path: Option<PathBuf>,
    /// Directory for rolling log files.
    #[arg(long = "log-dir", env = "JOTPAD_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long = "log-level", env = "JOTPAD_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub legacy_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves settings, falling back to the per-user data directory.
    pub fn resolve(args: &ConfigArgs) -> Result<Self> {
        let data_dir =
            ProjectDirs::from("", "", "jotpad").map(|dirs| dirs.data_dir().to_path_buf());
        Self::resolve_with(args, data_dir.as_deref())
    }

    pub fn resolve_with(args: &ConfigArgs, data_dir: Option<&Path>) -> Result<Self> {
        let db_path = pick_path(args.db_path.as_deref(), data_dir, DB_FILE_NAME)?;
        let legacy_path = pick_path(
            args.legacy_path.as_deref(),
            data_dir,
            &format!("{LEGACY_NOTES_KEY}.json"),
        )?;
        let log_dir = pick_path(args.log_dir.as_deref(), data_dir, LOG_DIR_NAME)?;
        let log_level = args
            .log_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(default_log_level())
            .to_string();

        Ok(Self {
            db_path,
            legacy_path,
            log_dir,
            log_level,
        })
    }
}

fn pick_path(
    explicit: Option<&Path>,
    data_dir: Option<&Path>,
    default_name: &str,
) -> Result<PathBuf> {
    let chosen = match explicit.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => path.to_path_buf(),
        None => data_dir.map(|dir| dir.join(default_name)).with_context(|| {
            format!("no data directory available for `{default_name}`; pass it explicitly")
        })?,
    };
    std::path::absolute(&chosen)
        .with_context(|| format!("cannot resolve path `{}`", chosen.display()))
}
