//! `planner config` subcommands implementation

use anyhow::{bail, Result};
use clap::Subcommand;
use std::path::Path;

use super::list::SortArg;
use crate::config::{save_config, Config};
use crate::planner::{SortDirection, SortKey};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the task file and sort order in use
    Show,

    /// Store a task file location in the config
    SetFile {
        /// Path to the task file; `~/` is expanded when the file is opened
        path: String,
    },

    /// Go back to the default task file in the app directory
    ResetFile,

    /// Set the sort order tasks start with
    SetSort {
        #[arg(value_enum)]
        key: SortArg,

        /// Sort in descending order
        #[arg(long)]
        desc: bool,
    },
}

pub fn run(command: Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => show(),
        Some(ConfigCommands::SetFile { path }) => set_file(&path),
        Some(ConfigCommands::ResetFile) => reset_file(),
        Some(ConfigCommands::SetSort { key, desc }) => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            set_sort(key.into(), direction)
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    let path = config.tasks_path(None)?;
    let source = if config.storage.path.is_some() {
        "config"
    } else {
        "default"
    };

    println!("Task file: {} ({})", path.display(), source);
    println!("Sort:      {}", config.sort.order());
    Ok(())
}

fn set_file(path: &str) -> Result<()> {
    let path = path.trim();
    if path.is_empty() {
        bail!("Task file path cannot be empty");
    }

    // Relative paths would depend on where the planner is started from
    let stored = if path.starts_with("~/") || Path::new(path).is_absolute() {
        path.to_string()
    } else {
        std::path::absolute(path)?.to_string_lossy().into_owned()
    };

    let mut config = Config::load()?;
    config.storage.path = Some(stored.clone());
    save_config(&config)?;
    println!("✓ Task file set to {}", stored);
    Ok(())
}

fn reset_file() -> Result<()> {
    let mut config = Config::load()?;
    config.storage.path = None;
    save_config(&config)?;
    println!("✓ Task file reset to {}", config.tasks_path(None)?.display());
    Ok(())
}

fn set_sort(key: SortKey, direction: SortDirection) -> Result<()> {
    let mut config = Config::load()?;
    config.sort.key = key;
    config.sort.direction = direction;
    save_config(&config)?;
    println!("✓ Tasks now start sorted by {}", config.sort.order());
    Ok(())
}
