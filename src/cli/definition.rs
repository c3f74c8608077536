//! Top-level CLI definition

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::add::AddArgs;
use super::config::ConfigCommands;
use super::edit::EditArgs;
use super::list::ListArgs;
use super::remove::RemoveArgs;
use super::show::ShowArgs;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Personal task planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true, env = "PLANNER_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(AddArgs),

    /// List tasks, optionally filtered and sorted
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show task details
    Show(ShowArgs),

    /// Change fields of an existing task
    Edit(EditArgs),

    /// Remove a task
    #[command(alias = "delete", alias = "rm")]
    Remove(RemoveArgs),

    /// Show or change the planner configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
