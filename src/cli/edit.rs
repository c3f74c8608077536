//! `planner edit` command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::task::{TaskId, TaskPatch};

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    #[arg(value_parser = super::parse_task_id)]
    id: TaskId,

    /// New title
    #[arg(short = 't', long)]
    title: Option<String>,

    /// New description (an empty string clears it)
    #[arg(short = 'd', long)]
    description: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// New priority from 1 to 5
    #[arg(short = 'p', long)]
    priority: Option<String>,
}

impl EditArgs {
    fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            priority: self.priority.clone(),
        }
    }
}

pub fn run(file: Option<PathBuf>, args: EditArgs) -> Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        bail!("Nothing to change. Pass at least one of --title, --description, --date, --priority");
    }

    let mut planner = super::open_planner(file)?;
    planner.edit_task(args.id, &patch)?;

    if let Some(task) = planner.task_by_id(args.id) {
        println!("Updated: {}", task);
    }
    Ok(())
}
