//! `planner remove` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::task::TaskId;

#[derive(Args)]
pub struct RemoveArgs {
    /// Task ID
    #[arg(value_parser = super::parse_task_id)]
    id: TaskId,
}

pub fn run(file: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let mut planner = super::open_planner(file)?;
    let removed = planner.delete_task(args.id)?;
    println!("Removed: {}", removed);
    Ok(())
}
