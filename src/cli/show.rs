//! `planner show` command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::planner::PlannerError;
use crate::task::{format_date, TaskId};

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID
    #[arg(value_parser = super::parse_task_id)]
    id: TaskId,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(file: Option<PathBuf>, args: ShowArgs) -> Result<()> {
    let planner = super::open_planner(file)?;
    let task = planner
        .task_by_id(args.id)
        .ok_or(PlannerError::NotFound(args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }

    println!("#{} {}", task.id, task.title);
    println!("  Date:     {}", format_date(task.date));
    println!("  Priority: {}", task.priority);
    if !task.description.is_empty() {
        println!("  Description:");
        for line in task.description.lines() {
            println!("    {}", line);
        }
    }

    Ok(())
}
