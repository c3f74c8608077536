//! `planner add` command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::task::{format_date, Priority};

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    title: String,

    /// Longer description
    #[arg(short = 'd', long, default_value = "")]
    description: String,

    /// Planned date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// Priority from 1 to 5
    #[arg(short = 'p', long)]
    priority: Option<String>,
}

pub fn run(file: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let mut planner = super::open_planner(file)?;

    let date = args
        .date
        .unwrap_or_else(|| format_date(Local::now().date_naive()));
    let priority = args
        .priority
        .unwrap_or_else(|| Priority::DEFAULT.to_string());

    let id = planner.add_task(&args.title, &args.description, &date, &priority)?;

    if let Some(task) = planner.task_by_id(id) {
        println!("Created: {}", task);
    }
    Ok(())
}
