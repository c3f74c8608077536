//! `planner list` command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use super::{pad, truncate};
use crate::planner::{FilterInput, Planner, SortDirection, SortKey, SortOrder};
use crate::task::{format_date, Task};

const TABLE_COL_ID: usize = 5;
const TABLE_COL_TITLE: usize = 24;
const TABLE_COL_DESCRIPTION: usize = 32;
const TABLE_COL_DATE: usize = 10;

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum SortArg {
    Date,
    Priority,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Priority => SortKey::Priority,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Lowest priority to include
    #[arg(long)]
    min_priority: Option<String>,

    /// Highest priority to include
    #[arg(long)]
    max_priority: Option<String>,

    /// Only tasks whose title contains this text (case-insensitive)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Sort key (defaults to the configured one)
    #[arg(short = 's', long, value_enum)]
    sort: Option<SortArg>,

    /// Sort in descending order
    #[arg(long)]
    desc: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn filter_input(&self) -> FilterInput {
        FilterInput {
            min_date: self.from.clone().unwrap_or_default(),
            max_date: self.to.clone().unwrap_or_default(),
            min_priority: self.min_priority.clone().unwrap_or_default(),
            max_priority: self.max_priority.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
        }
    }

    fn sort_order(&self, configured: SortOrder) -> SortOrder {
        let key = self.sort.map(SortKey::from).unwrap_or(configured.key);
        let direction = if self.desc {
            SortDirection::Descending
        } else if self.sort.is_some() {
            SortDirection::Ascending
        } else {
            configured.direction
        };
        SortOrder::new(key, direction)
    }
}

fn print_table_header() {
    println!(
        "{} {} {} {} PRI",
        pad("ID", TABLE_COL_ID),
        pad("TITLE", TABLE_COL_TITLE),
        pad("DESCRIPTION", TABLE_COL_DESCRIPTION),
        pad("DATE", TABLE_COL_DATE),
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_ID + TABLE_COL_TITLE + TABLE_COL_DESCRIPTION + TABLE_COL_DATE + 8)
    );
}

fn print_table_row(task: &Task) {
    println!(
        "{} {} {} {} {}",
        pad(&task.id.to_string(), TABLE_COL_ID),
        pad(&truncate(&task.title, TABLE_COL_TITLE), TABLE_COL_TITLE),
        pad(
            &truncate(&task.description, TABLE_COL_DESCRIPTION),
            TABLE_COL_DESCRIPTION
        ),
        pad(&format_date(task.date), TABLE_COL_DATE),
        task.priority,
    );
}

pub fn run(file: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let mut planner = super::open_planner(file)?;
    apply_args(&mut planner, &args)?;
    let tasks = planner.filtered_tasks();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if planner.tasks().is_empty() {
        println!("No tasks yet. Add one with 'planner add <TITLE>'.");
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks match the filter ({}).", planner.filter().summary());
        return Ok(());
    }

    print_table_header();
    for task in &tasks {
        print_table_row(task);
    }

    let (first, last) = planner.date_bounds();
    println!();
    if planner.filter().is_active() {
        println!("Filter: {}", planner.filter().summary());
    }
    println!("Sorted by: {}", planner.sort_order());
    println!("Dates: {} .. {}", format_date(first), format_date(last));
    println!("Total: {} of {} tasks", tasks.len(), planner.tasks().len());

    Ok(())
}

/// Apply the filter and sort order requested on the command line
fn apply_args(planner: &mut Planner, args: &ListArgs) -> Result<()> {
    planner.set_filter(&args.filter_input())?;
    let order = args.sort_order(planner.sort_order());
    planner.set_sort_order(order);
    planner.sort_tasks_by_key();
    Ok(())
}
