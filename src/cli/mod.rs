//! CLI command implementations

pub mod add;
pub mod config;
pub mod definition;
pub mod edit;
pub mod list;
pub mod remove;
pub mod show;

pub use definition::{Cli, Commands};

use anyhow::Result;
use std::path::PathBuf;
use unicode_width::UnicodeWidthChar;

use crate::config::Config;
use crate::planner::Planner;
use crate::task::{Storage, TaskId};

/// Open the planner on the resolved task file with the configured sort order.
/// Load problems are printed as warnings; they never stop the command.
pub fn open_planner(file: Option<PathBuf>) -> Result<Planner> {
    let config = Config::load()?;
    let path = config.tasks_path(file)?;
    let mut planner = Planner::open(Storage::new(path));
    planner.set_sort_order(config.sort.order());

    for warning in planner.load_warnings() {
        eprintln!("Warning: {}", warning);
    }

    Ok(planner)
}

pub fn parse_task_id(s: &str) -> std::result::Result<TaskId, String> {
    TaskId::parse(s).ok_or_else(|| format!("'{}' is not a task ID (expected a number)", s))
}

/// Cut `s` to at most `max` terminal columns, marking the cut with `...`
pub fn truncate(s: &str, max: usize) -> String {
    let s = s.lines().next().unwrap_or("");
    if display_width(s) <= max {
        return s.to_string();
    }

    let budget = if max <= 3 { max } else { max - 3 };
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(c);
        width += w;
    }
    if max > 3 {
        out.push_str("...");
    }
    out
}

/// Left-align `s` in a column of `width` terminal columns
pub fn pad(s: &str, width: usize) -> String {
    let used = display_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}
