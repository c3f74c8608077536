//! Task Planner library - task store, CSV persistence, filtering and sorting,
//! plus the CLI and terminal UI shells built on top of them.

pub mod cli;
pub mod config;
pub mod planner;
pub mod task;
pub mod tui;
