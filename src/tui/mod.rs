//! Terminal User Interface module

mod app;
mod components;
pub mod dialogs;
mod home;
mod styles;

pub use app::*;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use tracing::warn;

use crate::config::Config;
use crate::planner::Planner;
use crate::task::Storage;

pub fn run(file: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let path = config.tasks_path(file)?;
    let mut planner = Planner::open(Storage::new(path));
    planner.set_sort_order(config.sort.order());

    // Shown in the status line once the screen is up
    for warning in planner.load_warnings() {
        warn!("{}", warning);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(planner);
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
