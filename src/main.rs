//! Task Planner - personal task planner for the terminal

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use task_planner::cli::{self, Cli, Commands};
use task_planner::tui;

fn main() -> Result<()> {
    if std::env::var("PLANNER_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("task_planner=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let file = cli.file;

    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "planner", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Add(args)) => cli::add::run(file, args),
        Some(Commands::List(args)) => cli::list::run(file, args),
        Some(Commands::Show(args)) => cli::show::run(file, args),
        Some(Commands::Edit(args)) => cli::edit::run(file, args),
        Some(Commands::Remove(args)) => cli::remove::run(file, args),
        Some(Commands::Config { command }) => cli::config::run(command),
        None => tui::run(file),
    }
}
