// MindFrame
// Command line entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mindframe", version, about = "Plan your day on a 15-minute grid")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Task storage file, overriding the configured path
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a new task into a backlog list
    Add(commands::tasks::AddArgs),
    /// Show backlog lists and the day grid
    List,
    /// Change a task's title or priority
    Edit(commands::tasks::EditArgs),
    /// Drop a task onto a section of the grid
    Place(commands::gestures::PlaceArgs),
    /// Move a task back to a backlog list
    Backlog(commands::gestures::BacklogArgs),
    /// Resize a scheduled task
    Resize(commands::gestures::ResizeArgs),
    /// Delete a task
    Remove(commands::gestures::RemoveArgs),
    /// Repair overlapping tasks in every section
    Resolve,
    /// Export scheduled tasks
    Export(commands::export::ExportArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = commands::Session::open(cli.config, cli.data).and_then(|mut session| {
        match cli.command {
            Commands::Add(args) => commands::tasks::add(&mut session, args),
            Commands::List => commands::tasks::list(&session),
            Commands::Edit(args) => commands::tasks::edit(&mut session, args),
            Commands::Place(args) => commands::gestures::place(&mut session, args),
            Commands::Backlog(args) => commands::gestures::backlog(&mut session, args),
            Commands::Resize(args) => commands::gestures::resize(&mut session, args),
            Commands::Remove(args) => commands::gestures::remove(&mut session, args),
            Commands::Resolve => commands::tasks::resolve(&mut session),
            Commands::Export(args) => commands::export::run(&session, args),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
