mod commands;
mod config;
mod gateway;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, drag, init, moves, step, CheckArgs, DragArgs, InitArgs, MovesArgs, StepArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Outline CLI - reorder course sections, subsections and units
#[derive(Parser, Debug)]
#[command(name = "outline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config and a sample outline
    Init(InitArgs),

    /// Validate the outline file
    Check(CheckArgs),

    /// Move a node one position up or down
    Step(StepArgs),

    /// Drag a node onto another node
    Drag(DragArgs),

    /// Show where a node may move
    Moves(MovesArgs),
}

fn init_tracing(cwd: &str) {
    let default_filter = Config::load(cwd)
        .map(|config| config.log_filter)
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };
    init_tracing(&cwd);

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Check(args) => check(args, &cwd).await,
        Command::Step(args) => step(args, &cwd).await,
        Command::Drag(args) => drag(args, &cwd).await,
        Command::Moves(args) => moves(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
