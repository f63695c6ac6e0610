use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "orderboard")]
#[command(version, about = "Kanban board for restaurant orders")]
pub struct Cli {
    /// Log handled events and state transitions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding `.orderboard/board.toml` (defaults to the current directory)
    #[arg(long, global = true)]
    pub board_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board seeded from configuration
    Show {
        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a gesture script (TOML or JSON) against the board
    Play {
        /// Path to the script file
        script: PathBuf,

        /// Print steps, changes and the final board as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Print the final document as HTML
        #[arg(long)]
        html: bool,
    },
    /// Print the board document as HTML
    Render {
        /// Replay this gesture script before rendering
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Work with the board through menus
    Interactive,
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default board.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let board_dir = match cli.board_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Show { json } => cmd::cmd_show(&board_dir, *json)?,
        Commands::Play { script, json, html } => cmd::cmd_play(&board_dir, script, *json, *html)?,
        Commands::Render { script } => cmd::cmd_render(&board_dir, script.as_deref())?,
        Commands::Interactive => cmd::cmd_interactive(&board_dir)?,
        Commands::Config { command } => cmd::cmd_config(&board_dir, command.clone())?,
    }

    Ok(())
}
