//! Rampart CLI - play a match over the host protocol, or plan a single turn offline.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Rampart - a tower-defense decision engine
#[derive(Parser, Debug)]
#[command(name = "rampart")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level for the engine (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a match on stdin/stdout as the host expects
    Play {
        /// Strategy tuning file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for interceptor placement (default: from config, else random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Decide one turn from saved host messages and print the plan
    Plan {
        /// Turn snapshot (one JSON document)
        #[arg(long, required = true)]
        state: PathBuf,

        /// Host game config (default: built-in sample)
        #[arg(long)]
        game_config: Option<PathBuf>,

        /// Strategy tuning file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for interceptor placement
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Colorize the board
        #[arg(long)]
        color: bool,
    },

    /// Check a strategy tuning file
    Validate {
        /// Strategy file to validate
        #[arg(required = true)]
        config: PathBuf,
    },
}

/// Send logs to stderr; stdout carries the protocol.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("rampart={level}")),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rampart=info"))
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let result = match args.command {
        Commands::Play { config, seed } => cli::play::execute(config, seed),

        Commands::Plan {
            state,
            game_config,
            config,
            seed,
            format,
            color,
        } => cli::plan::execute(state, game_config, config, seed, format, color),

        Commands::Validate { config } => cli::validate::execute(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
