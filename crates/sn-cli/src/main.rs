//! CLI host for the Slasher Night story engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slasher",
    about = "Slasher Night: a story clock that gets scarier after dark",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive night (type 'help' at the prompt)
    Play {
        /// Built-in scenario: lake-house, farmhouse
        #[arg(long, default_value = "lake-house")]
        scenario: String,

        /// RNG seed for a reproducible night (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON settings file to restore from and save to
        #[arg(long)]
        settings: Option<PathBuf>,

        /// JSON file with event windows replacing the scenario's
        #[arg(short, long)]
        windows: Option<PathBuf>,
    },

    /// Simulate a night without interaction
    Run {
        /// Comma-separated character names
        #[arg(short, long)]
        characters: String,

        /// Number of messages to simulate
        #[arg(short, long, default_value = "24")]
        ticks: u64,

        /// Make someone disappear every N messages
        #[arg(short, long)]
        kill_every: Option<u64>,

        /// Built-in scenario: lake-house, farmhouse
        #[arg(long, default_value = "lake-house")]
        scenario: String,

        /// RNG seed for a reproducible night (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file with event windows replacing the scenario's
        #[arg(short, long)]
        windows: Option<PathBuf>,

        /// Show every clock step, not just events
        #[arg(short, long)]
        verbose: bool,
    },

    /// Format minutes since midnight as a 12-hour clock time
    Time {
        /// Minutes since midnight (values past 1440 wrap)
        minutes: u32,
    },

    /// List built-in scenarios and their event windows
    Scenarios,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            scenario,
            seed,
            settings,
            windows,
        } => commands::play::run(&scenario, seed, settings.as_deref(), windows.as_deref()),
        Commands::Run {
            characters,
            ticks,
            kill_every,
            scenario,
            seed,
            windows,
            verbose,
        } => commands::run::run(
            &scenario,
            &characters,
            ticks,
            kill_every,
            seed,
            windows.as_deref(),
            verbose,
        ),
        Commands::Time { minutes } => {
            commands::time::run(minutes);
            Ok(())
        }
        Commands::Scenarios => commands::scenarios::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
