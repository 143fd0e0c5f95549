//! Impossible Tic-Tac-Toe - terminal front end
//!
//! Plays the decision engine interactively or in bulk simulation.

#![warn(missing_docs)]

mod cli;
mod config;
mod play;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, FirstArg, MarkerArg};
use config::GameConfig;
use impossible_tictactoe::Difficulty;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board stays readable on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            difficulty,
            marker,
            first,
            seed,
        } => run_play(config, difficulty, marker, first, seed),
        Command::Simulate {
            games,
            difficulty,
            seed,
        } => run_simulate(games, difficulty, seed),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument(skip_all)]
fn run_play(
    config_path: Option<PathBuf>,
    difficulty: Option<Difficulty>,
    marker: Option<MarkerArg>,
    first: Option<FirstArg>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    // Command-line flags win over the file
    if let Some(difficulty) = difficulty {
        config.set_difficulty(difficulty);
    }
    if let Some(marker) = marker {
        config.set_human_marker(marker.into());
    }
    if let Some(first) = first {
        config.set_first_player(first.into());
    }

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(?seed, "Starting interactive game");

    let stdin = std::io::stdin();
    play::run(config.to_settings(), rng, stdin.lock(), std::io::stdout())?;
    Ok(())
}

/// Run a bulk simulation and print the tally
#[instrument]
fn run_simulate(games: u32, difficulty: Difficulty, seed: u64) -> Result<()> {
    let tally = simulate::simulate(games, difficulty, seed)
        .context("Simulation failed")?;
    println!(
        "{} rounds at {}: human {} - engine {} - draws {}",
        tally.rounds(),
        difficulty,
        tally.human_wins(),
        tally.automated_wins(),
        tally.draws()
    );
    Ok(())
}
