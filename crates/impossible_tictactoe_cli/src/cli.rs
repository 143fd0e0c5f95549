//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use impossible_tictactoe::{Difficulty, FirstPlayer, Marker};

/// Impossible Tic-Tac-Toe - play a minimax opponent in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play an unbeatable tic-tac-toe engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively against the engine
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Opponent strength (easy, medium, hard, maximum)
        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        /// Marker the human plays
        #[arg(short, long)]
        marker: Option<MarkerArg>,

        /// Who opens the first round
        #[arg(short, long)]
        first: Option<FirstArg>,

        /// Seed for the opponent's rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pit the engine against a random human and print the tally
    Simulate {
        /// Number of rounds to play
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Opponent strength (easy, medium, hard, maximum)
        #[arg(long, default_value = "maximum", value_parser = parse_difficulty)]
        difficulty: Difficulty,

        /// Seed for both sides' rolls
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

/// Marker choice on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerArg {
    /// Play X
    #[value(name = "X", alias = "x")]
    X,
    /// Play O
    #[value(name = "O", alias = "o")]
    O,
}

impl From<MarkerArg> for Marker {
    fn from(arg: MarkerArg) -> Self {
        match arg {
            MarkerArg::X => Marker::X,
            MarkerArg::O => Marker::O,
        }
    }
}

/// First-mover choice on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstArg {
    /// The human opens
    Human,
    /// The engine opens
    Automated,
}

impl From<FirstArg> for FirstPlayer {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Human => FirstPlayer::Human,
            FirstArg::Automated => FirstPlayer::Automated,
        }
    }
}

/// Parses a difficulty name, accepting "impossible" for maximum.
pub fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.trim()
        .parse::<Difficulty>()
        .map_err(|_| format!("unknown difficulty '{}'", s))
}
