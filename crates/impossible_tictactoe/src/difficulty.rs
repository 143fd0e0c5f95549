//! Opponent strength: how often the automated side searches instead of
//! picking a random empty square.

use super::action::MoveError;
use super::search;
use super::{Board, Marker};
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Highest threshold; a roll never reaches it, so the engine always searches.
pub const ALWAYS_SEARCH: u8 = 100;

/// Configured opponent strength.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random moves only.
    Easy,
    /// Occasional search.
    #[default]
    Medium,
    /// Mostly search.
    Hard,
    /// Search every move; cannot be beaten.
    #[serde(alias = "impossible")]
    #[strum(to_string = "maximum", serialize = "impossible")]
    Maximum,
}

/// Search-invocation thresholds in percent, per difficulty.
///
/// Easy is fixed at 0 and Maximum at [`ALWAYS_SEARCH`]; the middle two are
/// configurable and clamped to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyThresholds {
    medium: u8,
    hard: u8,
}

impl DifficultyThresholds {
    /// Default Medium threshold.
    pub const MEDIUM: u8 = 33;
    /// Default Hard threshold.
    pub const HARD: u8 = 66;

    /// Creates thresholds for Medium and Hard.
    #[instrument]
    pub fn new(medium: u8, hard: u8) -> Self {
        Self {
            medium: medium.min(ALWAYS_SEARCH),
            hard: hard.min(ALWAYS_SEARCH),
        }
    }

    /// Threshold for a difficulty; higher searches more often.
    pub fn threshold(&self, difficulty: Difficulty) -> u8 {
        match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Maximum => ALWAYS_SEARCH,
        }
    }
}

impl Default for DifficultyThresholds {
    fn default() -> Self {
        Self::new(Self::MEDIUM, Self::HARD)
    }
}

/// How the automated move was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSource {
    /// Minimax search.
    Search,
    /// Uniform pick among empty squares.
    Random,
}

/// A move picked by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// The chosen square.
    pub index: usize,
    /// Search or random.
    pub source: MoveSource,
    /// The roll in 0..100 that decided the source.
    pub roll: u8,
}

/// Decides each automated move with one roll per move.
#[derive(Debug, Clone)]
pub struct DifficultyPolicy<R> {
    rng: R,
}

impl<R: Rng> DifficultyPolicy<R> {
    /// Creates a policy drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Picks the next square for `maximizer`.
    ///
    /// Rolls a uniform value in 0..100. A roll at or above the difficulty's
    /// threshold picks a random empty square; a lower roll searches.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoLegalMove`] on a full board. Callers must not
    /// ask for a move once the round is over.
    #[instrument(skip(self, board, thresholds), fields(occupied = board.occupied()))]
    pub fn choose_move(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
        thresholds: &DifficultyThresholds,
        maximizer: Marker,
    ) -> Result<Choice, MoveError> {
        debug_assert!(!board.is_full(), "automated move requested on a full board");
        if board.is_full() {
            return Err(MoveError::NoLegalMove);
        }

        let roll = self.rng.gen_range(0..ALWAYS_SEARCH);
        let threshold = thresholds.threshold(difficulty);

        let (index, source) = if roll >= threshold {
            let index = board
                .empty_indices()
                .choose(&mut self.rng)
                .ok_or(MoveError::NoLegalMove)?;
            (index, MoveSource::Random)
        } else {
            let index = search::best_move(board, maximizer).ok_or(MoveError::NoLegalMove)?;
            (index, MoveSource::Search)
        };

        debug!(roll, threshold, index, ?source, "Automated move chosen");
        Ok(Choice {
            index,
            source,
            roll,
        })
    }
}
