//! User-configurable settings for a session.

use super::difficulty::{Difficulty, DifficultyThresholds};
use super::{Marker, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Which marker each side plays.
///
/// Stored as the human's marker; the automated side holds the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAssignment {
    human: Marker,
}

impl PlayerAssignment {
    /// Creates an assignment with the human playing `human`.
    pub fn new(human: Marker) -> Self {
        Self { human }
    }

    /// The human's marker.
    pub fn human_marker(&self) -> Marker {
        self.human
    }

    /// The automated side's marker.
    pub fn automated_marker(&self) -> Marker {
        self.human.opponent()
    }

    /// The marker played by `side`.
    pub fn marker_of(&self, side: Side) -> Marker {
        match side {
            Side::Human => self.human_marker(),
            Side::Automated => self.automated_marker(),
        }
    }

    /// The side currently playing `marker`.
    pub fn side_of(&self, marker: Marker) -> Side {
        if marker == self.human {
            Side::Human
        } else {
            Side::Automated
        }
    }

    /// Returns the assignment with markers exchanged.
    pub fn swapped(self) -> Self {
        Self::new(self.human.opponent())
    }
}

impl Default for PlayerAssignment {
    fn default() -> Self {
        Self::new(Marker::X)
    }
}

/// Settings a session reads at every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct GameSettings {
    /// Marker per side.
    assignment: PlayerAssignment,
    /// Opponent strength.
    difficulty: Difficulty,
    /// Search thresholds for Medium and Hard.
    thresholds: DifficultyThresholds,
    /// Who moves first in the very first round.
    first_player: FirstPlayer,
}

impl GameSettings {
    /// Creates settings from their parts.
    #[instrument]
    pub fn new(
        assignment: PlayerAssignment,
        difficulty: Difficulty,
        thresholds: DifficultyThresholds,
        first_player: FirstPlayer,
    ) -> Self {
        Self {
            assignment,
            difficulty,
            thresholds,
            first_player,
        }
    }

    /// Replaces the marker assignment.
    pub fn set_assignment(&mut self, assignment: PlayerAssignment) {
        self.assignment = assignment;
    }

    /// Replaces the difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Replaces the thresholds.
    pub fn set_thresholds(&mut self, thresholds: DifficultyThresholds) {
        self.thresholds = thresholds;
    }
}

/// Which side takes the first move of the opening round.
///
/// Defaults to [`FirstPlayer::Human`] so the player moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// The human opens.
    #[default]
    Human,
    /// The automated side opens.
    Automated,
}

impl FirstPlayer {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Player",
            Self::Automated => "Computer",
        }
    }

    /// The side this option names.
    pub fn side(self) -> Side {
        match self {
            Self::Human => Side::Human,
            Self::Automated => Side::Automated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_is_a_bijection() {
        let assignment = PlayerAssignment::new(Marker::O);
        assert_eq!(assignment.marker_of(Side::Human), Marker::O);
        assert_eq!(assignment.marker_of(Side::Automated), Marker::X);
        assert_eq!(assignment.side_of(Marker::X), Side::Automated);
        assert_eq!(assignment.side_of(Marker::O), Side::Human);
    }

    #[test]
    fn test_swap() {
        let assignment = PlayerAssignment::default().swapped();
        assert_eq!(assignment.human_marker(), Marker::O);
        assert_eq!(assignment.swapped(), PlayerAssignment::default());
    }

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.assignment().human_marker(), Marker::X);
        assert_eq!(*settings.difficulty(), Difficulty::Medium);
        assert_eq!(settings.first_player().side(), Side::Human);
    }
}
