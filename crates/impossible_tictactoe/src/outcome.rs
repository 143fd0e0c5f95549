//! Round outcome as seen after a placement.

use super::{Marker, Side};
use serde::{Deserialize, Serialize};

/// Three square indices that win when uniformly marked.
pub type Line = [usize; 3];

/// Result of evaluating the board after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line and at least one empty square.
    Ongoing,
    /// A line of three identical markers.
    Win {
        /// The winning line, first match in the fixed line order.
        line: Line,
        /// The marker filling the line.
        marker: Marker,
        /// The side holding that marker at evaluation time.
        winner: Side,
    },
    /// Full board without a line.
    Draw,
}

impl Outcome {
    /// True once the round cannot continue.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    /// Returns the losing side, if any.
    pub fn loser(&self) -> Option<Side> {
        self.winner().map(Side::other)
    }

    /// Returns the winning line, if any.
    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns true if the round ended in a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win {
                line,
                marker,
                winner,
            } => write!(
                f,
                "{} ({}) wins on squares {}-{}-{}",
                winner,
                marker,
                line[0] + 1,
                line[1] + 1,
                line[2] + 1
            ),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
