//! First-class move and error types.
//!
//! Moves are domain events, not side effects. They record which marker
//! landed on which square and are kept in the round history.

use super::{Marker, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A placement: a marker put down on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The marker that was placed.
    pub marker: Marker,
    /// The square it was placed on.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(marker: Marker, position: Position) -> Self {
        Self { marker, position }
    }

    /// Returns the marker placed by this move.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Returns the square of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.marker, self.position.label())
    }
}

/// Error raised when a move request is rejected.
///
/// A rejected request never mutates the board or the turn state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The target square already holds a marker.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(usize),

    /// The index does not address a square (valid range is 0-8).
    #[display("Square index {} is out of range (must be 0-8)", _0)]
    InvalidIndex(usize),

    /// An automated move was requested on a full board.
    #[display("No legal move left on the board")]
    NoLegalMove,

    /// The request came from the side that is not on move.
    #[display("It is not your turn")]
    NotYourTurn,

    /// The round has finished; restart before placing again.
    #[display("Round is already over")]
    RoundOver,
}

impl std::error::Error for MoveError {}
