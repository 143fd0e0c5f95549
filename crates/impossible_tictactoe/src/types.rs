//! Core domain types: markers, sides and the board.

use super::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of squares on the board.
pub const SQUARES: usize = 9;

/// One of the two markers that can be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Marker {
    /// The X marker.
    X,
    /// The O marker.
    O,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }
}

/// Which participant a marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The person at the keyboard.
    Human,
    /// The engine-driven opponent.
    Automated,
}

impl Side {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Automated,
            Side::Automated => Side::Human,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a marker.
    Occupied(Marker),
}

/// 3x3 board, squares addressed 0-8 in row-major order.
///
/// The board is a plain value: copying it gives an independent snapshot,
/// which is how the search explores moves without touching the live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; SQUARES],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; SQUARES],
        }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Places a marker on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidIndex`] for an index outside 0-8 and
    /// [`MoveError::CellOccupied`] if the square already holds a marker.
    /// The board is left untouched in both cases.
    pub fn place(&mut self, index: usize, marker: Marker) -> Result<(), MoveError> {
        match self.squares.get_mut(index) {
            None => Err(MoveError::InvalidIndex(index)),
            Some(Square::Occupied(_)) => Err(MoveError::CellOccupied(index)),
            Some(square) => {
                *square = Square::Occupied(marker);
                Ok(())
            }
        }
    }

    /// Clears a square again, reverting a trial placement.
    pub fn undo(&mut self, index: usize) {
        if let Some(square) = self.squares.get_mut(index) {
            *square = Square::Empty;
        }
    }

    /// Checks if every square holds a marker.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Indices of the empty squares in ascending order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
    }

    /// Number of squares holding the given marker.
    pub fn count(&self, marker: Marker) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(marker))
            .count()
    }

    /// Number of squares holding any marker.
    pub fn occupied(&self) -> usize {
        SQUARES - self.empty_indices().count()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; SQUARES] {
        &self.squares
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their 1-based square number.
    #[instrument(skip(self))]
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(marker) => marker.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
