//! Outcome evaluation.
//!
//! Pure functions over a board. They are cheap enough (eight line checks)
//! to run after every single placement.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use super::{Board, Outcome, PlayerAssignment};
use tracing::instrument;

/// Classifies the board and attributes a line to a side.
///
/// The side is looked up in `assignment` at call time, so a marker swap
/// changes who owns an existing line.
#[instrument(skip(board), fields(occupied = board.occupied()))]
pub fn evaluate(board: &Board, assignment: &PlayerAssignment) -> Outcome {
    if let Some((line, marker)) = winning_line(board) {
        return Outcome::Win {
            line,
            marker,
            winner: assignment.side_of(marker),
        };
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Marker, Side};

    #[test]
    fn test_evaluate_attributes_line_to_side() {
        let mut board = Board::new();
        for index in [2, 5, 8] {
            board.place(index, Marker::O).unwrap();
        }
        let assignment = PlayerAssignment::new(Marker::X);
        assert_eq!(
            evaluate(&board, &assignment),
            Outcome::Win {
                line: [2, 5, 8],
                marker: Marker::O,
                winner: Side::Automated,
            }
        );

        let swapped = assignment.swapped();
        assert_eq!(evaluate(&board, &swapped).winner(), Some(Side::Human));
    }

    #[test]
    fn test_evaluate_ongoing() {
        let mut board = Board::new();
        board.place(4, Marker::X).unwrap();
        let assignment = PlayerAssignment::default();
        assert_eq!(evaluate(&board, &assignment), Outcome::Ongoing);
    }
}
