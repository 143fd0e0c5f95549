//! Win detection logic.

use super::super::{Board, Line, Marker, Square};

/// The eight winning lines, in the order they are checked.
pub const LINES: [Line; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first line (in [`LINES`] order) filled by a single marker.
pub fn winning_line(board: &Board) -> Option<(Line, Marker)> {
    LINES.into_iter().find_map(|line @ [a, b, c]| {
        let sq = board.get(a)?;
        match sq {
            Square::Occupied(marker) if board.get(b) == Some(sq) && board.get(c) == Some(sq) => {
                Some((line, marker))
            }
            _ => None,
        }
    })
}

/// Checks if a marker has three in a row.
pub fn check_winner(board: &Board) -> Option<Marker> {
    winning_line(board).map(|(_, marker)| marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(usize, Marker)]) -> Board {
        let mut board = Board::new();
        for &(index, marker) in cells {
            board.place(index, marker).unwrap();
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(&[(0, Marker::X), (1, Marker::X), (2, Marker::X)]);
        assert_eq!(winning_line(&board), Some(([0, 1, 2], Marker::X)));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(&[(2, Marker::O), (4, Marker::O), (6, Marker::O)]);
        assert_eq!(winning_line(&board), Some(([2, 4, 6], Marker::O)));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(0, Marker::X), (1, Marker::X), (2, Marker::O)]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        // Top row and left column both complete; rows come first.
        let board = board_with(&[
            (0, Marker::X),
            (1, Marker::X),
            (2, Marker::X),
            (3, Marker::X),
            (6, Marker::X),
        ]);
        assert_eq!(winning_line(&board), Some(([0, 1, 2], Marker::X)));
    }
}
