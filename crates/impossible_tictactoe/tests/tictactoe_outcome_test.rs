//! Outcome evaluation and search over every reachable board.

use impossible_tictactoe::rules::{LINES, evaluate};
use impossible_tictactoe::search::best_move;
use impossible_tictactoe::{Board, Marker, Outcome, PlayerAssignment, Side, Square};
use std::collections::HashSet;

/// Collects every board reachable from the empty board with X opening.
fn reachable_boards() -> HashSet<Board> {
    fn walk(board: Board, to_move: Marker, seen: &mut HashSet<Board>) {
        if !seen.insert(board) {
            return;
        }
        if impossible_tictactoe::rules::check_winner(&board).is_some() {
            return;
        }
        for index in board.empty_indices() {
            let mut next = board;
            next.place(index, to_move).unwrap();
            walk(next, to_move.opponent(), seen);
        }
    }

    let mut seen = HashSet::new();
    walk(Board::new(), Marker::X, &mut seen);
    seen
}

fn has_uniform_line(board: &Board) -> bool {
    LINES.iter().any(|line| {
        let first = board.get(line[0]).unwrap();
        first != Square::Empty && line.iter().all(|&i| board.get(i) == Some(first))
    })
}

#[test]
fn test_reachable_board_count() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_evaluate_matches_definition_on_every_board() {
    let assignment = PlayerAssignment::new(Marker::O);
    for board in reachable_boards() {
        let outcome = evaluate(&board, &assignment);
        let line = has_uniform_line(&board);

        let is_win = matches!(outcome, Outcome::Win { .. });
        assert_eq!(is_win, line, "{}", board.display());
        assert_eq!(
            outcome == Outcome::Draw,
            board.is_full() && !line,
            "{}",
            board.display()
        );
        if let Outcome::Win {
            line,
            marker,
            winner,
        } = outcome
        {
            let filled = Some(Square::Occupied(marker));
            assert!(line.iter().all(|&i| board.get(i) == filled));
            assert_eq!(winner == Side::Human, marker == Marker::O);
        }
    }
}

#[test]
fn test_best_move_is_always_an_empty_square() {
    for board in reachable_boards() {
        // Includes the empty board and every opening.
        if board.is_full() || has_uniform_line(&board) {
            continue;
        }
        let to_move = if board.count(Marker::X) > board.count(Marker::O) {
            Marker::O
        } else {
            Marker::X
        };
        let chosen = best_move(&board, to_move).unwrap();
        assert!(
            board.empty_indices().any(|i| i == chosen),
            "{} chose {}",
            board.display(),
            chosen
        );
    }
}
