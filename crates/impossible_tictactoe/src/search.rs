//! Exhaustive minimax over the remaining squares.
//!
//! The search copies the board once and explores it with place/undo pairs,
//! so the caller's board is never touched. Scores are adjusted by ply depth:
//! a win found sooner beats a win found later, and a loss found later beats
//! a loss found sooner.

use super::rules::check_winner;
use super::types::SQUARES;
use super::{Board, Marker};
use tracing::{debug, instrument};

/// Score of a line for the maximizing marker, before depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Score of a full board without a line.
pub const DRAW_SCORE: i32 = 0;

/// What a search found at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Chosen square, lowest index among the best-scoring moves.
    pub index: usize,
    /// Depth-adjusted minimax value of that move.
    pub score: i32,
    /// Number of positions visited below the root.
    pub nodes: u64,
}

/// Returns the best square for `maximizer`, who is on move.
///
/// The other marker minimizes. Returns `None` only on a full board.
pub fn best_move(board: &Board, maximizer: Marker) -> Option<usize> {
    search(board, maximizer).map(|report| report.index)
}

/// Runs the search and reports the chosen move with its score.
#[instrument(skip(board), fields(empty = board.empty_indices().count()))]
pub fn search(board: &Board, maximizer: Marker) -> Option<SearchReport> {
    let mut scratch = *board;
    let mut minimax = Minimax {
        maximizer,
        nodes: 0,
    };

    let mut best: Option<(usize, i32)> = None;
    for index in 0..SQUARES {
        if scratch.place(index, maximizer).is_err() {
            continue;
        }
        let value = minimax.score(&mut scratch, 0, false);
        scratch.undo(index);

        // Strictly greater keeps the lowest index on ties.
        if best.is_none_or(|(_, score)| value > score) {
            best = Some((index, value));
        }
    }
    debug_assert_eq!(&scratch, board);

    let (index, score) = best?;
    debug!(index, score, nodes = minimax.nodes, "Search finished");
    Some(SearchReport {
        index,
        score,
        nodes: minimax.nodes,
    })
}

struct Minimax {
    maximizer: Marker,
    nodes: u64,
}

impl Minimax {
    /// Value of `board` where `depth` plies have been played below the root
    /// and `maximizing_turn` says whose marker goes down next.
    fn score(&mut self, board: &mut Board, depth: i32, maximizing_turn: bool) -> i32 {
        self.nodes += 1;

        if let Some(marker) = check_winner(board) {
            return if marker == self.maximizer {
                WIN_SCORE - depth
            } else {
                depth - WIN_SCORE
            };
        }
        if board.is_full() {
            return DRAW_SCORE;
        }

        let marker = if maximizing_turn {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let mut best = if maximizing_turn { i32::MIN } else { i32::MAX };
        for index in 0..SQUARES {
            if board.place(index, marker).is_err() {
                continue;
            }
            let value = self.score(board, depth + 1, !maximizing_turn);
            board.undo(index);
            best = if maximizing_turn {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }
}
