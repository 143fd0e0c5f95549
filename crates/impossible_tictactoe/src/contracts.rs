//! Consistency checks between the board and the round history.
//!
//! They run after every placement in debug builds.

use super::controller::GameState;
use super::{Marker, Square};
use tracing::{instrument, warn};

/// Invariant: history length matches filled squares.
pub struct HistoryComplete;

impl HistoryComplete {
    /// Checks the invariant.
    #[instrument(skip(state))]
    pub fn holds(state: &GameState) -> bool {
        let filled = state.board().occupied();
        let history_len = state.history().len();

        let valid = filled == history_len;
        if !valid {
            warn!(filled, history_len, "History completeness violated");
        }
        valid
    }
}

/// Invariant: every recorded move is still on the board.
pub struct HistoryOnBoard;

impl HistoryOnBoard {
    /// Checks the invariant.
    #[instrument(skip(state))]
    pub fn holds(state: &GameState) -> bool {
        let valid = state.history().iter().all(|mov| {
            state.board().get(mov.position.to_index()) == Some(Square::Occupied(mov.marker))
        });
        if !valid {
            warn!("Recorded move missing from board");
        }
        valid
    }
}

/// Invariant: marker counts differ by at most one.
///
/// Only enforced until the markers are exchanged mid-round; after a swap one
/// side may place the same marker twice in a row.
pub struct MarkersBalanced;

impl MarkersBalanced {
    /// Checks the invariant.
    #[instrument(skip(state))]
    pub fn holds(state: &GameState) -> bool {
        if state.markers_swapped() {
            return true;
        }
        let x = state.board().count(Marker::X);
        let o = state.board().count(Marker::O);

        let valid = x.abs_diff(o) <= 1;
        if !valid {
            warn!(x, o, "Marker balance violated");
        }
        valid
    }
}

/// Asserts that all round invariants hold (panics on violation in debug builds).
pub fn assert_invariants(state: &GameState) {
    debug_assert!(
        HistoryComplete::holds(state),
        "History completeness violated"
    );
    debug_assert!(
        HistoryOnBoard::holds(state),
        "Recorded move missing from board"
    );
    debug_assert!(MarkersBalanced::holds(state), "Marker balance violated");
}
