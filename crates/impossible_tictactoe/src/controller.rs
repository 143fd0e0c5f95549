//! Turn state machine for one round.
//!
//! The round alternates between the human and the automated side and ends
//! as soon as a placement produces a line or fills the board. Rejected
//! requests leave the state exactly as it was.

use super::action::{Move, MoveError};
use super::contracts::assert_invariants;
use super::rules;
use super::{Board, Outcome, PlayerAssignment, Position, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Where the round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// The human places next.
    AwaitingHumanMove,
    /// The automated side places next.
    AwaitingAutomatedMove,
    /// The round is over; only a restart continues play.
    RoundOver(Outcome),
}

impl TurnState {
    /// The state in which `side` is on move.
    pub fn awaiting(side: Side) -> Self {
        match side {
            Side::Human => TurnState::AwaitingHumanMove,
            Side::Automated => TurnState::AwaitingAutomatedMove,
        }
    }

    /// The side on move, or `None` once the round is over.
    pub fn side_to_move(&self) -> Option<Side> {
        match self {
            TurnState::AwaitingHumanMove => Some(Side::Human),
            TurnState::AwaitingAutomatedMove => Some(Side::Automated),
            TurnState::RoundOver(_) => None,
        }
    }

    /// The final outcome, once the round is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            TurnState::RoundOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// State of one round: board, turn, opener and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: TurnState,
    pub(crate) first_mover: Side,
    pub(crate) history: Vec<Move>,
    pub(crate) markers_swapped: bool,
}

impl GameState {
    /// Starts a round with an empty board and `first_mover` on move.
    #[instrument]
    pub fn new(first_mover: Side) -> Self {
        Self {
            board: Board::new(),
            turn: TurnState::awaiting(first_mover),
            first_mover,
            history: Vec::new(),
            markers_swapped: false,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn state.
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Returns the side that opened this round.
    pub fn first_mover(&self) -> Side {
        self.first_mover
    }

    /// Returns the placements of this round in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True once the markers were exchanged during this round.
    pub fn markers_swapped(&self) -> bool {
        self.markers_swapped
    }

    /// Records a mid-round marker exchange. Cells keep their markers.
    pub(crate) fn note_marker_swap(&mut self) {
        if !self.history.is_empty() {
            self.markers_swapped = true;
        }
    }

    /// Places `side`'s marker on `index` and advances the turn.
    ///
    /// The marker is read from `assignment` now, not when the round began.
    ///
    /// # Errors
    ///
    /// [`MoveError::RoundOver`] after the round ended,
    /// [`MoveError::NotYourTurn`] if `side` is not on move, and the board's
    /// [`MoveError::InvalidIndex`] / [`MoveError::CellOccupied`]. No state
    /// changes on error.
    #[instrument(skip(self, assignment), fields(turn = ?self.turn))]
    pub fn apply(
        &mut self,
        index: usize,
        side: Side,
        assignment: &PlayerAssignment,
    ) -> Result<Outcome, MoveError> {
        match self.turn.side_to_move() {
            None => return Err(MoveError::RoundOver),
            Some(on_move) if on_move != side => return Err(MoveError::NotYourTurn),
            Some(_) => {}
        }

        let position = Position::from_index(index).ok_or(MoveError::InvalidIndex(index))?;
        let marker = assignment.marker_of(side);
        self.board.place(index, marker)?;
        self.history.push(Move::new(marker, position));

        let outcome = rules::evaluate(&self.board, assignment);
        self.turn = if outcome.is_terminal() {
            info!(%outcome, "Round over");
            TurnState::RoundOver(outcome)
        } else {
            TurnState::awaiting(side.other())
        };
        debug!(%marker, %position, turn = ?self.turn, "Placed");

        assert_invariants(self);
        Ok(outcome)
    }

    /// Who opens the next round.
    ///
    /// The loser of a finished round opens; a draw, or a round abandoned
    /// before it finished, keeps the same opener.
    pub fn next_first_mover(&self) -> Side {
        self.turn
            .outcome()
            .and_then(Outcome::loser)
            .unwrap_or(self.first_mover)
    }
}
