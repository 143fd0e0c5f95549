//! A playing session: the live round, the settings and the opponent.
//!
//! The session is the only owner of game state. A front end drives it with
//! method calls and renders the [`GameEvent`]s each call returns.

use super::action::MoveError;
use super::controller::{GameState, TurnState};
use super::difficulty::{Choice, Difficulty, DifficultyPolicy, DifficultyThresholds};
use super::settings::GameSettings;
use super::{Marker, Outcome, Side};
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Something the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A marker was placed.
    Placed {
        /// Square index (0-8).
        index: usize,
        /// Marker placed.
        marker: Marker,
        /// Side that placed it.
        side: Side,
    },
    /// The round ended.
    RoundOver(Outcome),
    /// The board was cleared for a new round.
    Cleared,
}

/// Finished rounds per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct Tally {
    /// Rounds won by the human.
    human_wins: u32,
    /// Rounds won by the automated side.
    automated_wins: u32,
    /// Drawn rounds.
    draws: u32,
}

impl Tally {
    fn record(&mut self, outcome: &Outcome) {
        match outcome.winner() {
            Some(Side::Human) => self.human_wins += 1,
            Some(Side::Automated) => self.automated_wins += 1,
            None if outcome.is_draw() => self.draws += 1,
            None => {}
        }
    }

    /// Total finished rounds.
    pub fn rounds(&self) -> u32 {
        self.human_wins + self.automated_wins + self.draws
    }
}

/// Human versus automated opponent.
#[derive(Debug, Clone)]
pub struct GameSession<R = StdRng> {
    state: GameState,
    settings: GameSettings,
    policy: DifficultyPolicy<R>,
    tally: Tally,
}

impl GameSession<StdRng> {
    /// Creates a session with an entropy-seeded opponent.
    #[instrument]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a session whose opponent replays the same rolls for a seed.
    #[instrument]
    pub fn seeded(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Creates a session drawing the opponent's rolls from `rng`.
    pub fn with_rng(settings: GameSettings, rng: R) -> Self {
        let first_mover = settings.first_player().side();
        info!(?first_mover, difficulty = %settings.difficulty(), "Creating game session");
        Self {
            state: GameState::new(first_mover),
            settings,
            policy: DifficultyPolicy::new(rng),
            tally: Tally::default(),
        }
    }

    /// Returns the live round.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the turn state of the live round.
    pub fn turn(&self) -> TurnState {
        self.state.turn()
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Returns finished-round counts.
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Places the human's marker and, if the round goes on, answers with the
    /// automated move before returning.
    ///
    /// # Errors
    ///
    /// Any [`MoveError`] from the placement. The session is unchanged when
    /// the human's request is rejected.
    #[instrument(skip(self), fields(turn = ?self.state.turn()))]
    pub fn human_move(&mut self, index: usize) -> Result<Vec<GameEvent>, MoveError> {
        let mut events = self.place(index, Side::Human)?;
        if self.state.turn() == TurnState::AwaitingAutomatedMove {
            // An ongoing round has an empty square, so the reply cannot fail.
            debug_assert!(!self.state.board().is_full());
            events.extend(self.automated_move()?);
        }
        Ok(events)
    }

    /// Plays the automated side's move.
    ///
    /// Front ends call this after a restart that left the automated side
    /// to open; [`GameSession::human_move`] calls it on its own.
    ///
    /// # Errors
    ///
    /// [`MoveError::NotYourTurn`] if the human is on move and
    /// [`MoveError::RoundOver`] after the round ended.
    #[instrument(skip(self), fields(turn = ?self.state.turn()))]
    pub fn automated_move(&mut self) -> Result<Vec<GameEvent>, MoveError> {
        match self.state.turn() {
            TurnState::AwaitingAutomatedMove => {}
            TurnState::AwaitingHumanMove => return Err(MoveError::NotYourTurn),
            TurnState::RoundOver(_) => return Err(MoveError::RoundOver),
        }

        let maximizer = self.settings.assignment().automated_marker();
        let Choice { index, source, .. } = self.policy.choose_move(
            self.state.board(),
            *self.settings.difficulty(),
            self.settings.thresholds(),
            maximizer,
        )?;
        debug!(index, ?source, "Automated side moves");
        self.place(index, Side::Automated)
    }

    fn place(&mut self, index: usize, side: Side) -> Result<Vec<GameEvent>, MoveError> {
        let assignment = *self.settings.assignment();
        let outcome = self.state.apply(index, side, &assignment)?;

        let mut events = vec![GameEvent::Placed {
            index,
            marker: assignment.marker_of(side),
            side,
        }];
        if outcome.is_terminal() {
            self.tally.record(&outcome);
            events.push(GameEvent::RoundOver(outcome));
        }
        Ok(events)
    }

    /// Clears the board for a new round.
    ///
    /// The loser of the finished round opens the next one; after a draw or
    /// an unfinished round the opener stays the same. If the automated side
    /// opens, the new round waits in [`TurnState::AwaitingAutomatedMove`].
    #[instrument(skip(self), fields(turn = ?self.state.turn()))]
    pub fn restart(&mut self) -> Vec<GameEvent> {
        let first_mover = self.state.next_first_mover();
        info!(?first_mover, "Restarting round");
        self.state = GameState::new(first_mover);
        vec![GameEvent::Cleared]
    }

    /// Exchanges the markers of the two sides.
    ///
    /// Squares already on the board keep their marker; from now on each
    /// side places its new marker and a line is credited to whoever holds
    /// that marker when it is completed.
    #[instrument(skip(self))]
    pub fn swap_markers(&mut self) {
        let assignment = self.settings.assignment().swapped();
        info!(human = %assignment.human_marker(), "Swapping markers");
        self.settings.set_assignment(assignment);
        self.state.note_marker_swap();
    }

    /// Sets the human's marker (the automated side takes the other).
    #[instrument(skip(self))]
    pub fn set_human_marker(&mut self, marker: Marker) {
        if self.settings.assignment().human_marker() != marker {
            self.swap_markers();
        }
    }

    /// Changes the opponent strength, effective from its next move.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "Changing difficulty");
        self.settings.set_difficulty(difficulty);
    }

    /// Changes the Medium and Hard thresholds.
    #[instrument(skip(self))]
    pub fn set_thresholds(&mut self, thresholds: DifficultyThresholds) {
        self.settings.set_thresholds(thresholds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FirstPlayer, PlayerAssignment};

    fn settings(difficulty: Difficulty, first: FirstPlayer) -> GameSettings {
        GameSettings::new(
            PlayerAssignment::default(),
            difficulty,
            DifficultyThresholds::default(),
            first,
        )
    }

    #[test]
    fn test_human_move_triggers_reply() {
        let mut session = GameSession::seeded(settings(Difficulty::Maximum, FirstPlayer::Human), 7);
        let events = session.human_move(0).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            GameEvent::Placed {
                index: 0,
                marker: Marker::X,
                side: Side::Human
            }
        );
        assert!(matches!(
            events[1],
            GameEvent::Placed {
                marker: Marker::O,
                side: Side::Automated,
                ..
            }
        ));
        assert_eq!(session.turn(), TurnState::AwaitingHumanMove);
    }

    #[test]
    fn test_entropy_session_starts_with_human() {
        let session = GameSession::new(GameSettings::default());
        assert_eq!(session.turn(), TurnState::AwaitingHumanMove);
        assert_eq!(session.tally().rounds(), 0);
    }

    #[test]
    fn test_reply_fills_last_square() {
        let settings = settings(Difficulty::Maximum, FirstPlayer::Automated);
        let mut session = GameSession::seeded(settings, 6);
        session.automated_move().unwrap();

        let mut events = Vec::new();
        while session.turn() == TurnState::AwaitingHumanMove {
            let human = session.settings().assignment().human_marker();
            let board = *session.state().board();
            let index = crate::search::best_move(&board, human).unwrap();
            events = session.human_move(index).unwrap();
        }
        // Human fills the eighth square and the engine the ninth.
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], GameEvent::RoundOver(Outcome::Draw));
        assert!(session.state().board().is_full());
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = GameSession::seeded(settings(Difficulty::Easy, FirstPlayer::Human), 1);
        session.human_move(4).unwrap();
        let board = *session.state().board();
        assert_eq!(session.human_move(4), Err(MoveError::CellOccupied(4)));
        assert_eq!(session.human_move(9), Err(MoveError::InvalidIndex(9)));
        assert_eq!(*session.state().board(), board);
        assert_eq!(session.turn(), TurnState::AwaitingHumanMove);
    }

    #[test]
    fn test_automated_move_out_of_turn() {
        let mut session = GameSession::seeded(settings(Difficulty::Hard, FirstPlayer::Human), 2);
        assert_eq!(session.automated_move(), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_automated_opener_waits_for_request() {
        let mut session =
            GameSession::seeded(settings(Difficulty::Maximum, FirstPlayer::Automated), 3);
        assert_eq!(session.turn(), TurnState::AwaitingAutomatedMove);
        assert_eq!(session.human_move(4), Err(MoveError::NotYourTurn));

        let events = session.automated_move().unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Placed {
                index: 0,
                marker: Marker::O,
                side: Side::Automated
            }]
        );
        assert_eq!(session.turn(), TurnState::AwaitingHumanMove);
    }

    #[test]
    fn test_swap_keeps_cells_and_changes_next_marker() {
        let mut session = GameSession::seeded(settings(Difficulty::Easy, FirstPlayer::Human), 4);
        session.human_move(4).unwrap();
        session.swap_markers();
        assert_eq!(session.settings().assignment().human_marker(), Marker::O);
        assert_eq!(
            session.state().board().get(4),
            Some(crate::Square::Occupied(Marker::X))
        );

        let free = session.state().board().empty_indices().next().unwrap();
        let events = session.human_move(free).unwrap();
        assert_eq!(
            events[0],
            GameEvent::Placed {
                index: free,
                marker: Marker::O,
                side: Side::Human
            }
        );
    }

    #[test]
    fn test_set_human_marker_is_idempotent() {
        let mut session = GameSession::seeded(settings(Difficulty::Easy, FirstPlayer::Human), 5);
        session.set_human_marker(Marker::O);
        session.set_human_marker(Marker::O);
        assert_eq!(session.settings().assignment().human_marker(), Marker::O);
    }
}
