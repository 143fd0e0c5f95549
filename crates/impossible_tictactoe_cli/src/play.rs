//! Interactive terminal game.

use crate::cli::parse_difficulty;
use anyhow::{Context, Result};
use impossible_tictactoe::{
    Difficulty, GameEvent, GameSession, GameSettings, MoveError, Position, Side, TurnState,
};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  1-9 or a label  place your marker (e.g. 5, center, top-left)
  swap            exchange markers with the computer
  difficulty D    easy, medium, hard or maximum
  restart         clear the board (the loser opens the next round)
  score           show wins, losses and draws
  help            show this message
  quit            leave the game";

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place on a square.
    Place(Position),
    /// Exchange markers.
    Swap,
    /// Change opponent strength.
    Difficulty(Difficulty),
    /// Start a new round.
    Restart,
    /// Print the tally.
    Score,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

impl Input {
    /// Parses a line, returning a message for the player on failure.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();

        match command.as_str() {
            "" => Err("Type a square number or 'help'.".to_string()),
            "swap" => Ok(Input::Swap),
            "restart" | "r" => Ok(Input::Restart),
            "score" => Ok(Input::Score),
            "help" | "?" => Ok(Input::Help),
            "quit" | "exit" | "q" => Ok(Input::Quit),
            "difficulty" => match words.next() {
                Some(level) => parse_difficulty(level).map(Input::Difficulty),
                None => Err("Usage: difficulty <easy|medium|hard|maximum>".to_string()),
            },
            _ => Position::from_label_or_number(line)
                .map(Input::Place)
                .ok_or_else(|| format!("'{}' is not a square or a command.", line)),
        }
    }
}

/// Renders session output as text.
pub struct Presenter<W> {
    out: W,
}

impl<W: Write> Presenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one line.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message).context("Failed to write output")
    }

    /// Writes the outcome of a session call.
    pub fn events<R: Rng>(
        &mut self,
        session: &GameSession<R>,
        events: &[GameEvent],
    ) -> Result<()> {
        for event in events {
            debug!(?event, "Rendering game event");
            match event {
                GameEvent::Placed {
                    index,
                    marker,
                    side,
                } => {
                    let who = match side {
                        Side::Human => "You",
                        Side::Automated => "Computer",
                    };
                    let square = Position::from_index(*index).map_or("?", |p| p.label());
                    let line = format!("{} played {} on {} ({}).", who, marker, square, index + 1);
                    self.say(&line)?;
                }
                GameEvent::RoundOver(outcome) => {
                    let headline = match outcome.winner() {
                        Some(Side::Human) => "You win!",
                        Some(Side::Automated) => "Computer wins!",
                        None => "It's a draw.",
                    };
                    self.say(&format!("{} {}.", headline, outcome))?;
                    self.say("Type 'restart' to play again.")?;
                }
                GameEvent::Cleared => self.say("New round.")?,
            }
        }
        self.board(session)
    }

    /// Writes the board and whose turn it is.
    pub fn board<R: Rng>(&mut self, session: &GameSession<R>) -> Result<()> {
        self.say(&format!("\n{}\n", session.state().board().display()))?;
        if session.turn() == TurnState::AwaitingHumanMove {
            let marker = session.settings().assignment().human_marker();
            self.say(&format!("Your move ({}).", marker))?;
        }
        Ok(())
    }

    /// Writes the running tally.
    pub fn score<R: Rng>(&mut self, session: &GameSession<R>) -> Result<()> {
        let tally = session.tally();
        self.say(&format!(
            "You {} - Computer {} - Draws {}",
            tally.human_wins(),
            tally.automated_wins(),
            tally.draws()
        ))
    }
}

/// Runs the read-eval-print loop until `quit` or end of input.
#[instrument(skip_all, fields(difficulty = %settings.difficulty()))]
pub fn run<R: Rng>(
    settings: GameSettings,
    rng: R,
    input: impl BufRead,
    out: impl Write,
) -> Result<GameSession<R>> {
    let mut session = GameSession::with_rng(settings, rng);
    let mut presenter = Presenter::new(out);

    presenter.say(&format!(
        "Impossible Tic-Tac-Toe: you are {}, difficulty {}, {} moves first.",
        settings.assignment().human_marker(),
        settings.difficulty(),
        settings.first_player().label()
    ))?;
    presenter.say("Type 'help' for commands.")?;
    open_round(&mut session, &mut presenter)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = match Input::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                presenter.say(&message)?;
                continue;
            }
        };

        match command {
            Input::Place(position) => match session.human_move(position.to_index()) {
                Ok(events) => presenter.events(&session, &events)?,
                Err(MoveError::CellOccupied(_)) => {
                    presenter.say(&format!("{} is taken, pick another square.", position))?
                }
                Err(MoveError::RoundOver) => {
                    presenter.say("The round is over. Type 'restart' to play again.")?
                }
                Err(e) => {
                    warn!(error = %e, "Move rejected");
                    presenter.say(&format!("Move rejected: {}", e))?
                }
            },
            Input::Swap => {
                session.swap_markers();
                presenter.say(&format!(
                    "You now play {}.",
                    session.settings().assignment().human_marker()
                ))?;
                presenter.board(&session)?;
            }
            Input::Difficulty(difficulty) => {
                session.set_difficulty(difficulty);
                presenter.say(&format!("Difficulty set to {}.", difficulty))?;
            }
            Input::Restart => {
                let events = session.restart();
                presenter.say(match session.turn() {
                    TurnState::AwaitingAutomatedMove => "Computer opens.",
                    _ => "You open.",
                })?;
                presenter.events(&session, &events)?;
                open_round(&mut session, &mut presenter)?;
            }
            Input::Score => presenter.score(&session)?,
            Input::Help => presenter.say(HELP)?,
            Input::Quit => break,
        }
    }

    info!(rounds = session.tally().rounds(), "Leaving game");
    presenter.score(&session)?;
    Ok(session)
}

/// Lets the automated side move if it opens the round, then shows the board.
fn open_round<R: Rng, W: Write>(
    session: &mut GameSession<R>,
    presenter: &mut Presenter<W>,
) -> Result<()> {
    if session.turn() == TurnState::AwaitingAutomatedMove {
        let events = session
            .automated_move()
            .context("Automated opening move failed")?;
        presenter.events(session, &events)
    } else {
        presenter.board(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impossible_tictactoe::{DifficultyThresholds, FirstPlayer, Marker, PlayerAssignment};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings(difficulty: Difficulty, first: FirstPlayer) -> GameSettings {
        GameSettings::new(
            PlayerAssignment::new(Marker::X),
            difficulty,
            DifficultyThresholds::default(),
            first,
        )
    }

    fn play(settings: GameSettings, script: &str) -> (GameSession<StdRng>, String) {
        let mut out = Vec::new();
        let session = run(
            settings,
            StdRng::seed_from_u64(1),
            script.as_bytes(),
            &mut out,
        )
        .unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("5"), Ok(Input::Place(Position::Center)));
        assert_eq!(Input::parse(" center "), Ok(Input::Place(Position::Center)));
        assert_eq!(
            Input::parse("top-left"),
            Ok(Input::Place(Position::TopLeft))
        );
        assert_eq!(Input::parse("SWAP"), Ok(Input::Swap));
        assert_eq!(
            Input::parse("difficulty impossible"),
            Ok(Input::Difficulty(Difficulty::Maximum))
        );
        assert_eq!(Input::parse("quit"), Ok(Input::Quit));
        assert!(Input::parse("difficulty").is_err());
        assert!(Input::parse("0").is_err());
        assert!(Input::parse("10").is_err());
        assert!(Input::parse("").is_err());
    }

    #[test]
    fn test_move_and_reply() {
        let (session, out) = play(
            settings(Difficulty::Maximum, FirstPlayer::Human),
            "1\nquit\n",
        );
        assert!(out.contains("You played X on Top-left (1)."));
        // The center is the only reply that holds against a corner.
        assert!(out.contains("Computer played O on Center (5)."));
        assert_eq!(session.state().board().occupied(), 2);
    }

    #[test]
    fn test_occupied_square_is_reported() {
        let (session, out) = play(settings(Difficulty::Maximum, FirstPlayer::Human), "1\n1\n");
        assert!(out.contains("Top-left is taken"));
        assert_eq!(session.state().board().occupied(), 2);
    }

    #[test]
    fn test_automated_opener_moves_at_start() {
        let (session, out) = play(settings(Difficulty::Maximum, FirstPlayer::Automated), "");
        assert!(out.contains("Computer played O on Top-left (1)."));
        assert_eq!(session.turn(), TurnState::AwaitingHumanMove);
    }

    #[test]
    fn test_settings_commands() {
        let (session, out) = play(
            settings(Difficulty::Easy, FirstPlayer::Human),
            "swap\ndifficulty hard\nscore\nhelp\nnonsense\n",
        );
        assert_eq!(session.settings().assignment().human_marker(), Marker::O);
        assert_eq!(*session.settings().difficulty(), Difficulty::Hard);
        assert!(out.contains("You now play O."));
        assert!(out.contains("You 0 - Computer 0 - Draws 0"));
        assert!(out.contains("Commands:"));
        assert!(out.contains("'nonsense' is not a square or a command."));
    }

    #[test]
    fn test_lost_round_then_restart() {
        // Corner, edge, then ignoring the 3-5-7 threat.
        let (session, out) = play(
            settings(Difficulty::Maximum, FirstPlayer::Human),
            "1\n2\n9\n4\nrestart\n",
        );
        assert!(out.contains("Computer wins!"));
        assert!(out.contains("The round is over."));
        assert!(out.contains("You open."));
        assert_eq!(*session.tally().automated_wins(), 1);
        assert_eq!(session.state().board().occupied(), 0);
    }
}
