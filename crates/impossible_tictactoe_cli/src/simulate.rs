//! Engine against a uniformly random human.

use impossible_tictactoe::{
    Difficulty, DifficultyThresholds, FirstPlayer, GameSession, GameSettings, MoveError,
    PlayerAssignment, Tally, TurnState,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use tracing::{debug, info, instrument};

/// Plays `games` rounds and returns the tally.
///
/// Rounds follow the session's restart policy, so the loser of each round
/// opens the next one.
#[instrument]
pub fn simulate(games: u32, difficulty: Difficulty, seed: u64) -> Result<Tally, MoveError> {
    let settings = GameSettings::new(
        PlayerAssignment::default(),
        difficulty,
        DifficultyThresholds::default(),
        FirstPlayer::Human,
    );
    let mut session = GameSession::seeded(settings, seed);
    let mut human = StdRng::seed_from_u64(seed.wrapping_add(1));

    for round in 0..games {
        if round > 0 {
            session.restart();
        }
        loop {
            match session.turn() {
                TurnState::AwaitingHumanMove => {
                    let index = session
                        .state()
                        .board()
                        .empty_indices()
                        .choose(&mut human)
                        .ok_or(MoveError::NoLegalMove)?;
                    session.human_move(index)?;
                }
                TurnState::AwaitingAutomatedMove => {
                    session.automated_move()?;
                }
                TurnState::RoundOver(outcome) => {
                    debug!(round, %outcome, "Round finished");
                    break;
                }
            }
        }
    }

    let tally = *session.tally();
    info!(?tally, "Simulation complete");
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximum_never_loses() {
        let tally = simulate(300, Difficulty::Maximum, 17).unwrap();
        assert_eq!(tally.rounds(), 300);
        assert_eq!(*tally.human_wins(), 0);
    }

    #[test]
    fn test_easy_loses_sometimes() {
        let tally = simulate(300, Difficulty::Easy, 17).unwrap();
        assert_eq!(tally.rounds(), 300);
        assert!(*tally.human_wins() > 0);
    }

    #[test]
    fn test_same_seed_same_tally() {
        assert_eq!(
            simulate(50, Difficulty::Medium, 4).unwrap(),
            simulate(50, Difficulty::Medium, 4).unwrap()
        );
    }
}
