//! Impossible tic-tac-toe - the decision engine.
//!
//! A human plays an automated opponent on a 3x3 board. The opponent picks
//! its moves with an exhaustive minimax search, diluted with random moves
//! according to the configured difficulty.
//!
//! # Architecture
//!
//! - **Board**: the nine squares and their place/undo primitives
//! - **Rules**: pure outcome evaluation after every placement
//! - **Search**: depth-adjusted minimax with lowest-index tie-break
//! - **Difficulty**: roll per move deciding search versus random
//! - **Controller / Session**: the Human/Automated turn state machine
//!
//! # Example
//!
//! ```
//! use impossible_tictactoe::{Difficulty, GameSession, GameSettings, TurnState};
//!
//! let mut settings = GameSettings::default();
//! settings.set_difficulty(Difficulty::Maximum);
//! let mut session = GameSession::seeded(settings, 42);
//!
//! // The human opens in the center; the engine answers in the same call.
//! let events = session.human_move(4).unwrap();
//! assert_eq!(events.len(), 2);
//! assert_eq!(session.turn(), TurnState::AwaitingHumanMove);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod controller;
mod difficulty;
mod outcome;
mod position;
pub mod rules;
pub mod search;
mod session;
mod settings;
mod types;

// Crate-level exports - Board and markers
pub use position::Position;
pub use types::{Board, Marker, SQUARES, Side, Square};

// Crate-level exports - Moves and errors
pub use action::{Move, MoveError};

// Crate-level exports - Outcome evaluation
pub use outcome::{Line, Outcome};

// Crate-level exports - Opponent strength
pub use difficulty::{
    ALWAYS_SEARCH, Choice, Difficulty, DifficultyPolicy, DifficultyThresholds, MoveSource,
};

// Crate-level exports - Turn state machine
pub use contracts::{HistoryComplete, HistoryOnBoard, MarkersBalanced, assert_invariants};
pub use controller::{GameState, TurnState};
pub use session::{GameEvent, GameSession, Tally};
pub use settings::{FirstPlayer, GameSettings, PlayerAssignment};
