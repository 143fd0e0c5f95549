//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use impossible_tictactoe::{
    Difficulty, DifficultyThresholds, FirstPlayer, GameSettings, Marker, PlayerAssignment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings read from a config file.
///
/// ```toml
/// human_marker = "O"
/// difficulty = "hard"
/// first_player = "automated"
/// medium_threshold = 40
/// hard_threshold = 75
/// ```
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Marker the human plays.
    #[serde(default = "default_human_marker")]
    human_marker: Marker,

    /// Opponent strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Who opens the first round.
    #[serde(default)]
    first_player: FirstPlayer,

    /// Percent chance the Medium opponent searches.
    #[serde(default = "default_medium_threshold")]
    medium_threshold: u8,

    /// Percent chance the Hard opponent searches.
    #[serde(default = "default_hard_threshold")]
    hard_threshold: u8,
}

#[instrument]
fn default_human_marker() -> Marker {
    Marker::X
}

#[instrument]
fn default_medium_threshold() -> u8 {
    DifficultyThresholds::MEDIUM
}

#[instrument]
fn default_hard_threshold() -> u8 {
    DifficultyThresholds::HARD
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_marker: default_human_marker(),
            difficulty: Difficulty::default(),
            first_player: FirstPlayer::default(),
            medium_threshold: default_medium_threshold(),
            hard_threshold: default_hard_threshold(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Cannot read config: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("medium_threshold", self.medium_threshold),
            ("hard_threshold", self.hard_threshold),
        ] {
            if value > 100 {
                return Err(ConfigError::new(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Overrides the human's marker.
    pub fn set_human_marker(&mut self, marker: Marker) {
        self.human_marker = marker;
    }

    /// Overrides the difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Overrides who opens the first round.
    pub fn set_first_player(&mut self, first_player: FirstPlayer) {
        self.first_player = first_player;
    }

    /// Builds engine settings from this configuration.
    #[instrument(skip(self))]
    pub fn to_settings(&self) -> GameSettings {
        GameSettings::new(
            PlayerAssignment::new(self.human_marker),
            self.difficulty,
            DifficultyThresholds::new(self.medium_threshold, self.hard_threshold),
            self.first_player,
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
