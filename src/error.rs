//! Error type for level selection and tuning

use std::fmt;

/// Errors surfaced by the fallible core operations
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Level index outside 1..=5
    InvalidLevel(u32),
    /// Level exists but has not been unlocked yet
    LevelLocked { level: u32, unlocked: u32 },
    /// Operation needs a level in progress (or just finished)
    NoActiveLevel,
    /// Continue requested for a level that was not cleared
    LevelNotCleared(u32),
    /// Tuning values failed to parse or validate
    InvalidTuning(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidLevel(level) => write!(f, "invalid level: {} (expected 1-5)", level),
            GameError::LevelLocked { level, unlocked } => {
                write!(f, "level {} is locked (highest unlocked: {})", level, unlocked)
            }
            GameError::NoActiveLevel => write!(f, "no level is active"),
            GameError::LevelNotCleared(level) => write!(f, "level {} has not been cleared", level),
            GameError::InvalidTuning(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::InvalidTuning(e.to_string())
    }
}
