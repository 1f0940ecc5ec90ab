//! Data-driven game balance
//!
//! `LevelConfig` is the fixed per-tier table that drives layout generation.
//! `Tuning` holds the gameplay constants a front end may override from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Obstacle size variants used by the per-level size cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl ObstacleSize {
    /// (width, height) in world units
    pub fn dimensions(self) -> (i32, i32) {
        match self {
            ObstacleSize::Small => (40, 40),
            ObstacleSize::Medium => (60, 50),
            ObstacleSize::Large => (80, 60),
        }
    }
}

use ObstacleSize::{Large as L, Medium as M, Small as S};

/// Static per-level parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub level: u32,
    pub obstacle_count: usize,
    pub duration_secs: i32,
    pub scroll_speed: i32,
    pub hole_count: usize,
    pub required_collectibles: usize,
    /// Size of obstacle `i` is `size_cycle[i % size_cycle.len()]`
    pub size_cycle: &'static [ObstacleSize],
}

static LEVEL_TABLE: [LevelConfig; 5] = [
    LevelConfig {
        level: 1,
        obstacle_count: 14,
        duration_secs: 20,
        scroll_speed: 7,
        hole_count: 0,
        required_collectibles: 8,
        size_cycle: &[S],
    },
    LevelConfig {
        level: 2,
        obstacle_count: 20,
        duration_secs: 30,
        scroll_speed: 9,
        hole_count: 0,
        required_collectibles: 12,
        size_cycle: &[S, S, M, S, S],
    },
    LevelConfig {
        level: 3,
        obstacle_count: 26,
        duration_secs: 40,
        scroll_speed: 11,
        hole_count: 4,
        required_collectibles: 16,
        size_cycle: &[S, M, S, L, S, M, S, S, S, L, S, S],
    },
    LevelConfig {
        level: 4,
        obstacle_count: 32,
        duration_secs: 50,
        scroll_speed: 13,
        hole_count: 5,
        required_collectibles: 22,
        size_cycle: &[L, S, M, L, S, S, L, S, S, L, M, S],
    },
    LevelConfig {
        level: 5,
        obstacle_count: 38,
        duration_secs: 60,
        scroll_speed: 15,
        hole_count: 6,
        required_collectibles: 30,
        size_cycle: &[L, S, L, M, L, S],
    },
];

impl LevelConfig {
    /// Look up the config for a level (1-5)
    pub fn get(level: u32) -> Result<&'static LevelConfig, GameError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(GameError::InvalidLevel(level));
        }
        Ok(&LEVEL_TABLE[(level - MIN_LEVEL) as usize])
    }

    /// World distance from start to the finish line
    pub fn level_length(&self) -> i32 {
        self.scroll_speed * self.duration_secs * TICKS_PER_SECOND
    }

    pub fn obstacle_size(&self, index: usize) -> ObstacleSize {
        self.size_cycle[index % self.size_cycle.len()]
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Health at the start of every attempt
    pub start_health: i32,
    /// Jump height change per tick
    pub jump_step: i32,
    /// Jump apex height
    pub jump_peak: i32,
    /// Horizontal nudge per left/right input
    pub nudge_step: i32,
    /// Damage per obstacle contact
    pub contact_damage: i32,
    /// Invulnerability window after a hit (ticks)
    pub blink_ticks: u32,
    /// Safe margin on each edge of a hole
    pub hole_margin: i32,
    /// Minimum collection percentage to clear a level
    pub clear_percent: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_health: MAX_HEALTH,
            jump_step: 15,
            jump_peak: 180,
            nudge_step: 20,
            contact_damage: 10,
            blink_ticks: 8,
            hole_margin: 25,
            clear_percent: 70.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_HEALTH).contains(&self.start_health) {
            return Err(GameError::InvalidTuning(format!(
                "start_health must be in 1..={}, got {}",
                MAX_HEALTH, self.start_health
            )));
        }
        if self.jump_step <= 0 || self.jump_peak < self.jump_step {
            return Err(GameError::InvalidTuning(format!(
                "jump_step ({}) must be positive and no larger than jump_peak ({})",
                self.jump_step, self.jump_peak
            )));
        }
        if self.nudge_step < 0 || self.contact_damage < 0 || self.hole_margin < 0 {
            return Err(GameError::InvalidTuning(
                "nudge_step, contact_damage and hole_margin must not be negative".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.clear_percent) {
            return Err(GameError::InvalidTuning(format!(
                "clear_percent must be within 0-100, got {}",
                self.clear_percent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_lengths() {
        let lengths: Vec<i32> = (1..=5)
            .map(|l| LevelConfig::get(l).unwrap().level_length())
            .collect();
        assert_eq!(lengths, vec![7000, 13500, 22000, 32500, 45000]);
    }

    #[test]
    fn test_invalid_level() {
        assert_eq!(LevelConfig::get(0), Err(GameError::InvalidLevel(0)));
        assert_eq!(LevelConfig::get(6), Err(GameError::InvalidLevel(6)));
    }

    #[test]
    fn test_size_cycles_match_level_rules() {
        // Level 4: every third obstacle large, else i % 4 == 2 medium
        let cfg = LevelConfig::get(4).unwrap();
        for i in 0..cfg.obstacle_count {
            let expected = if i % 3 == 0 {
                ObstacleSize::Large
            } else if i % 4 == 2 {
                ObstacleSize::Medium
            } else {
                ObstacleSize::Small
            };
            assert_eq!(cfg.obstacle_size(i), expected, "obstacle {}", i);
        }

        // Level 5: even large, else multiples of three medium
        let cfg = LevelConfig::get(5).unwrap();
        for i in 0..cfg.obstacle_count {
            let expected = if i % 2 == 0 {
                ObstacleSize::Large
            } else if i % 3 == 0 {
                ObstacleSize::Medium
            } else {
                ObstacleSize::Small
            };
            assert_eq!(cfg.obstacle_size(i), expected, "obstacle {}", i);
        }
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "contact_damage": 5 }"#).unwrap();
        assert_eq!(tuning.contact_damage, 5);
        assert_eq!(tuning.jump_peak, 180);
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let tuning = Tuning {
            jump_step: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());

        assert!(Tuning::from_json(r#"{ "start_health": 80 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "clear_percent": 120.0 }"#).is_err());
        assert!(Tuning::from_json("not json").is_err());
    }
}
