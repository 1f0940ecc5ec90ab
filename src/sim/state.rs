//! World state and entity types
//!
//! Everything the engine mutates between ticks lives in `WorldState`.
//! Layout entities (`Obstacle`, `Hole`) are immutable once generated.

use serde::{Deserialize, Serialize};

use super::level::LevelLayout;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::{ObstacleSize, Tuning};

/// Jump state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Rising,
    Falling,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Screen x of the left edge (the world scrolls underneath)
    pub x: i32,
    /// Height of the feet above the ground line
    pub jump_height: i32,
    pub jump: JumpPhase,
    pub health: i32,
}

impl Player {
    pub fn new(health: i32) -> Self {
        Self {
            x: PLAYER_START_X,
            jump_height: 0,
            jump: JumpPhase::Grounded,
            health: health.clamp(0, MAX_HEALTH),
        }
    }

    /// Screen-space body rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x,
            PLAYER_TOP_Y - self.jump_height,
            PLAYER_SIZE,
            PLAYER_SIZE,
        )
    }

    pub fn is_grounded(&self) -> bool {
        self.jump == JumpPhase::Grounded
    }

    /// Begin a jump. Returns false if already airborne.
    pub fn start_jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.jump = JumpPhase::Rising;
        true
    }

    /// Advance the jump by one tick. Returns true on the tick the player lands.
    pub fn advance_jump(&mut self, step: i32, peak: i32) -> bool {
        match self.jump {
            JumpPhase::Grounded => false,
            JumpPhase::Rising => {
                self.jump_height += step;
                if self.jump_height >= peak {
                    self.jump_height = peak;
                    self.jump = JumpPhase::Falling;
                }
                false
            }
            JumpPhase::Falling => {
                self.jump_height -= step;
                if self.jump_height <= 0 {
                    self.jump_height = 0;
                    self.jump = JumpPhase::Grounded;
                    return true;
                }
                false
            }
        }
    }

    /// Shift horizontally, staying inside the viewport
    pub fn nudge(&mut self, dx: i32) {
        self.x = (self.x + dx).clamp(0, VIEW_WIDTH - PLAYER_SIZE);
    }

    /// Apply damage, clamping at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }
}

/// A ground obstacle (rendered as a triangle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// World-space bounds; bottom edge rests on the ground line
    pub rect: Rect,
    pub size: ObstacleSize,
}

impl Obstacle {
    pub fn new(x: i32, size: ObstacleSize) -> Self {
        let (w, h) = size.dimensions();
        Self {
            rect: Rect::new(x, GROUND_Y - h, w, h),
            size,
        }
    }

    /// World-space collision hitbox (centre third, full height)
    pub fn hitbox(&self) -> Rect {
        self.rect.center_third()
    }

    /// Triangle vertices (left base, apex, right base) after applying `dx`
    pub fn triangle(&self, dx: i32) -> [glam::IVec2; 3] {
        let r = self.rect.offset_x(dx);
        [
            glam::IVec2::new(r.x(), r.bottom()),
            glam::IVec2::new(r.x() + r.width() / 2, r.y()),
            glam::IVec2::new(r.right(), r.bottom()),
        ]
    }
}

/// A pickup floating above the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// World-space bounds
    pub rect: Rect,
    pub collected: bool,
}

impl Collectible {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self {
            rect: Rect::new(x, y, size, size),
            collected: false,
        }
    }

    /// Mark collected. Returns true only the first time.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// A pit in the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    /// World-space left edge
    pub x: i32,
    pub width: i32,
}

impl Hole {
    pub fn new(x: i32, width: i32) -> Self {
        Self { x, width }
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.x + self.width
    }

    /// World-space `[start, end)` span where a grounded player falls in
    pub fn lethal_span(&self, margin: i32) -> (i32, i32) {
        (self.x + margin, self.end() - margin)
    }
}

/// Level outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Cleared,
    Failed,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Why a level attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    OutOfHealth,
    FellInHole,
    TooFewCollectibles,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    Collected { index: usize, total: u32 },
    Hit { damage: i32, health: i32 },
    Died,
    FellInHole { index: usize },
    Finished { percent: f64, cleared: bool },
}

/// Number of past jump heights kept for the motion trail
pub const TRAIL_LENGTH: usize = 10;

/// Mutable state of one level attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub level: u32,
    /// Total scrolled distance
    pub camera_offset: i32,
    pub player: Player,
    /// Per-attempt copy of the layout's collectibles
    pub collectibles: Vec<Collectible>,
    pub collected: u32,
    pub required: u32,
    /// Remaining invulnerability ticks after a hit
    pub blink_ticks: u32,
    pub outcome: Outcome,
    pub fail_reason: Option<FailReason>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Past jump heights (newest first), render only
    #[serde(skip)]
    pub trail: [i32; TRAIL_LENGTH],
}

impl WorldState {
    /// Fresh attempt at the given layout
    pub fn new(layout: &LevelLayout, tuning: &Tuning) -> Self {
        Self {
            level: layout.level,
            camera_offset: 0,
            player: Player::new(tuning.start_health),
            collectibles: layout.collectibles.clone(),
            collected: 0,
            required: layout.required_collectibles,
            blink_ticks: 0,
            outcome: Outcome::InProgress,
            fail_reason: None,
            time_ticks: 0,
            trail: [0; TRAIL_LENGTH],
        }
    }

    /// Hit flash active
    pub fn blinking(&self) -> bool {
        self.blink_ticks > 0
    }

    pub fn percent(&self) -> f64 {
        crate::collection_percent(self.collected, self.required)
    }

    /// Record the current jump height at the front of the trail
    pub fn record_trail(&mut self) {
        self.trail.rotate_right(1);
        self.trail[0] = self.player.jump_height;
    }

    /// End the attempt
    pub fn finish(&mut self, outcome: Outcome, reason: Option<FailReason>) {
        self.outcome = outcome;
        self.fail_reason = reason;
    }
}
