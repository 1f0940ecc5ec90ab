//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness (layouts are a function of the level index)
//! - Stable iteration order (entities sorted by x)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use level::{LevelLayout, generate_level};
pub use rect::Rect;
pub use snapshot::{ObstacleSprite, RenderSnapshot};
pub use state::{
    Collectible, FailReason, GameEvent, Hole, JumpPhase, Obstacle, Outcome, Player, TRAIL_LENGTH,
    WorldState,
};
pub use tick::{TickInput, TickResult, tick};
