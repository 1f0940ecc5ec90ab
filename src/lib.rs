//! Dino Run - a side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level layout, jump physics, collisions)
//! - `session`: Level life-cycle and unlock progression for a front end
//! - `tuning`: Data-driven game balance
//! - `error`: Error type shared by the fallible operations

pub mod error;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use session::{Screen, Session};
pub use tuning::{LevelConfig, ObstacleSize, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (20 ms)
    pub const TICK_MS: u64 = 20;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: i32 = 1000 / TICK_MS as i32;

    /// Viewport dimensions
    pub const VIEW_WIDTH: i32 = 800;
    pub const VIEW_HEIGHT: i32 = 400;

    /// Ground line (screen y of the running surface) and its band depth
    pub const GROUND_Y: i32 = 290;
    pub const GROUND_DEPTH: i32 = 30;

    /// Player is a 40x40 body whose top sits at PLAYER_TOP_Y when grounded
    pub const PLAYER_SIZE: i32 = 40;
    pub const PLAYER_TOP_Y: i32 = GROUND_Y - PLAYER_SIZE;
    pub const PLAYER_START_X: i32 = 100;

    /// Health ceiling
    pub const MAX_HEALTH: i32 = 50;

    /// Playable level range
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 5;
}

/// Convert a world-space x to screen space for the given camera offset
#[inline]
pub fn screen_x(world_x: i32, camera_offset: i32) -> i32 {
    world_x - camera_offset
}

/// Percentage of required collectibles gathered.
///
/// A level that requires nothing counts as fully collected.
pub fn collection_percent(collected: u32, required: u32) -> f64 {
    if required == 0 {
        return 100.0;
    }
    collected as f64 / required as f64 * 100.0
}
