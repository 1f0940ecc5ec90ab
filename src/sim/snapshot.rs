//! Screen-space render snapshot
//!
//! Everything a front end needs to draw one frame, already converted to
//! screen coordinates and culled to the viewport.

use glam::IVec2;
use serde::Serialize;

use super::level::LevelLayout;
use super::rect::Rect;
use super::state::{FailReason, Outcome, TRAIL_LENGTH, WorldState};
use crate::consts::*;

/// Horizontal spacing between trail dots
pub const TRAIL_SPACING: i32 = 18;
/// Trail dot diameter
pub const TRAIL_DOT_SIZE: i32 = 18;

/// An obstacle as drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObstacleSprite {
    pub rect: Rect,
    /// Left base, apex, right base
    pub triangle: [IVec2; 3],
}

/// One frame of renderable state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub level: u32,
    pub camera_offset: i32,
    pub player: Rect,
    pub jump_height: i32,
    pub blink: bool,
    pub obstacles: Vec<ObstacleSprite>,
    /// Uncollected only
    pub collectibles: Vec<Rect>,
    /// Gaps in the ground band
    pub holes: Vec<Rect>,
    /// Screen x of the finish line while visible
    pub finish_x: Option<i32>,
    /// Top-left corners of trail dots, newest first
    pub trail: Vec<IVec2>,
    pub health: i32,
    pub collected: u32,
    pub required: u32,
    pub percent: f64,
    pub outcome: Outcome,
    pub fail_reason: Option<FailReason>,
}

fn visible(rect: &Rect) -> bool {
    rect.right() > 0 && rect.x() < VIEW_WIDTH
}

impl RenderSnapshot {
    pub fn capture(state: &WorldState, layout: &LevelLayout) -> Self {
        let dx = -state.camera_offset;
        let player = state.player.rect();

        let obstacles = layout
            .obstacles
            .iter()
            .map(|o| ObstacleSprite {
                rect: o.rect.offset_x(dx),
                triangle: o.triangle(dx),
            })
            .filter(|s| visible(&s.rect))
            .collect();

        let collectibles = state
            .collectibles
            .iter()
            .filter(|c| !c.collected)
            .map(|c| c.rect.offset_x(dx))
            .filter(visible)
            .collect();

        let holes = layout
            .holes
            .iter()
            .map(|h| Rect::new(h.x + dx, GROUND_Y, h.width, GROUND_DEPTH))
            .filter(visible)
            .collect();

        let finish = layout.level_length + dx;
        let finish_x = (finish > 0 && finish < VIEW_WIDTH).then_some(finish);

        let trail = (0..TRAIL_LENGTH)
            .map(|i| {
                let x = player.x() - (i as i32 + 1) * TRAIL_SPACING;
                let y = PLAYER_TOP_Y - state.trail[i] + PLAYER_SIZE / 2 - TRAIL_DOT_SIZE / 2;
                IVec2::new(x, y)
            })
            .collect();

        Self {
            level: state.level,
            camera_offset: state.camera_offset,
            player,
            jump_height: state.player.jump_height,
            blink: state.blinking(),
            obstacles,
            collectibles,
            holes,
            finish_x,
            trail,
            health: state.player.health,
            collected: state.collected,
            required: state.required,
            percent: state.percent(),
            outcome: state.outcome,
            fail_reason: state.fail_reason,
        }
    }
}
