//! Deterministic level layout generation
//!
//! Obstacles, holes and collectibles are spread evenly over fixed ranges of
//! the level, then obstacles are pushed right until none sits over a hole or
//! inside the landing gap ahead of a collectible. Collectibles never move.

use serde::{Deserialize, Serialize};

use super::collision::overlaps_hole;
use super::state::{Collectible, Hole, Obstacle};
use crate::error::GameError;
use crate::tuning::LevelConfig;

/// First obstacle x
pub const OBSTACLE_START_X: i32 = 600;
/// Distance before the finish line kept free of newly spread obstacles and holes
pub const END_MARGIN: i32 = 200;
/// First hole x
pub const HOLE_START_X: i32 = 1400;
pub const HOLE_WIDTH: i32 = 90;
/// Gap between a hole's far edge and an obstacle moved out of it
pub const HOLE_CLEARANCE: i32 = 20;
/// Collectibles stay this far from both ends of the level
pub const COLLECTIBLE_MARGIN: i32 = 1200;
pub const COLLECTIBLE_SIZE: i32 = 30;
pub const COLLECTIBLE_HIGH_Y: i32 = 120;
pub const COLLECTIBLE_LOW_Y: i32 = 180;
/// No obstacle may start within this distance ahead of a collectible
pub const SAFE_LANDING_GAP: i32 = 180;

/// Immutable layout of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub level: u32,
    /// World x of the finish line
    pub level_length: i32,
    /// Camera advance per tick
    pub scroll_speed: i32,
    pub required_collectibles: u32,
    /// Sorted by x
    pub obstacles: Vec<Obstacle>,
    /// Sorted by x
    pub holes: Vec<Hole>,
    /// Sorted by x
    pub collectibles: Vec<Collectible>,
}

/// Generate the layout for a level (1-5)
pub fn generate_level(level: u32) -> Result<LevelLayout, GameError> {
    let cfg = LevelConfig::get(level)?;
    let level_length = cfg.level_length();

    // Each hole span lies inside [HOLE_START_X, level_length - END_MARGIN]
    let holes: Vec<Hole> = spread(
        HOLE_START_X,
        level_length - END_MARGIN - HOLE_WIDTH,
        cfg.hole_count,
    )
    .into_iter()
    .map(|x| Hole::new(x, HOLE_WIDTH))
    .collect();

    let mut obstacles: Vec<Obstacle> = spread(
        OBSTACLE_START_X,
        level_length - END_MARGIN,
        cfg.obstacle_count,
    )
    .into_iter()
    .enumerate()
    .map(|(i, x)| Obstacle::new(x, cfg.obstacle_size(i)))
    .collect();

    let collectibles: Vec<Collectible> = spread(
        COLLECTIBLE_MARGIN,
        level_length - COLLECTIBLE_MARGIN,
        cfg.required_collectibles,
    )
    .into_iter()
    .enumerate()
    .map(|(i, x)| {
        let y = if i % 2 == 0 {
            COLLECTIBLE_HIGH_Y
        } else {
            COLLECTIBLE_LOW_Y
        };
        Collectible::new(x, y, COLLECTIBLE_SIZE)
    })
    .collect();

    let moved = resolve_placement(&mut obstacles, &holes, &collectibles);
    obstacles.sort_by_key(|o| o.rect.x());

    log::info!(
        "Level {}: length={}, speed={}, obstacles={} ({} moved), holes={}, collectibles={}",
        level,
        level_length,
        cfg.scroll_speed,
        obstacles.len(),
        moved,
        holes.len(),
        collectibles.len()
    );

    Ok(LevelLayout {
        level,
        level_length,
        scroll_speed: cfg.scroll_speed,
        required_collectibles: cfg.required_collectibles as u32,
        obstacles,
        holes,
        collectibles,
    })
}

/// `count` evenly spaced positions from `start` to `end` inclusive
pub fn spread(start: i32, end: i32, count: usize) -> Vec<i32> {
    debug_assert!(
        count == 0 || end >= start,
        "degenerate range {}..{} for {} items",
        start,
        end,
        count
    );
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let span = (end - start) as i64;
            let last = (n - 1) as i64;
            (0..n as i64)
                .map(|i| start + (span * i / last) as i32)
                .collect()
        }
    }
}

/// Push obstacles right until none overlaps a hole or crowds a collectible.
///
/// Every push moves an obstacle strictly past the feature that caused it, and
/// positions only grow, so each obstacle moves at most once per feature.
/// Returns the number of pushes applied.
fn resolve_placement(
    obstacles: &mut [Obstacle],
    holes: &[Hole],
    collectibles: &[Collectible],
) -> usize {
    let mut moves = 0;
    for obstacle in obstacles.iter_mut() {
        while let Some(target) = conflict_target(obstacle, holes, collectibles) {
            log::trace!("obstacle {} -> {}", obstacle.rect.x(), target);
            obstacle.rect.min.x = target;
            moves += 1;
        }
    }
    moves
}

/// Where an obstacle has to move to escape its current conflict, if any
fn conflict_target(obstacle: &Obstacle, holes: &[Hole], collectibles: &[Collectible]) -> Option<i32> {
    let past_hole = holes
        .iter()
        .filter(|hole| overlaps_hole(&obstacle.rect, hole))
        .map(|hole| hole.end() + HOLE_CLEARANCE)
        .max();
    if past_hole.is_some() {
        return past_hole;
    }

    collectibles
        .iter()
        .filter(|c| crowds_collectible(obstacle.rect.x(), c))
        .map(|c| c.rect.x() + SAFE_LANDING_GAP)
        .max()
}

/// Obstacle starts ahead of the collectible but inside its landing gap
pub fn crowds_collectible(obstacle_x: i32, collectible: &Collectible) -> bool {
    let ahead = obstacle_x - collectible.rect.x();
    ahead > 0 && ahead < SAFE_LANDING_GAP
}
