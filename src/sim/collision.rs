//! Collision predicates between the player and level entities
//!
//! Layout entities live in world space; the player lives in screen space.
//! Every check converts the entity with `-camera_offset` first.

use super::rect::Rect;
use super::state::{Collectible, Hole, Obstacle};
use crate::screen_x;

/// Player body touches an uncollected collectible.
///
/// Plain rectangle overlap; there is no extra limit on how far the
/// collectible may sit to the left of the player.
pub fn touches_collectible(player: &Rect, collectible: &Collectible, camera_offset: i32) -> bool {
    !collectible.collected && player.intersects(&collectible.rect.offset_x(-camera_offset))
}

/// Player body touches an obstacle's narrowed hitbox
pub fn hits_obstacle(player: &Rect, obstacle: &Obstacle, camera_offset: i32) -> bool {
    player.intersects(&obstacle.hitbox().offset_x(-camera_offset))
}

/// Player's ground x lies inside a hole's lethal zone
pub fn over_hole(player_x: i32, hole: &Hole, camera_offset: i32, margin: i32) -> bool {
    let (start, end) = hole.lethal_span(margin);
    let start = screen_x(start, camera_offset);
    let end = screen_x(end, camera_offset);
    player_x >= start && player_x < end
}

/// Index of the first hole whose lethal zone contains the player's ground x
pub fn hole_under(player_x: i32, holes: &[Hole], camera_offset: i32, margin: i32) -> Option<usize> {
    holes
        .iter()
        .position(|hole| over_hole(player_x, hole, camera_offset, margin))
}

/// World-space rectangle overlaps a hole's full span
pub fn overlaps_hole(rect: &Rect, hole: &Hole) -> bool {
    rect.overlaps_span(hole.x, hole.end())
}

/// Player has crossed the finish line
pub fn finish_reached(camera_offset: i32, player_x: i32, level_length: i32) -> bool {
    camera_offset + player_x >= level_length
}
