//! Fixed timestep simulation tick
//!
//! Core game loop that advances a level attempt deterministically.

use super::collision::{finish_reached, hits_obstacle, hole_under, touches_collectible};
use super::level::LevelLayout;
use super::state::{FailReason, GameEvent, Outcome, WorldState};
use crate::tuning::Tuning;

/// Input sampled at a tick boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Nudge left
    pub left: bool,
    /// Nudge right
    pub right: bool,
    /// Start a jump (ignored while airborne)
    pub jump: bool,
}

/// What a tick produced
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: Outcome,
    pub events: Vec<GameEvent>,
}

/// Advance the world by one fixed timestep
pub fn tick(
    state: &mut WorldState,
    layout: &LevelLayout,
    input: &TickInput,
    tuning: &Tuning,
) -> TickResult {
    let mut events = Vec::new();

    // Terminal outcomes halt the simulation until the level is restarted
    if state.outcome.is_terminal() {
        return TickResult {
            outcome: state.outcome,
            events,
        };
    }

    state.time_ticks += 1;
    state.camera_offset += layout.scroll_speed;
    let camera = state.camera_offset;

    // Jump
    if input.jump && state.player.start_jump() {
        events.push(GameEvent::Jumped);
    }
    if state.player.advance_jump(tuning.jump_step, tuning.jump_peak) {
        events.push(GameEvent::Landed);
    }

    // Horizontal nudges
    if input.left {
        state.player.nudge(-tuning.nudge_step);
    }
    if input.right {
        state.player.nudge(tuning.nudge_step);
    }

    let body = state.player.rect();

    // Collectibles
    for (index, collectible) in state.collectibles.iter_mut().enumerate() {
        if touches_collectible(&body, collectible, camera) && collectible.collect() {
            state.collected += 1;
            events.push(GameEvent::Collected {
                index,
                total: state.collected,
            });
        }
    }

    // Obstacles: one hit per blink window
    let touching = layout
        .obstacles
        .iter()
        .any(|obstacle| hits_obstacle(&body, obstacle, camera));
    if touching && !state.blinking() {
        state.player.take_damage(tuning.contact_damage);
        state.blink_ticks = tuning.blink_ticks;
        events.push(GameEvent::Hit {
            damage: tuning.contact_damage,
            health: state.player.health,
        });
        log::trace!(
            "Level {} tick {}: hit, health {}",
            state.level,
            state.time_ticks,
            state.player.health
        );
    }
    state.blink_ticks = state.blink_ticks.saturating_sub(1);

    // Death
    if state.player.health <= 0 {
        state.player.health = 0;
        state.finish(Outcome::Failed, Some(FailReason::OutOfHealth));
        events.push(GameEvent::Died);
        return TickResult {
            outcome: state.outcome,
            events,
        };
    }

    // Holes only swallow a grounded player
    if state.player.jump_height == 0 {
        if let Some(index) = hole_under(state.player.x, &layout.holes, camera, tuning.hole_margin) {
            state.finish(Outcome::Failed, Some(FailReason::FellInHole));
            events.push(GameEvent::FellInHole { index });
            return TickResult {
                outcome: state.outcome,
                events,
            };
        }
    }

    // Finish line
    if finish_reached(camera, state.player.x, layout.level_length) {
        let percent = state.percent();
        let cleared = percent >= tuning.clear_percent;
        if cleared {
            state.finish(Outcome::Cleared, None);
        } else {
            state.finish(Outcome::Failed, Some(FailReason::TooFewCollectibles));
        }
        events.push(GameEvent::Finished { percent, cleared });
        return TickResult {
            outcome: state.outcome,
            events,
        };
    }

    state.record_trail();

    TickResult {
        outcome: Outcome::InProgress,
        events,
    }
}
