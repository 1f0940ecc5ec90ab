//! Idle/demo mode - the game plays itself
//!
//! The autopilot never nudges; it only decides when to jump. Because `tick`
//! is pure over a cloned state, it plays candidate futures forward: a jump
//! after each delay up to `MAX_JUMP_DELAY`, a follow-up jump planned the same
//! way after landing, or no jump at all. It jumps now when jumping now is at
//! least as good as every alternative.

use super::level::LevelLayout;
use super::state::{Outcome, WorldState};
use super::tick::{TickInput, tick};
use crate::consts::VIEW_WIDTH;
use crate::tuning::Tuning;

/// Longest wait (in ticks) before a planned jump
pub const MAX_JUMP_DELAY: u32 = 8;
/// Consecutive jumps planned ahead
pub const PLAN_DEPTH: u32 = 2;
/// Health a collectible is worth when ranking futures (one hit)
const COLLECT_VALUE: i32 = 10;

/// How a simulated future ended up; survival first, then score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Forecast {
    survived: bool,
    score: i32,
}

impl Forecast {
    fn of(state: &WorldState) -> Self {
        Self {
            survived: state.outcome != Outcome::Failed,
            score: state.player.health + COLLECT_VALUE * state.collected as i32,
        }
    }
}

/// Run up to `ticks` ticks without input
fn run_grounded(sim: &mut WorldState, layout: &LevelLayout, tuning: &Tuning, ticks: u32) {
    for _ in 0..ticks {
        if tick(sim, layout, &TickInput::default(), tuning)
            .outcome
            .is_terminal()
        {
            break;
        }
    }
}

/// Wait `delay` ticks, jump, and ride the jump out until landing
fn jump_after(sim: &mut WorldState, layout: &LevelLayout, tuning: &Tuning, delay: u32) {
    for _ in 0..delay {
        if tick(sim, layout, &TickInput::default(), tuning)
            .outcome
            .is_terminal()
        {
            return;
        }
    }
    let jump = TickInput {
        jump: true,
        ..Default::default()
    };
    tick(sim, layout, &jump, tuning);
    while !sim.player.is_grounded() && !sim.outcome.is_terminal() {
        tick(sim, layout, &TickInput::default(), tuning);
    }
}

/// Best reachable forecast from a grounded state and the jump delay that
/// leads to it (`None` means staying on the ground wins)
fn plan(
    state: &WorldState,
    layout: &LevelLayout,
    tuning: &Tuning,
    depth: u32,
) -> (Forecast, Option<u32>) {
    let forecast_jump = |delay: u32| {
        let mut sim = state.clone();
        jump_after(&mut sim, layout, tuning, delay);
        if depth > 1 && !sim.outcome.is_terminal() {
            plan(&sim, layout, tuning, depth - 1).0
        } else {
            Forecast::of(&sim)
        }
    };

    // Ties go to the earliest jump
    let mut best = forecast_jump(0);
    let mut best_delay = 0;
    for delay in 1..=MAX_JUMP_DELAY {
        let forecast = forecast_jump(delay);
        if forecast > best {
            best = forecast;
            best_delay = delay;
        }
    }

    let mut sim = state.clone();
    run_grounded(&mut sim, layout, tuning, MAX_JUMP_DELAY + 1);
    let stay = Forecast::of(&sim);
    if stay > best {
        (stay, None)
    } else {
        (best, Some(best_delay))
    }
}

/// Anything between the player and the right edge of the screen worth reacting to
fn anything_ahead(state: &WorldState, layout: &LevelLayout) -> bool {
    let start = state.camera_offset + state.player.x;
    let end = state.camera_offset + VIEW_WIDTH;
    layout
        .obstacles
        .iter()
        .any(|o| o.rect.overlaps_span(start, end))
        || layout.holes.iter().any(|h| h.x < end && start < h.end())
        || state
            .collectibles
            .iter()
            .any(|c| !c.collected && c.rect.overlaps_span(start, end))
}

/// Choose this tick's input
pub fn autopilot_input(state: &WorldState, layout: &LevelLayout, tuning: &Tuning) -> TickInput {
    if state.outcome.is_terminal()
        || !state.player.is_grounded()
        || !anything_ahead(state, layout)
    {
        return TickInput::default();
    }

    let (_, delay) = plan(state, layout, tuning, PLAN_DEPTH);
    TickInput {
        jump: delay == Some(0),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::generate_level;
    use crate::sim::level::{COLLECTIBLE_HIGH_Y, COLLECTIBLE_SIZE, SAFE_LANDING_GAP};
    use crate::sim::state::{Collectible, GameEvent, Hole, Obstacle};
    use crate::tuning::ObstacleSize;

    fn run(layout: &LevelLayout, tuning: &Tuning, ticks: u32) -> (WorldState, Vec<GameEvent>) {
        let mut state = WorldState::new(layout, tuning);
        let mut events = Vec::new();
        for _ in 0..ticks {
            let input = autopilot_input(&state, layout, tuning);
            let result = tick(&mut state, layout, &input, tuning);
            events.extend(result.events);
            if result.outcome.is_terminal() {
                break;
            }
        }
        (state, events)
    }

    #[test]
    fn test_no_jump_on_open_ground() {
        let tuning = Tuning::default();
        let mut layout = generate_level(1).unwrap();
        layout.obstacles.clear();
        layout.collectibles.clear();
        let state = WorldState::new(&layout, &tuning);
        assert!(!autopilot_input(&state, &layout, &tuning).jump);
    }

    #[test]
    fn test_no_input_while_airborne() {
        let tuning = Tuning::default();
        let layout = generate_level(1).unwrap();
        let mut state = WorldState::new(&layout, &tuning);
        state.player.start_jump();
        assert_eq!(autopilot_input(&state, &layout, &tuning), TickInput::default());
    }

    #[test]
    fn test_jumps_over_obstacle() {
        let tuning = Tuning::default();
        let mut layout = generate_level(5).unwrap();
        layout.collectibles.clear();
        layout.holes.clear();
        layout.obstacles = vec![Obstacle::new(700, ObstacleSize::Large)];

        let (state, events) = run(&layout, &tuning, 100);
        assert!(events.contains(&GameEvent::Jumped));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Hit { .. })));
        assert_eq!(state.player.health, MAX_HEALTH);
    }

    #[test]
    fn test_jumps_over_hole() {
        let tuning = Tuning::default();
        let mut layout = generate_level(3).unwrap();
        layout.collectibles.clear();
        layout.obstacles.clear();
        layout.holes = vec![Hole::new(800, 90)];

        let (state, _) = run(&layout, &tuning, 100);
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_rejumps_after_collecting() {
        let tuning = Tuning::default();
        let mut layout = generate_level(2).unwrap();
        layout.holes.clear();
        layout.collectibles = vec![Collectible::new(1200, COLLECTIBLE_HIGH_Y, COLLECTIBLE_SIZE)];
        // Obstacle right at the edge of the landing gap
        layout.obstacles = vec![Obstacle::new(1200 + SAFE_LANDING_GAP, ObstacleSize::Small)];

        let (state, events) = run(&layout, &tuning, 250);
        assert_eq!(state.collected, 1);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Hit { .. })));
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_clears_first_level() {
        let tuning = Tuning::default();
        let layout = generate_level(1).unwrap();
        let (state, _) = run(&layout, &tuning, 2000);
        assert_eq!(state.outcome, Outcome::Cleared);
    }

    #[test]
    fn test_clears_second_level() {
        let tuning = Tuning::default();
        let layout = generate_level(2).unwrap();
        let (state, _) = run(&layout, &tuning, 3000);
        assert_eq!(state.outcome, Outcome::Cleared);
        assert!(state.percent() >= tuning.clear_percent);
    }
}
