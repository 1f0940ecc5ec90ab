//! Level life-cycle for a front end
//!
//! The session owns the active layout and world state, the highest unlocked
//! level and the retry/continue/menu transitions. A shell drives it with
//! `tick` at a fixed rate and draws `snapshot`.

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{
    LevelLayout, Outcome, RenderSnapshot, TickInput, TickResult, WorldState, autopilot_input,
    generate_level, tick,
};
use crate::tuning::Tuning;

/// Which screen the shell should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Main menu / level select
    Menu,
    /// A level is running or showing its end-of-level result
    Playing,
}

/// Layout and state of the level being played
#[derive(Debug, Clone)]
struct ActiveLevel {
    layout: LevelLayout,
    state: WorldState,
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    /// Highest level that may be started; never decreases
    unlocked: u32,
    active: Option<ActiveLevel>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            unlocked: MIN_LEVEL,
            active: None,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn screen(&self) -> Screen {
        if self.active.is_some() {
            Screen::Playing
        } else {
            Screen::Menu
        }
    }

    /// Highest level that can be started
    pub fn unlocked_level(&self) -> u32 {
        self.unlocked
    }

    /// Whether a level-select entry should be enabled
    pub fn is_unlocked(&self, level: u32) -> bool {
        (MIN_LEVEL..=self.unlocked).contains(&level)
    }

    pub fn current_level(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.layout.level)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.active.as_ref().map(|a| a.state.outcome)
    }

    pub fn percent(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.state.percent())
    }

    pub fn world(&self) -> Option<&WorldState> {
        self.active.as_ref().map(|a| &a.state)
    }

    pub fn layout(&self) -> Option<&LevelLayout> {
        self.active.as_ref().map(|a| &a.layout)
    }

    /// Start a level from the level-select screen
    pub fn start_level(&mut self, level: u32) -> Result<(), GameError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            log::warn!("Rejected start of level {}: out of range", level);
            return Err(GameError::InvalidLevel(level));
        }
        if level > self.unlocked {
            log::warn!("Rejected start of level {}: locked", level);
            return Err(GameError::LevelLocked {
                level,
                unlocked: self.unlocked,
            });
        }

        let layout = generate_level(level)?;
        let state = WorldState::new(&layout, &self.tuning);
        log::info!("Level {} started (health {})", level, state.player.health);
        self.active = Some(ActiveLevel { layout, state });
        Ok(())
    }

    /// Restart the current level from scratch
    pub fn retry_current_level(&mut self) -> Result<(), GameError> {
        let level = self.current_level().ok_or(GameError::NoActiveLevel)?;
        log::info!("Retrying level {}", level);
        self.start_level(level)
    }

    /// Continue after a cleared level. Returns the screen to show next.
    pub fn advance_to_next_level(&mut self) -> Result<Screen, GameError> {
        let active = self.active.as_ref().ok_or(GameError::NoActiveLevel)?;
        let level = active.layout.level;
        if active.state.outcome != Outcome::Cleared {
            log::warn!("Rejected continue: level {} not cleared", level);
            return Err(GameError::LevelNotCleared(level));
        }

        if level >= MAX_LEVEL {
            log::info!("Final level cleared, returning to menu");
            self.return_to_menu();
        } else {
            self.start_level(level + 1)?;
        }
        Ok(self.screen())
    }

    /// Leave the current level; the unlock watermark is kept
    pub fn return_to_menu(&mut self) {
        if let Some(level) = self.current_level() {
            log::info!("Leaving level {} for the menu", level);
        }
        self.active = None;
    }

    /// Advance the active level by one tick
    pub fn tick(&mut self, input: &TickInput) -> Result<TickResult, GameError> {
        let active = self.active.as_mut().ok_or(GameError::NoActiveLevel)?;
        let was_running = !active.state.outcome.is_terminal();
        let result = tick(&mut active.state, &active.layout, input, &self.tuning);

        if was_running && result.outcome.is_terminal() {
            let state = &active.state;
            log::info!(
                "Level {} {:?} after {} ticks: {}/{} collected ({:.0}%), health {}, reason {:?}",
                state.level,
                state.outcome,
                state.time_ticks,
                state.collected,
                state.required,
                state.percent(),
                state.player.health,
                state.fail_reason
            );
            if result.outcome == Outcome::Cleared && state.level < MAX_LEVEL {
                let next = state.level + 1;
                self.unlock(next);
            }
        }

        Ok(result)
    }

    /// Input the demo autopilot would give this tick
    pub fn autopilot_input(&self) -> TickInput {
        self.active
            .as_ref()
            .map(|a| autopilot_input(&a.state, &a.layout, &self.tuning))
            .unwrap_or_default()
    }

    /// Screen-space view of the active level
    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.active
            .as_ref()
            .map(|a| RenderSnapshot::capture(&a.state, &a.layout))
    }

    /// Raise the watermark; never lowers it
    fn unlock(&mut self, level: u32) {
        let level = level.min(MAX_LEVEL);
        if level > self.unlocked {
            self.unlocked = level;
            log::info!("Level {} unlocked", level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Put the active level one tick from the finish line with `collected` items
    fn finish_with(session: &mut Session, collected: u32) -> Outcome {
        let active = session.active.as_mut().unwrap();
        active.layout.obstacles.clear();
        active.layout.holes.clear();
        active.state.collected = collected;
        active.state.camera_offset =
            active.layout.level_length - active.state.player.x - active.layout.scroll_speed;
        session.tick(&TickInput::default()).unwrap().outcome
    }

    #[test]
    fn test_starts_on_menu_with_level_one_unlocked() {
        let session = Session::default();
        assert_eq!(session.screen(), Screen::Menu);
        assert_eq!(session.unlocked_level(), 1);
        assert!(session.is_unlocked(1));
        assert!(!session.is_unlocked(2));
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_start_level_validation() {
        let mut session = Session::default();
        assert_eq!(session.start_level(0), Err(GameError::InvalidLevel(0)));
        assert_eq!(session.start_level(6), Err(GameError::InvalidLevel(6)));
        assert_eq!(
            session.start_level(2),
            Err(GameError::LevelLocked {
                level: 2,
                unlocked: 1
            })
        );
        assert_eq!(session.screen(), Screen::Menu);

        session.start_level(1).unwrap();
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(session.current_level(), Some(1));
        assert_eq!(session.outcome(), Some(Outcome::InProgress));
    }

    #[test]
    fn test_operations_need_active_level() {
        let mut session = Session::default();
        assert_eq!(session.retry_current_level(), Err(GameError::NoActiveLevel));
        assert_eq!(session.advance_to_next_level(), Err(GameError::NoActiveLevel));
        assert_eq!(
            session.tick(&TickInput::default()),
            Err(GameError::NoActiveLevel)
        );
        assert_eq!(session.autopilot_input(), TickInput::default());
    }

    #[test]
    fn test_clear_unlocks_next_level() {
        let mut session = Session::default();
        session.start_level(1).unwrap();
        assert_eq!(finish_with(&mut session, 6), Outcome::Cleared);
        assert_eq!(session.unlocked_level(), 2);

        assert_eq!(session.advance_to_next_level(), Ok(Screen::Playing));
        assert_eq!(session.current_level(), Some(2));
        let world = session.world().unwrap();
        assert_eq!(world.player.health, MAX_HEALTH);
        assert_eq!(world.collected, 0);
        assert_eq!(world.required, 12);
    }

    #[test]
    fn test_failed_attempts_keep_watermark() {
        let mut session = Session::default();
        session.start_level(1).unwrap();
        finish_with(&mut session, 8);
        assert_eq!(session.unlocked_level(), 2);

        session.retry_current_level().unwrap();
        assert_eq!(finish_with(&mut session, 5), Outcome::Failed);
        assert_eq!(session.unlocked_level(), 2);
        assert_eq!(
            session.advance_to_next_level(),
            Err(GameError::LevelNotCleared(1))
        );

        session.return_to_menu();
        assert_eq!(session.screen(), Screen::Menu);
        assert_eq!(session.unlocked_level(), 2);
    }

    #[test]
    fn test_replaying_lower_level_does_not_lower_watermark() {
        let mut session = Session::default();
        session.unlocked = 4;
        session.start_level(1).unwrap();
        finish_with(&mut session, 8);
        assert_eq!(session.unlocked_level(), 4);
    }

    #[test]
    fn test_retry_resets_attempt() {
        let mut session = Session::default();
        session.start_level(1).unwrap();
        for _ in 0..50 {
            session.tick(&TickInput::default()).unwrap();
        }
        {
            let active = session.active.as_mut().unwrap();
            active.state.player.health = 20;
            active.state.collected = 3;
        }
        session.retry_current_level().unwrap();
        let world = session.world().unwrap();
        assert_eq!(world.camera_offset, 0);
        assert_eq!(world.player.health, MAX_HEALTH);
        assert_eq!(world.collected, 0);
        assert!(world.collectibles.iter().all(|c| !c.collected));
    }

    #[test]
    fn test_final_level_continue_returns_to_menu() {
        let mut session = Session::default();
        session.unlocked = MAX_LEVEL;
        session.start_level(MAX_LEVEL).unwrap();
        assert_eq!(finish_with(&mut session, 30), Outcome::Cleared);
        assert_eq!(session.unlocked_level(), MAX_LEVEL);
        assert_eq!(session.advance_to_next_level(), Ok(Screen::Menu));
        assert_eq!(session.current_level(), None);
    }

    #[test]
    fn test_custom_start_health() {
        let tuning = Tuning {
            start_health: 30,
            ..Default::default()
        };
        let mut session = Session::new(tuning);
        session.start_level(1).unwrap();
        assert_eq!(session.world().unwrap().player.health, 30);
        assert_eq!(session.snapshot().unwrap().health, 30);
    }
}
