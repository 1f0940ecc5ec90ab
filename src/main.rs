//! Dino Run headless driver
//!
//! Plays the levels with the autopilot on a logical fixed timestep and logs
//! how each attempt ends. A windowed shell drives `Session` the same way.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dino_run::consts::*;
use dino_run::sim::Outcome;
use dino_run::{GameError, Screen, Session, Tuning};

/// Upper bound on ticks for one attempt (longest level is 3000 ticks)
const MAX_TICKS_PER_LEVEL: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(name = "dino-run")]
#[command(about = "Play Dino Run headless with the autopilot")]
struct Cli {
    /// Last level to play; levels are unlocked in order starting from 1
    #[arg(
        value_name = "LEVEL",
        default_value_t = MAX_LEVEL,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_LEVEL)..=i64::from(MAX_LEVEL))
    )]
    level: u32,
    /// JSON file overriding gameplay tuning
    #[arg(value_name = "TUNING_JSON")]
    tuning: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::info!("Dino Run (headless) starting...");
    run(&cli)
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tuning file {}", path.display()))?;
    let tuning = Tuning::from_json(&json)
        .with_context(|| format!("Invalid tuning file {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

fn run(cli: &Cli) -> Result<()> {
    let tuning = load_tuning(cli.tuning.as_ref())?;
    let mut session = Session::new(tuning);
    session.start_level(MIN_LEVEL)?;

    loop {
        let level = session.current_level().ok_or(GameError::NoActiveLevel)?;
        let outcome = play(&mut session)?;

        if let Some(snapshot) = session.snapshot() {
            log::debug!("Final frame: {}", serde_json::to_string(&snapshot)?);
        }

        if outcome != Outcome::Cleared {
            log::warn!(
                "Stopped at level {} ({:.0}% collected)",
                level,
                session.percent().unwrap_or(0.0)
            );
            break;
        }
        if level >= cli.level {
            break;
        }
        if session.advance_to_next_level()? == Screen::Menu {
            break;
        }
    }

    session.return_to_menu();
    log::info!("Highest unlocked level: {}", session.unlocked_level());
    Ok(())
}

/// Run the active level to its end
fn play(session: &mut Session) -> Result<Outcome, GameError> {
    for _ in 0..MAX_TICKS_PER_LEVEL {
        let input = session.autopilot_input();
        let result = session.tick(&input)?;
        for event in &result.events {
            log::debug!("{:?}", event);
        }
        if result.outcome.is_terminal() {
            return Ok(result.outcome);
        }
    }
    Ok(session.outcome().unwrap_or_default())
}
