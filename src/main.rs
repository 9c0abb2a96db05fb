//! Swimball entry point
//!
//! Loads settings, builds the default scene and runs the drive loop headless.
//! Usage: `swimball [settings.json]`

use std::process::ExitCode;

use swimball::Settings;
use swimball::driver::{Clock, FixedClock, LogRenderer, ScriptedInput, WallClock, run};
use swimball::sim::{Key, Simulation, TickInput, populate};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Swimball starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    if settings.realtime {
        run_with(&settings, &mut WallClock::new())
    } else {
        run_with(&settings, &mut FixedClock)
    }
}

fn run_with(settings: &Settings, clock: &mut impl Clock) -> ExitCode {
    let mut sim = Simulation::new();
    if let Err(e) = populate(&mut sim, settings) {
        log::error!("Failed to build scene: {e}");
        return ExitCode::FAILURE;
    }

    // Swim toward the ball, then dive through it
    let second = u64::from(settings.fps);
    let mut input = ScriptedInput::new()
        .hold(second, TickInput::with_keys(&[Key::Right, Key::Down]))
        .hold(second, TickInput::with_keys(&[Key::Right, Key::Down, Key::LeftShift]));

    let mut renderer = LogRenderer::new(settings.log_every);
    match run(&mut sim, settings, clock, &mut input, &mut renderer) {
        Ok(summary) => {
            log::info!(
                "Finished after {} frames with {} actors",
                summary.frames,
                summary.actors
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Simulation halted on frame {}: {e}", sim.frame());
            ExitCode::FAILURE
        }
    }
}
