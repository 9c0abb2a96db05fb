//! Drive loop and the collaborators it talks to
//!
//! The loop owns timing, input polling and drawing; the simulation only ever
//! sees `update(dt, input)`. Per frame: poll input, stop on quit, update,
//! then draw every actor.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::SimError;
use crate::settings::Settings;
use crate::sim::{Actor, Simulation, TickInput};

/// Frame pacing. Returns the seconds elapsed since the previous call.
pub trait Clock {
    fn tick(&mut self, target_fps: u32) -> f32;
}

/// Steps exactly `1 / fps` per frame without sleeping
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn tick(&mut self, target_fps: u32) -> f32 {
        1.0 / target_fps.max(1) as f32
    }
}

/// Sleeps so frames take at least `1 / fps`, then reports the measured time
#[derive(Debug, Clone, Default)]
pub struct WallClock {
    last: Option<Instant>,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Some(Instant::now()),
        }
    }
}

impl Clock for WallClock {
    fn tick(&mut self, target_fps: u32) -> f32 {
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let last = *self.last.get_or_insert_with(Instant::now);

        let spent = last.elapsed();
        if spent < frame {
            std::thread::sleep(frame - spent);
        }

        let now = Instant::now();
        self.last = Some(now);
        now.duration_since(last).as_secs_f32()
    }
}

/// Source of per-frame input snapshots
pub trait InputSource {
    fn poll(&mut self, frame: u64) -> TickInput;
}

/// Replays a fixed script: each segment holds its input until its end frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    /// (exclusive end frame, input held until then)
    segments: Vec<(u64, TickInput)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `input` for the next `frames` frames
    pub fn hold(mut self, frames: u64, input: TickInput) -> Self {
        let start = self.segments.last().map(|(end, _)| *end).unwrap_or(0);
        self.segments.push((start + frames, input));
        self
    }

    /// Request quit once the script is exhausted
    pub fn then_quit(self) -> Self {
        self.hold(
            1,
            TickInput {
                quit: true,
                ..Default::default()
            },
        )
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> TickInput {
        self.segments
            .iter()
            .find(|(end, _)| frame < *end)
            .map(|(_, input)| input.clone())
            .unwrap_or_default()
    }
}

/// Draw pass target
pub trait Renderer {
    /// Called once before the actors of a frame are drawn
    fn begin_frame(&mut self, _frame: u64) {}

    fn draw(&mut self, actor: &Actor);
}

/// Headless renderer that logs actor positions every `every` frames
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    every: u64,
    active: bool,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every,
            active: false,
        }
    }
}

impl Renderer for LogRenderer {
    fn begin_frame(&mut self, frame: u64) {
        self.active = self.every > 0 && frame % self.every == 0;
        if self.active {
            debug!("-- frame {frame} --");
        }
    }

    fn draw(&mut self, actor: &Actor) {
        if !self.active {
            return;
        }
        debug!(
            "{} #{}: pos=({:.1}, {:.1}, {:.1}) vel=({:.1}, {:.1})",
            actor.kind.name(),
            actor.id,
            actor.pos.x,
            actor.pos.y,
            actor.pos.z,
            actor.vel.x,
            actor.vel.y
        );
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub actors: usize,
    /// Stopped because the input source asked to quit
    pub quit: bool,
}

/// Run the simulation until quit or the configured frame count.
///
/// The first tick uses the nominal `1 / fps`; later ticks use whatever the
/// clock measured. Any simulation error ends the run.
pub fn run(
    sim: &mut Simulation,
    settings: &Settings,
    clock: &mut impl Clock,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
) -> Result<RunSummary, SimError> {
    let mut dt = settings.frame_dt();
    let mut quit = false;

    info!("Running '{}' at {} fps", settings.caption, settings.fps);
    loop {
        if settings.frames > 0 && sim.frame() >= settings.frames {
            break;
        }

        let tick_input = input.poll(sim.frame());
        if tick_input.wants_quit() {
            info!("Quit requested on frame {}", sim.frame());
            quit = true;
            break;
        }

        sim.update_with_input(dt, &tick_input)?;

        renderer.begin_frame(sim.frame());
        for actor in sim.actors() {
            renderer.draw(actor);
        }

        dt = clock.tick(settings.fps);
    }

    Ok(RunSummary {
        frames: sim.frame(),
        actors: sim.len(),
        quit,
    })
}
