//! Initial population for a run
//!
//! Deterministic per seed: the same settings always produce the same actors.

use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::{Actor, ActorKind, Ball, Player};
use super::shape::CollisionShape;
use super::world::Simulation;
use crate::error::SimError;
use crate::settings::Settings;

/// Spawn the player, the main ball and any extra balls described by `settings`
pub fn populate(sim: &mut Simulation, settings: &Settings) -> Result<(), SimError> {
    let player = Actor::new(30.0, 30.0, 0.0)
        .with_kind(ActorKind::Player(Player::with_force(settings.movement_force)))
        .with_shape(CollisionShape::sphere(settings.player_radius))
        .with_solid(true)
        .with_friction(settings.default_friction)?;
    sim.spawn(player);

    sim.spawn(make_ball(200.0, 200.0, settings)?);

    let mut rng = Pcg32::seed_from_u64(settings.seed);
    let margin = settings.ball_radius;
    let max_x = (settings.width as f32 - margin).max(margin + 1.0);
    let max_y = (settings.height as f32 - margin).max(margin + 1.0);
    for _ in 0..settings.extra_balls {
        let x = rng.random_range(margin..max_x);
        let y = rng.random_range(margin..max_y);
        sim.spawn(make_ball(x, y, settings)?);
    }

    info!(
        "Scene ready: {} actors (seed {}, {} extra balls)",
        sim.len(),
        settings.seed,
        settings.extra_balls
    );
    Ok(())
}

fn make_ball(x: f32, y: f32, settings: &Settings) -> Result<Actor, SimError> {
    let ball = Ball {
        kick_multiplier: settings.kick_multiplier,
    };
    Actor::ball(x, y, settings.ball_radius)
        .with_kind(ActorKind::Ball(ball))
        .with_solid(true)
        .with_friction(settings.default_friction)
}
