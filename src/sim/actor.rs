//! Actors: kinematic bodies with deferred forces, optional contact shape,
//! and a kind that decides how they react to input and contacts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::{Controls, TickInput};
use super::shape::CollisionShape;
use crate::consts::*;
use crate::error::SimError;
use crate::{AnyVec, normalized, to_vec3};

/// Stable actor handle, assigned by the simulation on spawn (0 = not spawned)
pub type ActorId = u32;

/// Keyboard-driven swimmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub controls: Controls,
    pub swimming_force: f32,
    pub diving_force: f32,
    /// Force used for movement this tick (swimming or diving)
    pub current_force: f32,
    pub is_diving: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::with_force(DEFAULT_MOVEMENT_FORCE)
    }
}

impl Player {
    pub fn with_force(swimming_force: f32) -> Self {
        Self {
            controls: Controls::default(),
            swimming_force,
            diving_force: swimming_force * DIVE_FORCE_FACTOR,
            current_force: swimming_force,
            is_diving: false,
        }
    }

    /// Movement force for this tick.
    ///
    /// The dive key is sampled after the force is computed, so switching
    /// between swimming and diving shows up one tick later.
    pub fn steer(&mut self, input: &TickInput) -> Vec3 {
        let force = input.directional_vector3(self.controls.movement()) * self.current_force;

        self.is_diving = input.is_key_down(self.controls.dive);
        self.current_force = if self.is_diving {
            self.diving_force
        } else {
            self.swimming_force
        };

        force
    }
}

/// A ball that gets kicked away by whatever touches it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub kick_multiplier: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            kick_multiplier: DEFAULT_KICK_MULTIPLIER,
        }
    }
}

impl Ball {
    /// Kick force on `me` from touching `other`.
    ///
    /// Magnitude is `kick_multiplier * |other.vel| / dt`, pointing away from
    /// `other`. It grows without bound as `dt` shrinks; with no elapsed time
    /// there is no kick at all.
    pub fn kick(&self, me: &Actor, other: &Actor, dt: f32) -> Option<Vec3> {
        if dt <= 0.0 {
            return None;
        }
        let magnitude = self.kick_multiplier * other.vel.length() / dt;
        Some(-me.normalized_vector_to(other) * magnitude)
    }
}

/// What an actor is, and therefore how it behaves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum ActorKind {
    /// Passive body: integrates, never reacts
    #[default]
    Prop,
    Player(Player),
    Ball(Ball),
}

impl ActorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActorKind::Prop => "prop",
            ActorKind::Player(_) => "player",
            ActorKind::Ball(_) => "ball",
        }
    }
}

/// A simulated entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Acceleration from the last integration step
    pub acc: Vec3,
    /// Fraction of velocity left after one second, in (0, 1]
    pub friction: f32,
    /// Forces applied since the last integration step
    #[serde(default)]
    forces: Vec<Vec3>,
    #[serde(default)]
    deleted: bool,
    /// Contact shape (None = never takes part in contact tests)
    pub shape: Option<CollisionShape>,
    pub solid: bool,
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            id: 0,
            pos: Vec3::new(x, y, z),
            vel: Vec3::ZERO,
            acc: Vec3::ZERO,
            friction: DEFAULT_FRICTION,
            forces: Vec::new(),
            deleted: false,
            shape: None,
            solid: false,
            kind: ActorKind::Prop,
        }
    }

    /// Player with the default swimming force and no shape
    pub fn player(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0).with_kind(ActorKind::Player(Player::default()))
    }

    /// Ball with a sphere of `radius` bound and the default friction
    pub fn ball(x: f32, y: f32, radius: f32) -> Self {
        Self::new(x, y, 0.0)
            .with_shape(CollisionShape::sphere(radius))
            .with_kind(ActorKind::Ball(Ball::default()))
    }

    pub fn with_shape(mut self, shape: CollisionShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn with_kind(mut self, kind: ActorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_velocity(mut self, vel: impl Into<AnyVec>) -> Self {
        self.vel = to_vec3(vel);
        self
    }

    /// Set the damping coefficient; must lie in (0, 1]
    pub fn with_friction(mut self, friction: f32) -> Result<Self, SimError> {
        if !(friction > 0.0 && friction <= 1.0) {
            return Err(SimError::InvalidArgument(format!(
                "friction must be in (0, 1], got {friction}"
            )));
        }
        self.friction = friction;
        Ok(self)
    }

    /// Queue a force for the next integration step
    pub fn apply_force(&mut self, force: impl Into<AnyVec>) -> Result<&mut Self, SimError> {
        let force = force.into();
        if !force.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "attempt to apply non-finite force {force:?}"
            )));
        }
        self.forces.push(to_vec3(force));
        Ok(self)
    }

    pub fn pending_forces(&self) -> &[Vec3] {
        &self.forces
    }

    /// Advance kinematics by `dt` seconds.
    ///
    /// Pending forces are summed into `acc` and cleared, velocity takes an
    /// explicit Euler step, decays by `friction^dt`, and then moves the actor.
    pub fn integrate(&mut self, dt: f32) -> Result<(), SimError> {
        check_dt(dt)?;

        self.acc = self.forces.drain(..).sum();
        self.vel += self.acc * dt;
        self.vel *= self.friction.powf(dt);
        self.pos += self.vel * dt;
        Ok(())
    }

    /// Per-tick behaviour followed by integration
    pub fn update(&mut self, dt: f32, input: &TickInput) -> Result<(), SimError> {
        check_dt(dt)?;

        let steering = match &mut self.kind {
            ActorKind::Player(player) => Some(player.steer(input)),
            ActorKind::Ball(_) | ActorKind::Prop => None,
        };
        if let Some(force) = steering {
            self.apply_force(force)?;
        }

        self.integrate(dt)
    }

    /// Mark for removal; the simulation drops the actor on its next sweep
    pub fn delete(&mut self) {
        self.deleted = true;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Planar distance to `other`
    pub fn distance(&self, other: &Actor) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared planar distance to `other`
    pub fn distance_sq(&self, other: &Actor) -> f32 {
        (self.pos.truncate() - other.pos.truncate()).length_squared()
    }

    pub fn vector_to(&self, other: &Actor) -> Vec3 {
        other.pos - self.pos
    }

    /// Unit vector toward `other` (zero if both share a position)
    pub fn normalized_vector_to(&self, other: &Actor) -> Vec3 {
        normalized(self.vector_to(other))
    }

    /// Contact test against `other`; both actors must have a shape bound
    pub fn is_touching(&self, other: &Actor) -> Result<bool, SimError> {
        let mine = self
            .shape
            .as_ref()
            .ok_or(SimError::PreconditionViolation("collision shape not defined for self"))?;
        let theirs = other
            .shape
            .as_ref()
            .ok_or(SimError::PreconditionViolation("collision shape not defined for other"))?;
        Ok(mine.is_touching(theirs, self.pos, other.pos))
    }

    /// React to touching `other` during this tick's contact pass.
    ///
    /// Responses only queue forces, so they land in the next integration.
    pub fn on_collision(&mut self, other: &Actor, dt: f32) -> Result<(), SimError> {
        let response = match &self.kind {
            ActorKind::Ball(ball) => ball.kick(self, other, dt),
            ActorKind::Player(_) | ActorKind::Prop => None,
        };
        if let Some(force) = response {
            self.apply_force(force)?;
        }
        Ok(())
    }
}

/// Elapsed time must be finite and non-negative
pub(crate) fn check_dt(dt: f32) -> Result<(), SimError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidArgument(format!(
            "dt must be finite and non-negative, got {dt}"
        )));
    }
    Ok(())
}
