//! Actor registry and the per-tick pipeline
//!
//! Each tick runs two passes in a fixed order:
//! 1. Contact pass: every unordered pair (i < j) with shapes is tested once;
//!    on contact both actors get `on_collision`.
//! 2. Update pass: walk the sequence with a cursor, dropping tombstoned
//!    actors in place and updating the rest, so each live actor is
//!    integrated exactly once.
//!
//! The contact pass is quadratic in actor count. There is no broad phase.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, check_dt};
use super::input::TickInput;
use crate::error::SimError;

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Two actors touched (a was earlier in the sequence)
    Contact { a: ActorId, b: ActorId },
    /// A tombstoned actor was swept out of the registry
    Removed { id: ActorId },
}

/// Owns every actor and advances them together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    /// Actors in spawn order
    actors: Vec<Actor>,
    /// Completed ticks
    frame: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    events: Vec<SimEvent>,
    next_id: ActorId,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            frame: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Register an actor at the end of the sequence and return its id.
    ///
    /// Call between ticks; the actor joins both passes from the next update.
    pub fn spawn(&mut self, mut actor: Actor) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;

        actor.id = id;
        info!("Spawned actor {} ({}) at {}", id, actor.kind.name(), actor.pos);
        self.actors.push(actor);
        id
    }

    /// Actors in sequence order, for drawing
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Tombstone an actor; it is removed during the next update pass.
    /// Returns false if no such actor is registered.
    pub fn delete(&mut self, id: ActorId) -> bool {
        match self.actor_mut(id) {
            Some(actor) => {
                actor.delete();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Events recorded during the last tick
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Advance one tick with no input held
    pub fn update(&mut self, dt: f32) -> Result<(), SimError> {
        self.update_with_input(dt, &TickInput::default())
    }

    /// Advance one tick: contact pass, then update/compaction pass.
    ///
    /// The tick runs on a working copy of the actors and is committed only
    /// if both passes succeed; on error the simulation is left as it was.
    pub fn update_with_input(&mut self, dt: f32, input: &TickInput) -> Result<(), SimError> {
        check_dt(dt)?;

        let mut actors = self.actors.clone();
        let mut events = Vec::new();
        collide(&mut actors, dt, &mut events)?;
        sweep(&mut actors, dt, input, &mut events, self.frame)?;

        self.actors = actors;
        self.events = events;
        self.frame += 1;
        Ok(())
    }

    /// Run the contact pass alone, queueing responses without integrating.
    /// All-or-nothing like [`Simulation::update_with_input`].
    pub fn do_collisions(&mut self, dt: f32) -> Result<(), SimError> {
        check_dt(dt)?;

        let mut actors = self.actors.clone();
        let mut events = Vec::new();
        collide(&mut actors, dt, &mut events)?;

        self.actors = actors;
        self.events = events;
        Ok(())
    }
}

/// Test every unordered pair once and dispatch both responses on contact.
///
/// Actors without a shape never take part, nor do actors tombstoned before
/// the pass starts.
fn collide(actors: &mut [Actor], dt: f32, events: &mut Vec<SimEvent>) -> Result<(), SimError> {
    let live: Vec<bool> = actors
        .iter()
        .map(|a| !a.is_deleted() && a.shape.is_some())
        .collect();

    let count = actors.len();
    for i in 0..count {
        if !live[i] {
            continue;
        }
        for j in (i + 1)..count {
            if !live[j] {
                continue;
            }
            let (first, second) = actors.split_at_mut(j);
            let a = &mut first[i];
            let b = &mut second[0];

            if a.is_touching(b)? {
                trace!("Contact between {} and {}", a.id, b.id);
                a.on_collision(b, dt)?;
                b.on_collision(a, dt)?;
                events.push(SimEvent::Contact { a: a.id, b: b.id });
            }
        }
    }
    Ok(())
}

/// Drop tombstoned actors in place and update the rest, each exactly once
fn sweep(
    actors: &mut Vec<Actor>,
    dt: f32,
    input: &TickInput,
    events: &mut Vec<SimEvent>,
    frame: u64,
) -> Result<(), SimError> {
    let mut i = 0;
    while i < actors.len() {
        if actors[i].is_deleted() {
            let removed = actors.remove(i);
            debug!("Removed actor {} on frame {}", removed.id, frame);
            events.push(SimEvent::Removed { id: removed.id });
        } else {
            actors[i].update(dt, input)?;
            i += 1;
        }
    }
    Ok(())
}
