//! Simulation core
//!
//! Pure and single-threaded:
//! - Variable timestep supplied by the caller
//! - Stable iteration order (spawn order)
//! - No rendering, clock or platform dependencies

pub mod actor;
pub mod input;
pub mod scene;
pub mod shape;
pub mod world;

pub use actor::{Actor, ActorId, ActorKind, Ball, Player};
pub use input::{Controls, Key, TickInput};
pub use scene::populate;
pub use shape::{CollisionShape, sphere_touching};
pub use world::{SimEvent, Simulation};
