//! Swimball - a minimal real-time actor physics core
//!
//! Core modules:
//! - `sim`: Simulation core (actors, force integration, contacts, registry)
//! - `driver`: Drive loop and the clock/input/renderer collaborators it talks to
//! - `settings`: Data-driven run configuration
//! - `error`: Failure kinds raised by the core

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Simulation constants
pub mod consts {
    /// Default velocity damping coefficient (fraction of velocity kept after one second)
    pub const DEFAULT_FRICTION: f32 = 0.01;
    /// Default player movement force
    pub const DEFAULT_MOVEMENT_FORCE: f32 = DEFAULT_FRICTION * 200_000.0;
    /// Diving force relative to the swimming force
    pub const DIVE_FORCE_FACTOR: f32 = 3.0;
    /// Default ball kick multiplier
    pub const DEFAULT_KICK_MULTIPLIER: f32 = 2.0;

    /// Squared length at or below which a vector is left un-normalized
    pub const NORMALIZE_EPSILON: f32 = 0.000_001;

    /// Target frame rate for the drive loop
    pub const DEFAULT_FPS: u32 = 60;
}

/// A 2- or 3-component vector, accepted wherever a force or position is taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnyVec {
    Two(Vec2),
    Three(Vec3),
}

impl AnyVec {
    /// All components are finite (no NaN, no infinity)
    pub fn is_finite(&self) -> bool {
        match self {
            AnyVec::Two(v) => v.is_finite(),
            AnyVec::Three(v) => v.is_finite(),
        }
    }
}

impl From<Vec2> for AnyVec {
    fn from(v: Vec2) -> Self {
        AnyVec::Two(v)
    }
}

impl From<Vec3> for AnyVec {
    fn from(v: Vec3) -> Self {
        AnyVec::Three(v)
    }
}

/// Promote to 3D (z = 0 for 2D input)
#[inline]
pub fn to_vec3(v: impl Into<AnyVec>) -> Vec3 {
    match v.into() {
        AnyVec::Two(v) => v.extend(0.0),
        AnyVec::Three(v) => v,
    }
}

/// Demote to 2D (drops z)
#[inline]
pub fn to_vec2(v: impl Into<AnyVec>) -> Vec2 {
    match v.into() {
        AnyVec::Two(v) => v,
        AnyVec::Three(v) => v.truncate(),
    }
}

/// Unit vector in the direction of `v`.
///
/// Vectors with squared length at or below [`consts::NORMALIZE_EPSILON`] come
/// back unchanged, so a zero vector never turns into NaN.
#[inline]
pub fn normalized(v: Vec3) -> Vec3 {
    if v.length_squared() <= consts::NORMALIZE_EPSILON {
        return v;
    }
    v.normalize()
}

/// 2D counterpart of [`normalized`]
#[inline]
pub fn normalized2(v: Vec2) -> Vec2 {
    if v.length_squared() <= consts::NORMALIZE_EPSILON {
        return v;
    }
    v.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero_is_identity() {
        assert_eq!(normalized2(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(normalized(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalized(Vec3::new(3.0, 4.0, 0.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_conversion() {
        assert_eq!(to_vec3(Vec2::new(1.0, 2.0)), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(to_vec3(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(to_vec2(Vec3::new(1.0, 2.0, 3.0)), Vec2::new(1.0, 2.0));
        assert_eq!(to_vec2(Vec2::new(5.0, 6.0)), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_any_vec_finite() {
        assert!(AnyVec::from(Vec2::new(1.0, 2.0)).is_finite());
        assert!(!AnyVec::from(Vec3::new(f32::NAN, 0.0, 0.0)).is_finite());
        assert!(!AnyVec::from(Vec2::new(0.0, f32::INFINITY)).is_finite());
    }

    proptest! {
        #[test]
        fn prop_tiny_vectors_pass_through(x in -0.0005f32..0.0005, y in -0.0005f32..0.0005, z in -0.0005f32..0.0005) {
            let v = Vec3::new(x, y, z);
            prop_assume!(v.length_squared() <= consts::NORMALIZE_EPSILON);
            prop_assert_eq!(normalized(v), v);
        }

        #[test]
        fn prop_normalized_is_unit(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let v = Vec2::new(x, y);
            prop_assume!(v.length_squared() > 0.01);
            prop_assert!((normalized2(v).length() - 1.0).abs() < 1e-4);
        }
    }
}
