//! Collision shapes and the pairwise touching predicate
//!
//! Contacts are planar: only x and y take part. The z axis is depth, used by
//! renderers for layering, and never separates two actors.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Geometric shape bound to an actor for contact tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    Sphere { radius: f32 },
}

impl CollisionShape {
    /// Sphere of `radius`. Negative (or NaN) radii are clamped to 0, which
    /// still touches anything whose own reach covers the centre.
    pub fn sphere(radius: f32) -> Self {
        CollisionShape::Sphere {
            radius: radius.max(0.0),
        }
    }

    /// Radius of the smallest circle containing the shape's footprint
    pub fn bounding_radius(&self) -> f32 {
        match self {
            CollisionShape::Sphere { radius } => *radius,
        }
    }

    /// Test this shape at `self_pos` against `other` at `other_pos`.
    ///
    /// Symmetric for every supported pairing. New variants add their arms
    /// here; pairings without an arm report "not touching".
    pub fn is_touching(&self, other: &CollisionShape, self_pos: Vec3, other_pos: Vec3) -> bool {
        match (self, other) {
            (CollisionShape::Sphere { radius: a }, CollisionShape::Sphere { radius: b }) => {
                sphere_touching(*a, *b, self_pos, other_pos)
            }
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}

/// Two spheres touch when their planar centre distance is at most the sum of radii
#[inline]
pub fn sphere_touching(radius_a: f32, radius_b: f32, pos_a: Vec3, pos_b: Vec3) -> bool {
    let dist_sq = (pos_a.truncate() - pos_b.truncate()).length_squared();
    let reach = radius_a + radius_b;
    dist_sq <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spheres_touch_at_exact_reach() {
        let a = CollisionShape::sphere(30.0);
        let b = CollisionShape::sphere(30.0);
        assert!(a.is_touching(&b, Vec3::ZERO, Vec3::new(60.0, 0.0, 0.0)));
    }

    #[test]
    fn test_spheres_apart() {
        let a = CollisionShape::sphere(30.0);
        let b = CollisionShape::sphere(30.0);
        assert!(!a.is_touching(&b, Vec3::ZERO, Vec3::new(61.0, 0.0, 0.0)));
        assert!(!a.is_touching(&b, Vec3::ZERO, Vec3::new(60.0001, 0.0, 0.0)));
    }

    #[test]
    fn test_depth_is_ignored() {
        // Same planar spot, far apart in depth
        assert!(sphere_touching(
            1.0,
            1.0,
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(10.0, 10.0, -500.0)
        ));
    }

    #[test]
    fn test_diagonal_contact() {
        // 3-4-5 triangle: distance 50, reach 50
        assert!(sphere_touching(20.0, 30.0, Vec3::ZERO, Vec3::new(30.0, 40.0, 0.0)));
        assert!(!sphere_touching(20.0, 29.0, Vec3::ZERO, Vec3::new(30.0, 40.0, 0.0)));
    }

    #[test]
    fn test_negative_radius_clamped() {
        assert_eq!(CollisionShape::sphere(-5.0).bounding_radius(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_touching_is_symmetric(
            ra in 0.0f32..100.0, rb in 0.0f32..100.0,
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let a = CollisionShape::sphere(ra);
            let b = CollisionShape::sphere(rb);
            let pa = Vec3::new(ax, ay, 0.0);
            let pb = Vec3::new(bx, by, 0.0);
            prop_assert_eq!(a.is_touching(&b, pa, pb), b.is_touching(&a, pb, pa));
        }
    }
}
