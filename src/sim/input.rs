//! Per-tick input snapshot
//!
//! The drive loop polls its input source once per frame and hands the
//! resulting [`TickInput`] to the simulation. Actor kinds that react to the
//! keyboard read it during their own update; the generic machinery never does.

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{normalized2, to_vec3};

/// Keys the simulation knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    LeftShift,
    /// Closes the run, same as a window quit
    Escape,
}

/// Key bindings for a keyboard-driven actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    pub dive: Key,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: Key::Left,
            right: Key::Right,
            up: Key::Up,
            down: Key::Down,
            dive: Key::LeftShift,
        }
    }
}

impl Controls {
    /// Movement keys in (left, right, up, down) order
    pub fn movement(&self) -> [Key; 4] {
        [self.left, self.right, self.up, self.down]
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Keys held down this tick
    pub held: BTreeSet<Key>,
    /// The user asked to close the window
    pub quit: bool,
}

impl TickInput {
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            quit: false,
        }
    }

    /// Quit was signalled, either by the window or by Escape
    pub fn wants_quit(&self) -> bool {
        self.quit || self.is_key_down(Key::Escape)
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Unit intent vector from four directional keys (screen axes, y grows down).
    ///
    /// Opposite keys cancel; nothing held yields the zero vector.
    pub fn directional_vector(&self, directions: [Key; 4]) -> Vec2 {
        let [left, right, up, down] = directions;

        let mut v = Vec2::ZERO;
        if self.is_key_down(left) {
            v.x -= 1.0;
        }
        if self.is_key_down(right) {
            v.x += 1.0;
        }
        if self.is_key_down(up) {
            v.y -= 1.0;
        }
        if self.is_key_down(down) {
            v.y += 1.0;
        }
        normalized2(v)
    }

    pub fn directional_vector3(&self, directions: [Key; 4]) -> Vec3 {
        to_vec3(self.directional_vector(directions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_zero_intent() {
        let input = TickInput::default();
        assert_eq!(input.directional_vector(Controls::default().movement()), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let input = TickInput::with_keys(&[Key::Right, Key::Down]);
        let v = input.directional_vector(Controls::default().movement());
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!(v.x > 0.0 && v.y > 0.0);
    }

    #[test]
    fn test_escape_requests_quit() {
        assert!(!TickInput::with_keys(&[Key::Left]).wants_quit());
        assert!(TickInput::with_keys(&[Key::Escape]).wants_quit());
        let window_closed = TickInput {
            quit: true,
            ..Default::default()
        };
        assert!(window_closed.wants_quit());
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = TickInput::with_keys(&[Key::Left, Key::Right, Key::Up]);
        let v = input.directional_vector3(Controls::default().movement());
        assert_eq!(v, Vec3::new(0.0, -1.0, 0.0));
    }
}
