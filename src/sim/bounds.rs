//! Ship play volume
//!
//! An axis-aligned cuboid. The ship is clamped into it after every move.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{SHIP_BOUNDS_MAX, SHIP_BOUNDS_MIN};

/// Axis-aligned cuboid the ship may occupy (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(
            Vec3::from_array(SHIP_BOUNDS_MIN),
            Vec3::from_array(SHIP_BOUNDS_MAX),
        )
    }
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Clamp a point component-wise into the cuboid (an inverted axis pins to `max`)
    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
            p.z.max(self.min.z).min(self.max.z),
        )
    }

    /// Check if a point lies inside (or on the surface of) the cuboid
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_is_identity() {
        let b = Bounds::new(Vec3::splat(-10.0), Vec3::splat(10.0));
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(b.clamp(p), p);
    }

    #[test]
    fn test_clamp_each_axis() {
        let b = Bounds::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let clamped = b.clamp(Vec3::new(5.0, -9.0, 3.0));
        assert_eq!(clamped, Vec3::new(1.0, -2.0, 3.0));
        assert!(b.contains(clamped));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let b = Bounds::new(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains(Vec3::ONE));
        assert!(b.contains(Vec3::ZERO));
        assert!(!b.contains(Vec3::new(1.0001, 0.5, 0.5)));
    }
}
