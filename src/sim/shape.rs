//! Shared mesh templates and axis-aligned bounding boxes
//!
//! Templates are immutable and shared by every instance; an entity only owns
//! its transform. Bounding boxes are rebuilt each frame from the template's
//! vertices after applying the entity's scale, rotation and translation, so a
//! spinning asteroid's box tracks its actual silhouette.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Empty box that any point will expand
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Grow the box to include a point
    #[inline]
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Overlap test; touching faces count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

// Unit icosahedron vertex directions: (0, ±1, ±φ) cyclic permutations, normalized.
const ICO_A: f32 = 0.525_731_1;
const ICO_B: f32 = 0.850_650_8;
const ICOSAHEDRON: [Vec3; 12] = [
    Vec3::new(-ICO_A, ICO_B, 0.0),
    Vec3::new(ICO_A, ICO_B, 0.0),
    Vec3::new(-ICO_A, -ICO_B, 0.0),
    Vec3::new(ICO_A, -ICO_B, 0.0),
    Vec3::new(0.0, -ICO_A, ICO_B),
    Vec3::new(0.0, ICO_A, ICO_B),
    Vec3::new(0.0, -ICO_A, -ICO_B),
    Vec3::new(0.0, ICO_A, -ICO_B),
    Vec3::new(ICO_B, 0.0, -ICO_A),
    Vec3::new(ICO_B, 0.0, ICO_A),
    Vec3::new(-ICO_B, 0.0, -ICO_A),
    Vec3::new(-ICO_B, 0.0, ICO_A),
];

/// Corners of the [-1, 1] cube
const CUBE: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Square pyramid with its apex on -Z (nose forward)
const WEDGE: [Vec3; 5] = [
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Immutable geometry template
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Regular icosahedron with vertices at `radius`
    Icosahedron { radius: f32 },
    /// Box with the given half extents
    Cuboid { half_extents: Vec3 },
    /// Pyramid nose-forward along -Z; `half_extents` scales the unit wedge
    Wedge { half_extents: Vec3 },
}

/// Asteroid rock (scaled per instance)
pub const ASTEROID_SHAPE: Shape = Shape::Icosahedron { radius: 2.0 };
/// Player ship hull
pub const SHIP_SHAPE: Shape = Shape::Wedge {
    half_extents: Vec3::new(0.8, 0.3, 1.4),
};
/// Projectile bolt
pub const PROJECTILE_SHAPE: Shape = Shape::Cuboid {
    half_extents: Vec3::new(0.1, 0.1, 0.6),
};

impl Shape {
    fn unit_vertices(&self) -> (&'static [Vec3], Vec3) {
        match *self {
            Shape::Icosahedron { radius } => (&ICOSAHEDRON, Vec3::splat(radius)),
            Shape::Cuboid { half_extents } => (&CUBE, half_extents),
            Shape::Wedge { half_extents } => (&WEDGE, half_extents),
        }
    }

    /// World-space bounding box after scale, rotation, then translation
    pub fn world_aabb(&self, scale: f32, rotation: Quat, translation: Vec3) -> Aabb {
        let (verts, extents) = self.unit_vertices();
        let mut aabb = Aabb::EMPTY;
        for &v in verts {
            aabb.expand(rotation * (v * extents * scale) + translation);
        }
        aabb
    }
}
