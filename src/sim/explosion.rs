//! Ship destruction particle burst
//!
//! All particles start at the wreck and fly apart on independent random
//! velocities. The whole system shares one opacity that decays geometrically
//! each frame; the system is dropped once it is effectively invisible.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::store::EntityStore;
use crate::tuning::ExplosionTuning;

/// A burst of particles with a shared fade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionParticleSystem {
    /// Particle positions (parallel to `velocities`)
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    /// Shared opacity, 1.0 at burst
    pub opacity: f32,
}

impl ExplosionParticleSystem {
    /// Emit `particle_count` particles at `origin`
    pub fn burst<R: Rng + ?Sized>(origin: Vec3, tuning: &ExplosionTuning, rng: &mut R) -> Self {
        let v = tuning.velocity_max;
        let velocities: Vec<Vec3> = (0..tuning.particle_count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-v..=v),
                    rng.random_range(-v..=v),
                    rng.random_range(-v..=v),
                )
            })
            .collect();

        Self {
            positions: vec![origin; velocities.len()],
            velocities,
            opacity: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Advance one frame; returns false once the system has faded out
    pub fn update(&mut self, tuning: &ExplosionTuning, dt: f32) -> bool {
        let step = dt * tuning.speed_scale;
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            *pos += *vel * step;
        }
        self.opacity *= tuning.opacity_decay;
        !self.is_faded(tuning)
    }

    pub fn is_faded(&self, tuning: &ExplosionTuning) -> bool {
        self.opacity < tuning.min_opacity
    }
}

/// Update every explosion and drop the faded ones; returns how many were removed
pub fn update_explosions(store: &mut EntityStore, tuning: &ExplosionTuning, dt: f32) -> usize {
    store.retain_explosions(|e| e.update(tuning, dt))
}
