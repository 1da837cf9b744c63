//! Procedural asteroid spawning
//!
//! Positions are drawn uniformly from a cube around the origin, rejecting
//! anything inside the safe zone around the ship. Rejection is capped at
//! `max_attempts` draws; past that the last draw is used as-is.

use glam::Vec3;
use rand::Rng;

use super::state::Asteroid;
use super::store::{AsteroidId, EntityStore};
use crate::tuning::SpawnTuning;

/// Result of a spawn position search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    /// Draws taken, including the accepted one
    pub attempts: u32,
    /// True if the retry cap was hit and the point is inside the safe zone
    pub forced: bool,
}

/// Draw a position outside the safe zone around `avoid`
pub fn pick_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &SpawnTuning,
    avoid: Vec3,
) -> SpawnPoint {
    let h = tuning.half_extent;
    let min_dist_sq = tuning.safe_zone_radius * tuning.safe_zone_radius;
    let max_attempts = tuning.max_attempts.max(1);

    let mut position = Vec3::ZERO;
    for attempt in 1..=max_attempts {
        position = Vec3::new(
            rng.random_range(-h..=h),
            rng.random_range(-h..=h),
            rng.random_range(-h..=h),
        );
        if position.distance_squared(avoid) >= min_dist_sq {
            return SpawnPoint {
                position,
                attempts: attempt,
                forced: false,
            };
        }
    }

    SpawnPoint {
        position,
        attempts: max_attempts,
        forced: true,
    }
}

/// Roll a complete asteroid (position, scale, spin, drift)
pub fn roll_asteroid<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &SpawnTuning,
    avoid: Vec3,
) -> (Asteroid, SpawnPoint) {
    let point = pick_spawn_point(rng, tuning, avoid);

    let scale = rng.random_range(tuning.scale_min..=tuning.scale_max);
    let spin = Vec3::new(
        rng.random_range(0.0..=tuning.spin_max),
        rng.random_range(0.0..=tuning.spin_max),
        rng.random_range(0.0..=tuning.spin_max),
    );
    let d = tuning.drift_max;
    let drift = Vec3::new(
        rng.random_range(-d..=d),
        rng.random_range(-d..=d),
        rng.random_range(-d..=d),
    );

    (Asteroid::new(point.position, scale, spin, drift), point)
}

/// Add `count` asteroids to the store, keeping clear of `avoid`
pub fn spawn_asteroids<R: Rng + ?Sized>(
    store: &mut EntityStore,
    rng: &mut R,
    tuning: &SpawnTuning,
    avoid: Vec3,
    count: usize,
) -> Vec<AsteroidId> {
    let mut ids = Vec::with_capacity(count);
    let mut forced = 0u32;

    for _ in 0..count {
        let (asteroid, point) = roll_asteroid(rng, tuning, avoid);
        if point.forced {
            forced += 1;
        }
        ids.push(store.insert_asteroid(asteroid));
    }

    if forced > 0 {
        log::warn!(
            "{} of {} asteroids placed inside the safe zone after {} attempts",
            forced,
            count,
            tuning.max_attempts
        );
    }
    if count > 1 {
        log::debug!(
            "Spawned {} asteroids (field now {})",
            count,
            store.asteroid_count()
        );
    }

    ids
}
