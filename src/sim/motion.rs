//! Motion integration for the ship, asteroids and projectiles

use glam::Vec2;

use super::bounds::Bounds;
use super::state::{Asteroid, Projectile, Ship};
use super::store::EntityStore;
use crate::consts::REFERENCE_FPS;
use crate::normalize_angle;
use crate::tuning::{DriftScaling, ProjectileTuning, ShipTuning};

/// Steer and thrust the ship, then clamp it into the play volume
///
/// Horizontal cursor offset turns the ship (proportional to the offset),
/// vertical offset climbs or dives at a fixed rate. Both ignore input inside
/// the deadzone. Forward thrust is constant.
pub fn steer_ship(ship: &mut Ship, cursor: Vec2, tuning: &ShipTuning, bounds: &Bounds, dt: f32) {
    if !ship.alive {
        return;
    }

    if cursor.x.abs() > tuning.cursor_deadzone {
        // Cursor right turns right (clockwise seen from above)
        ship.yaw = normalize_angle(ship.yaw - cursor.x * tuning.turn_rate * dt);
    }
    if cursor.y.abs() > tuning.cursor_deadzone {
        ship.position.y += cursor.y.signum() * tuning.vertical_speed * dt;
    }

    ship.position += ship.forward() * tuning.forward_speed * dt;
    ship.position = bounds.clamp(ship.position);
}

/// Spin and drift one asteroid
pub fn advance_asteroid(asteroid: &mut Asteroid, scaling: DriftScaling, dt: f32) {
    asteroid.rotation += asteroid.spin * dt;
    asteroid.position += match scaling {
        DriftScaling::PerFrame => asteroid.drift,
        DriftScaling::PerSecond => asteroid.drift * dt * REFERENCE_FPS,
    };
}

/// Spin and drift every asteroid in the store
pub fn advance_asteroids(store: &mut EntityStore, scaling: DriftScaling, dt: f32) {
    for (_, asteroid) in store.asteroids_mut() {
        advance_asteroid(asteroid, scaling, dt);
    }
}

/// Move one projectile by its per-frame velocity
#[inline]
pub fn advance_projectile(projectile: &mut Projectile) {
    projectile.position += projectile.velocity;
}

/// Move every projectile and drop those past their range; returns how many expired
pub fn advance_projectiles(store: &mut EntityStore, tuning: &ProjectileTuning) -> usize {
    store.retain_projectiles(|p| {
        advance_projectile(p);
        !p.is_out_of_range(tuning.max_range)
    })
}
