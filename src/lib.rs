//! Astro Drift - A 3D asteroid-dodging arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (motion, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural Web Audio sound collaborator (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Reference frame rate used when converting per-frame motion to per-second
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest delta time accepted from the frame driver (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ship play volume (axis-aligned cuboid)
    pub const SHIP_BOUNDS_MIN: [f32; 3] = [-45.0, -25.0, -45.0];
    pub const SHIP_BOUNDS_MAX: [f32; 3] = [45.0, 25.0, 45.0];

    /// Ship steering
    pub const SHIP_FORWARD_SPEED: f32 = 6.0; // units/s along local forward
    pub const SHIP_TURN_RATE: f32 = 1.6; // rad/s at full cursor deflection
    pub const SHIP_VERTICAL_SPEED: f32 = 8.0; // units/s
    pub const CURSOR_DEADZONE: f32 = 0.15;

    /// Asteroid spawning
    pub const SPAWN_HALF_EXTENT: f32 = 50.0;
    pub const SAFE_ZONE_RADIUS: f32 = 10.0;
    pub const MAX_SPAWN_ATTEMPTS: u32 = 32;
    pub const INITIAL_ASTEROIDS: usize = 50;
    pub const SPAWN_CHANCE_PER_FRAME: f64 = 0.2;
    pub const ASTEROID_SCALE_MIN: f32 = 0.5;
    pub const ASTEROID_SCALE_MAX: f32 = 2.5;
    pub const ASTEROID_SPIN_MAX: f32 = 0.7; // rad/s per axis
    pub const ASTEROID_DRIFT_MAX: f32 = 0.1; // units/frame per axis

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 1.0; // units/frame
    pub const PROJECTILE_MAX_RANGE: f32 = 200.0;

    /// Explosion effect
    pub const EXPLOSION_PARTICLES: usize = 50;
    pub const EXPLOSION_VELOCITY_MAX: f32 = 1.0;
    pub const EXPLOSION_SPEED_SCALE: f32 = 10.0;
    pub const EXPLOSION_OPACITY_DECAY: f32 = 0.95;
    pub const EXPLOSION_MIN_OPACITY: f32 = 0.01;

    /// Delay between ship destruction and the game-over screen (seconds)
    pub const GAME_OVER_DELAY: f32 = 0.05;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Forward direction for a yaw about +Y (yaw 0 looks down -Z)
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}
