//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults mirror `crate::consts`;
//! a JSON document may override any subset of fields, section by section.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Bounds;

/// Errors produced while loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{field}: value {value} outside {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// How asteroid drift is applied each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftScaling {
    /// Constant displacement per frame, regardless of frame time
    #[default]
    PerFrame,
    /// Displacement scaled by `dt * REFERENCE_FPS`
    PerSecond,
}

/// Ship steering parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    pub start_position: Vec3,
    pub forward_speed: f32,
    pub turn_rate: f32,
    pub vertical_speed: f32,
    pub cursor_deadzone: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            start_position: Vec3::ZERO,
            forward_speed: SHIP_FORWARD_SPEED,
            turn_rate: SHIP_TURN_RATE,
            vertical_speed: SHIP_VERTICAL_SPEED,
            cursor_deadzone: CURSOR_DEADZONE,
        }
    }
}

/// Asteroid spawning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Spawn positions are drawn from `[-half_extent, half_extent]` per axis
    pub half_extent: f32,
    pub safe_zone_radius: f32,
    pub max_attempts: u32,
    pub initial_asteroids: usize,
    pub chance_per_frame: f64,
    pub scale_min: f32,
    pub scale_max: f32,
    pub spin_max: f32,
    pub drift_max: f32,
    pub drift_scaling: DriftScaling,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            half_extent: SPAWN_HALF_EXTENT,
            safe_zone_radius: SAFE_ZONE_RADIUS,
            max_attempts: MAX_SPAWN_ATTEMPTS,
            initial_asteroids: INITIAL_ASTEROIDS,
            chance_per_frame: SPAWN_CHANCE_PER_FRAME,
            scale_min: ASTEROID_SCALE_MIN,
            scale_max: ASTEROID_SCALE_MAX,
            spin_max: ASTEROID_SPIN_MAX,
            drift_max: ASTEROID_DRIFT_MAX,
            drift_scaling: DriftScaling::PerFrame,
        }
    }
}

/// Projectile parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Units per frame
    pub speed: f32,
    pub max_range: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            max_range: PROJECTILE_MAX_RANGE,
        }
    }
}

/// Ship explosion parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    pub particle_count: usize,
    pub velocity_max: f32,
    pub speed_scale: f32,
    pub opacity_decay: f32,
    pub min_opacity: f32,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            particle_count: EXPLOSION_PARTICLES,
            velocity_max: EXPLOSION_VELOCITY_MAX,
            speed_scale: EXPLOSION_SPEED_SCALE,
            opacity_decay: EXPLOSION_OPACITY_DECAY,
            min_opacity: EXPLOSION_MIN_OPACITY,
        }
    }
}

/// Session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Seconds between ship destruction and game over
    pub game_over_delay: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            game_over_delay: GAME_OVER_DELAY,
        }
    }
}

/// Complete tuning document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bounds: Bounds,
    pub ship: ShipTuning,
    pub spawn: SpawnTuning,
    pub projectile: ProjectileTuning,
    pub explosion: ExplosionTuning,
    pub session: SessionTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let b = &self.bounds;
        for (field, min, max) in [
            ("bounds.x", b.min.x, b.max.x),
            ("bounds.y", b.min.y, b.max.y),
            ("bounds.z", b.min.z, b.max.z),
        ] {
            if min > max {
                return Err(TuningError::InvalidRange { field, min, max });
            }
            finite_span(field, max - min)?;
        }

        let s = &self.spawn;
        if s.scale_min <= 0.0 || s.scale_min > s.scale_max {
            return Err(TuningError::InvalidRange {
                field: "spawn.scale",
                min: s.scale_min,
                max: s.scale_max,
            });
        }
        finite_span("spawn.scale", s.scale_max - s.scale_min)?;
        positive("spawn.half_extent", s.half_extent)?;
        finite_span("spawn.half_extent", 2.0 * s.half_extent)?;
        finite_span("spawn.spin_max", s.spin_max)?;
        finite_span("spawn.drift_max", 2.0 * s.drift_max)?;
        non_negative("spawn.safe_zone_radius", s.safe_zone_radius)?;
        non_negative("spawn.spin_max", s.spin_max)?;
        non_negative("spawn.drift_max", s.drift_max)?;
        if s.max_attempts == 0 {
            return Err(TuningError::OutOfRange {
                field: "spawn.max_attempts",
                value: 0.0,
                expected: "[1, inf)",
            });
        }
        if !(0.0..=1.0).contains(&s.chance_per_frame) {
            return Err(TuningError::OutOfRange {
                field: "spawn.chance_per_frame",
                value: s.chance_per_frame,
                expected: "[0, 1]",
            });
        }

        non_negative("ship.cursor_deadzone", self.ship.cursor_deadzone)?;
        positive("projectile.max_range", self.projectile.max_range)?;

        let e = &self.explosion;
        if e.particle_count == 0 {
            return Err(TuningError::OutOfRange {
                field: "explosion.particle_count",
                value: 0.0,
                expected: "[1, inf)",
            });
        }
        if !(e.opacity_decay > 0.0 && e.opacity_decay < 1.0) {
            return Err(TuningError::OutOfRange {
                field: "explosion.opacity_decay",
                value: e.opacity_decay as f64,
                expected: "(0, 1)",
            });
        }
        if !(e.min_opacity > 0.0 && e.min_opacity < 1.0) {
            return Err(TuningError::OutOfRange {
                field: "explosion.min_opacity",
                value: e.min_opacity as f64,
                expected: "(0, 1)",
            });
        }
        non_negative("explosion.velocity_max", e.velocity_max)?;
        finite_span("explosion.velocity_max", 2.0 * e.velocity_max)?;

        non_negative("session.game_over_delay", self.session.game_over_delay)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            value: value as f64,
            expected: "(0, inf)",
        })
    }
}

/// Random draws need a finite width to sample from
fn finite_span(field: &'static str, span: f32) -> Result<(), TuningError> {
    if span.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            value: span as f64,
            expected: "finite span",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            value: value as f64,
            expected: "[0, inf)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(
            r#"{ "spawn": { "safe_zone_radius": 15.0, "drift_scaling": "per_second" } }"#,
        )
        .unwrap();
        assert_eq!(tuning.spawn.safe_zone_radius, 15.0);
        assert_eq!(tuning.spawn.drift_scaling, DriftScaling::PerSecond);
        // Untouched fields keep their defaults
        assert_eq!(tuning.spawn.max_attempts, MAX_SPAWN_ATTEMPTS);
        assert_eq!(tuning.explosion.particle_count, EXPLOSION_PARTICLES);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = Tuning::from_json(r#"{ "bounds": { "min": [10, 0, 0], "max": [0, 1, 1] } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvalidRange {
                field: "bounds.x",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_decay_rejected() {
        let err = Tuning::from_json(r#"{ "explosion": { "opacity_decay": 1.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "explosion.opacity_decay",
                ..
            }
        ));
    }

    #[test]
    fn test_unsampleable_spans_rejected() {
        let err = Tuning::from_json(r#"{ "spawn": { "half_extent": 3e38 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "spawn.half_extent",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "bounds": { "min": [-3e38, 0, 0], "max": [3e38, 1, 1] } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "bounds.x",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
