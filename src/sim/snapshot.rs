//! Render-ready view of a frame
//!
//! Everything the renderer needs to draw one frame, with no handles back into
//! the simulation. Serializes to JSON for the JS side.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::session::GamePhase;
use super::state::GameState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Vec3,
    pub rotation: Quat,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub positions: Vec<Vec3>,
    pub opacity: f32,
}

/// All transforms for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    /// Seconds survived so far
    pub elapsed: f64,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let ship = state.ship();
        Self {
            phase: state.phase(),
            elapsed: state.session.elapsed(),
            ship: ShipView {
                position: ship.position,
                rotation: ship.orientation(),
                alive: ship.alive,
            },
            asteroids: state
                .asteroids()
                .map(|(_, a)| AsteroidView {
                    position: a.position,
                    rotation: a.orientation(),
                    scale: a.scale,
                })
                .collect(),
            projectiles: state
                .projectiles()
                .map(|(_, p)| ProjectileView {
                    position: p.position,
                    rotation: p.orientation(),
                })
                .collect(),
            explosions: state
                .explosions()
                .map(|(_, e)| ExplosionView {
                    positions: e.positions.clone(),
                    opacity: e.opacity,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts_match_store() {
        let mut state = GameState::new(5);
        state.start();
        state.fire();
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.asteroids.len(), state.store.asteroid_count());
        assert_eq!(snap.projectiles.len(), 1);
        assert!(snap.ship.alive);
        assert!(snap.explosions.is_empty());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = GameState::new(5);
        let json = state.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Idle");
        assert_eq!(value["ship"]["position"].as_array().map(|a| a.len()), Some(3));
        assert_eq!(value["ship"]["rotation"].as_array().map(|a| a.len()), Some(4));
    }
}
