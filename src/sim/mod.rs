//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Time only advances through `tick`/`step` deltas
//! - Seeded RNG only
//! - Stable iteration order (arena slot order)
//! - Presentation happens through queued `GameEvent`s

pub mod bounds;
pub mod collision;
pub mod events;
pub mod explosion;
pub mod motion;
pub mod session;
pub mod shape;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;

pub use bounds::Bounds;
pub use collision::{apply_projectile_hits, asteroid_boxes, find_projectile_hits, find_ship_hit};
pub use events::{GameEvent, LogPresenter, Presenter, Sound, dispatch_events};
pub use explosion::ExplosionParticleSystem;
pub use session::{DeferredAction, GamePhase, GameSession, format_score};
pub use shape::{Aabb, Shape};
pub use snapshot::FrameSnapshot;
pub use spawner::{SpawnPoint, pick_spawn_point, spawn_asteroids};
pub use state::{Asteroid, GameState, Projectile, Ship};
pub use store::{AsteroidId, EntityStore, ExplosionId, ProjectileId};
pub use tick::{TickInput, step, tick};
