//! Game state and core simulation types
//!
//! `GameState` owns everything one play session needs: the tuning it was
//! built with, the session state machine, the entity store, the steering
//! input and the seeded RNG. Commands (`start`, `toggle_pause`, `reset`,
//! `fire`, `on_cursor_move`) are methods here; the per-frame pipeline lives
//! in `tick`.

use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{GameEvent, Presenter, Sound, dispatch_events};
use super::explosion::ExplosionParticleSystem;
use super::session::{DeferredAction, GamePhase, GameSession};
use super::shape::{ASTEROID_SHAPE, Aabb, PROJECTILE_SHAPE, SHIP_SHAPE};
use super::snapshot::FrameSnapshot;
use super::spawner::spawn_asteroids;
use super::store::{AsteroidId, EntityStore, ExplosionId, ProjectileId};
use crate::forward_from_yaw;
use crate::tuning::Tuning;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub position: Vec3,
    /// Heading about +Y (radians, 0 = facing -Z)
    pub yaw: f32,
    pub alive: bool,
}

impl Ship {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            alive: true,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Local forward axis in world space
    #[inline]
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    pub fn aabb(&self) -> Aabb {
        SHIP_SHAPE.world_aabb(1.0, self.orientation(), self.position)
    }
}

/// A drifting, tumbling asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: Vec3,
    /// Uniform scale applied to the shared rock template
    pub scale: f32,
    /// Accumulated Euler rotation (XYZ, radians)
    pub rotation: Vec3,
    /// Per-axis spin rate (rad/s)
    pub spin: Vec3,
    /// Constant displacement per frame
    pub drift: Vec3,
}

impl Asteroid {
    pub fn new(position: Vec3, scale: f32, spin: Vec3, drift: Vec3) -> Self {
        Self {
            position,
            scale,
            rotation: Vec3::ZERO,
            spin,
            drift,
        }
    }

    /// A motionless asteroid (handy for scripted scenarios)
    pub fn stationary(position: Vec3, scale: f32) -> Self {
        Self::new(position, scale, Vec3::ZERO, Vec3::ZERO)
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn aabb(&self) -> Aabb {
        ASTEROID_SHAPE.world_aabb(self.scale, self.orientation(), self.position)
    }
}

/// A projectile fired from the ship's nose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    /// Ship heading at fire time
    pub yaw: f32,
    /// Constant displacement per frame
    pub velocity: Vec3,
    /// Where it was fired from
    pub origin: Vec3,
}

impl Projectile {
    /// Fire along the ship's current forward axis
    pub fn from_ship(ship: &Ship, speed: f32) -> Self {
        Self {
            position: ship.position,
            yaw: ship.yaw,
            velocity: ship.forward() * speed,
            origin: ship.position,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn aabb(&self) -> Aabb {
        PROJECTILE_SHAPE.world_aabb(1.0, self.orientation(), self.position)
    }

    /// Past the far plane, or further than `max_range` from where it was fired
    pub fn is_out_of_range(&self, max_range: f32) -> bool {
        self.position.z < -max_range || self.position.distance(self.origin) > max_range
    }
}

/// Complete game state for one page session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance parameters this state was built with
    pub tuning: Tuning,
    /// Phase and session timer
    pub session: GameSession,
    /// Ship, asteroids, projectiles and explosions
    pub store: EntityStore,
    /// Latest normalized cursor position, each axis in [-1, 1]
    pub cursor: Vec2,
    /// Number of simulated (playing) frames
    pub frame: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new idle game and populate the initial asteroid field
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let ship = Ship::new(tuning.bounds.clamp(tuning.ship.start_position));
        let mut state = Self {
            seed,
            session: GameSession::new(),
            store: EntityStore::new(ship),
            cursor: Vec2::ZERO,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        };

        let initial = state.tuning.spawn.initial_asteroids;
        state.spawn_asteroids(initial);
        state
    }

    // === Commands ===

    /// Idle -> Playing
    pub fn start(&mut self) {
        if self.session.start() {
            log::info!("Game started (seed {})", self.seed);
            self.events.push(GameEvent::IntroVisible(false));
        } else {
            log::debug!("start ignored in {:?}", self.session.phase());
        }
    }

    /// Playing <-> Paused
    pub fn toggle_pause(&mut self) {
        match self.session.toggle_pause() {
            Some(GamePhase::Paused) => {
                log::info!("Paused at {:.2}s", self.session.elapsed());
                self.events.push(GameEvent::PauseVisible(true));
            }
            Some(_) => {
                log::info!("Resumed");
                self.events.push(GameEvent::PauseVisible(false));
            }
            None => log::debug!("toggle_pause ignored in {:?}", self.session.phase()),
        }
    }

    /// GameOver -> Playing with a fresh field
    pub fn reset(&mut self) {
        if !self.session.reset() {
            log::debug!("reset ignored in {:?}", self.session.phase());
            return;
        }

        self.store.clear_asteroids();
        self.store.clear_projectiles();
        self.store.ship = Ship::new(self.tuning.bounds.clamp(self.tuning.ship.start_position));
        self.cursor = Vec2::ZERO;

        log::info!("Game reset");
        self.events.push(GameEvent::RestartVisible(false));
    }

    /// Launch a projectile from the ship (Playing with a live ship only)
    pub fn fire(&mut self) -> Option<ProjectileId> {
        if !self.session.is_playing() || !self.store.ship.alive {
            return None;
        }
        let projectile = Projectile::from_ship(&self.store.ship, self.tuning.projectile.speed);
        let id = self.store.insert_projectile(projectile);
        self.events.push(GameEvent::PlaySound(Sound::Fire));
        Some(id)
    }

    /// Record the steering input; values are clamped to [-1, 1]
    pub fn on_cursor_move(&mut self, x: f32, y: f32) {
        // NaN from a zero-sized canvas becomes neutral input
        let sanitize = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.cursor = Vec2::new(sanitize(x), sanitize(y));
    }

    // === Internal transitions ===

    /// Add `count` asteroids outside the ship's safe zone
    pub fn spawn_asteroids(&mut self, count: usize) -> Vec<AsteroidId> {
        let avoid = self.store.ship.position;
        spawn_asteroids(&mut self.store, &mut self.rng, &self.tuning.spawn, avoid, count)
    }

    /// Roll the per-frame spawn chance
    pub(crate) fn roll_spawn(&mut self) -> Option<AsteroidId> {
        use rand::Rng;
        if self.rng.random_bool(self.tuning.spawn.chance_per_frame) {
            self.spawn_asteroids(1).pop()
        } else {
            None
        }
    }

    /// Blow up the ship and schedule the game-over transition
    pub(crate) fn destroy_ship(&mut self) -> ExplosionId {
        let ship = &mut self.store.ship;
        ship.alive = false;
        let origin = ship.position;

        let explosion =
            ExplosionParticleSystem::burst(origin, &self.tuning.explosion, &mut self.rng);
        let id = self.store.insert_explosion(explosion);

        self.session.schedule(
            DeferredAction::GameOver,
            self.tuning.session.game_over_delay as f64,
        );
        log::info!(
            "Ship destroyed at ({:.1}, {:.1}, {:.1})",
            origin.x,
            origin.y,
            origin.z
        );
        self.events.push(GameEvent::PlaySound(Sound::ShipExplosion));
        id
    }

    /// Run a deferred action that came due this frame
    pub(crate) fn run_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::GameOver => {
                let Some(score) = self.session.finish() else {
                    return;
                };
                let text = super::session::format_score(score);
                log::info!("Game over - survived {}", text);
                self.events.push(GameEvent::EndScreen { score: text });
                self.events.push(GameEvent::RestartVisible(true));
            }
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn ship(&self) -> &Ship {
        &self.store.ship
    }

    pub fn asteroids(&self) -> impl Iterator<Item = (AsteroidId, &Asteroid)> {
        self.store.asteroids()
    }

    pub fn projectiles(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> {
        self.store.projectiles()
    }

    pub fn explosions(&self) -> impl Iterator<Item = (ExplosionId, &ExplosionParticleSystem)> {
        self.store.explosions()
    }

    /// Render-ready view of the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand all queued events to a presentation collaborator
    pub fn present<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        let events = self.drain_events();
        dispatch_events(events, presenter);
    }
}
