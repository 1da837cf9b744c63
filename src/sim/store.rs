//! Entity arenas
//!
//! Asteroids, projectiles and explosions live in `SlotMap`s keyed by
//! generational ids. A removed id never resolves again, even after its slot
//! is reused, so passes can collect ids first and remove afterwards.

use slotmap::{SlotMap, new_key_type};

use super::explosion::ExplosionParticleSystem;
use super::state::{Asteroid, Projectile, Ship};

new_key_type! {
    /// Stable handle to an asteroid
    pub struct AsteroidId;
    /// Stable handle to a projectile
    pub struct ProjectileId;
    /// Stable handle to an explosion particle system
    pub struct ExplosionId;
}

/// Owner of every simulated entity
#[derive(Debug, Clone)]
pub struct EntityStore {
    /// The single player ship (present even while destroyed; see `Ship::alive`)
    pub ship: Ship,
    asteroids: SlotMap<AsteroidId, Asteroid>,
    projectiles: SlotMap<ProjectileId, Projectile>,
    explosions: SlotMap<ExplosionId, ExplosionParticleSystem>,
}

impl EntityStore {
    pub fn new(ship: Ship) -> Self {
        Self {
            ship,
            asteroids: SlotMap::with_key(),
            projectiles: SlotMap::with_key(),
            explosions: SlotMap::with_key(),
        }
    }

    // === Asteroids ===

    pub fn insert_asteroid(&mut self, asteroid: Asteroid) -> AsteroidId {
        self.asteroids.insert(asteroid)
    }

    pub fn remove_asteroid(&mut self, id: AsteroidId) -> Option<Asteroid> {
        self.asteroids.remove(id)
    }

    pub fn asteroid(&self, id: AsteroidId) -> Option<&Asteroid> {
        self.asteroids.get(id)
    }

    pub fn asteroid_mut(&mut self, id: AsteroidId) -> Option<&mut Asteroid> {
        self.asteroids.get_mut(id)
    }

    pub fn asteroids(&self) -> impl Iterator<Item = (AsteroidId, &Asteroid)> {
        self.asteroids.iter()
    }

    pub fn asteroids_mut(&mut self) -> impl Iterator<Item = (AsteroidId, &mut Asteroid)> {
        self.asteroids.iter_mut()
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub fn clear_asteroids(&mut self) {
        self.asteroids.clear();
    }

    // === Projectiles ===

    pub fn insert_projectile(&mut self, projectile: Projectile) -> ProjectileId {
        self.projectiles.insert(projectile)
    }

    pub fn remove_projectile(&mut self, id: ProjectileId) -> Option<Projectile> {
        self.projectiles.remove(id)
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(id)
    }

    pub fn projectiles(&self) -> impl Iterator<Item = (ProjectileId, &Projectile)> {
        self.projectiles.iter()
    }

    pub fn projectiles_mut(&mut self) -> impl Iterator<Item = (ProjectileId, &mut Projectile)> {
        self.projectiles.iter_mut()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Keep only projectiles for which `keep` returns true; returns how many were dropped
    pub fn retain_projectiles(&mut self, mut keep: impl FnMut(&mut Projectile) -> bool) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|_, p| keep(p));
        before - self.projectiles.len()
    }

    pub fn clear_projectiles(&mut self) {
        self.projectiles.clear();
    }

    // === Explosions ===

    pub fn insert_explosion(&mut self, explosion: ExplosionParticleSystem) -> ExplosionId {
        self.explosions.insert(explosion)
    }

    pub fn explosion(&self, id: ExplosionId) -> Option<&ExplosionParticleSystem> {
        self.explosions.get(id)
    }

    pub fn explosions(&self) -> impl Iterator<Item = (ExplosionId, &ExplosionParticleSystem)> {
        self.explosions.iter()
    }

    pub fn explosion_count(&self) -> usize {
        self.explosions.len()
    }

    pub fn retain_explosions(
        &mut self,
        mut keep: impl FnMut(&mut ExplosionParticleSystem) -> bool,
    ) -> usize {
        let before = self.explosions.len();
        self.explosions.retain(|_, e| keep(e));
        before - self.explosions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_removed_id_never_resolves() {
        let mut store = EntityStore::new(Ship::new(Vec3::ZERO));
        let a = store.insert_asteroid(Asteroid::stationary(Vec3::X, 1.0));
        assert!(store.remove_asteroid(a).is_some());
        assert!(store.remove_asteroid(a).is_none());

        // Slot reuse must not resurrect the old handle
        let b = store.insert_asteroid(Asteroid::stationary(Vec3::Y, 1.0));
        assert_ne!(a, b);
        assert!(store.asteroid(a).is_none());
        assert_eq!(store.asteroid(b).map(|x| x.position), Some(Vec3::Y));
        assert_eq!(store.asteroid_count(), 1);
    }

    #[test]
    fn test_retain_projectiles_counts_removed() {
        let mut store = EntityStore::new(Ship::new(Vec3::ZERO));
        let ship = Ship::new(Vec3::ZERO);
        for _ in 0..3 {
            store.insert_projectile(Projectile::from_ship(&ship, 1.0));
        }
        let mut n = 0;
        let removed = store.retain_projectiles(|_| {
            n += 1;
            n != 2
        });
        assert_eq!(removed, 1);
        assert_eq!(store.projectile_count(), 2);
    }
}
