//! Bounding-box collision passes
//!
//! Each pass reads the store, records what hit what, and only then are the
//! removals applied. An asteroid consumed by one projectile is skipped for the
//! rest of the frame, and a projectile stops at the first asteroid it hits.

use std::collections::HashSet;

use super::shape::Aabb;
use super::store::{AsteroidId, EntityStore, ProjectileId};

/// Asteroid boxes for the current frame, in store order
pub fn asteroid_boxes(store: &EntityStore) -> Vec<(AsteroidId, Aabb)> {
    store.asteroids().map(|(id, a)| (id, a.aabb())).collect()
}

/// Find (projectile, asteroid) hits without mutating anything
///
/// Every projectile and asteroid appears in at most one pair.
pub fn find_projectile_hits(
    store: &EntityStore,
    asteroids: &[(AsteroidId, Aabb)],
) -> Vec<(ProjectileId, AsteroidId)> {
    let mut hits = Vec::new();
    let mut consumed: HashSet<AsteroidId> = HashSet::new();

    for (pid, projectile) in store.projectiles() {
        let pbox = projectile.aabb();
        for &(aid, abox) in asteroids {
            if consumed.contains(&aid) {
                continue;
            }
            if pbox.intersects(&abox) {
                consumed.insert(aid);
                hits.push((pid, aid));
                break;
            }
        }
    }

    hits
}

/// Remove both members of each hit pair; returns the number of pairs applied
pub fn apply_projectile_hits(store: &mut EntityStore, hits: &[(ProjectileId, AsteroidId)]) -> usize {
    let mut applied = 0;
    for &(pid, aid) in hits {
        let projectile = store.remove_projectile(pid);
        let asteroid = store.remove_asteroid(aid);
        debug_assert!(projectile.is_some() && asteroid.is_some());
        if projectile.is_some() && asteroid.is_some() {
            applied += 1;
        }
    }
    applied
}

/// First asteroid overlapping the ship, if the ship is alive
pub fn find_ship_hit(store: &EntityStore, asteroids: &[(AsteroidId, Aabb)]) -> Option<AsteroidId> {
    if !store.ship.alive {
        return None;
    }
    let ship_box = store.ship.aabb();
    asteroids
        .iter()
        .find(|(id, abox)| store.asteroid(*id).is_some() && ship_box.intersects(abox))
        .map(|&(id, _)| id)
}
