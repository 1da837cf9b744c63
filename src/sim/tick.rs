//! Per-frame simulation step
//!
//! The frame driver calls [`tick`] once per rendered frame with the elapsed
//! time. Outside `Playing` the step only applies commands; nothing moves.

use glam::Vec2;

use super::collision::{apply_projectile_hits, asteroid_boxes, find_projectile_hits, find_ship_hit};
use super::events::{GameEvent, Sound};
use super::explosion::update_explosions;
use super::motion::{advance_asteroids, advance_projectiles, steer_ship};
use super::session::GamePhase;
use super::state::GameState;
use crate::consts::MAX_FRAME_DT;

/// Commands gathered since the last frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest normalized cursor position
    pub cursor: Option<Vec2>,
    /// Start the game (intro screen)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub reset: bool,
    /// Fire a projectile
    pub fire: bool,
}

impl TickInput {
    /// Clear one-shot commands after they have been applied
    pub fn clear_commands(&mut self) {
        self.start = false;
        self.pause = false;
        self.reset = false;
        self.fire = false;
    }
}

/// Apply queued commands, then advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start {
        state.start();
    }
    if input.reset {
        state.reset();
    }
    if input.pause {
        state.toggle_pause();
    }
    if let Some(cursor) = input.cursor {
        state.on_cursor_move(cursor.x, cursor.y);
    }
    if input.fire {
        state.fire();
    }

    step(state, dt);
}

/// Advance the simulation by `dt` seconds
///
/// Only `Playing` moves the world. On the end screen the explosion keeps
/// fading; `Idle` and `Paused` are frozen.
pub fn step(state: &mut GameState, dt: f32) {
    let frame_dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    // Integration step; the session clock still gets the full frame time
    let dt = frame_dt.min(MAX_FRAME_DT);

    match state.phase() {
        GamePhase::Playing => {}
        GamePhase::GameOver => {
            update_explosions(&mut state.store, &state.tuning.explosion, dt);
            return;
        }
        GamePhase::Idle | GamePhase::Paused => return,
    }

    state.session.advance(frame_dt);
    state.frame += 1;

    // Motion
    let cursor = state.cursor;
    steer_ship(
        &mut state.store.ship,
        cursor,
        &state.tuning.ship,
        &state.tuning.bounds,
        dt,
    );
    advance_asteroids(&mut state.store, state.tuning.spawn.drift_scaling, dt);
    advance_projectiles(&mut state.store, &state.tuning.projectile);

    // Field grows over time
    state.roll_spawn();

    // Collisions: mark, then sweep
    let boxes = asteroid_boxes(&state.store);
    let hits = find_projectile_hits(&state.store, &boxes);
    let destroyed = apply_projectile_hits(&mut state.store, &hits);
    for _ in 0..destroyed {
        state.push_event(GameEvent::PlaySound(Sound::AsteroidDestroyed));
    }

    if !state.session.game_over_pending() && find_ship_hit(&state.store, &boxes).is_some() {
        state.destroy_ship();
    }

    update_explosions(&mut state.store, &state.tuning.explosion, dt);

    if let Some(action) = state.session.take_due() {
        state.run_deferred(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Asteroid;
    use crate::tuning::Tuning;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.spawn.initial_asteroids = 0;
        tuning.spawn.chance_per_frame = 0.0;
        tuning
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut state = GameState::new(12345);
        let before: Vec<Vec3> = state.asteroids().map(|(_, a)| a.position).collect();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let after: Vec<Vec3> = state.asteroids().map(|(_, a)| a.position).collect();
        assert_eq!(before, after);
        assert_eq!(state.frame, 0);
        assert_eq!(state.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_start_then_pause_via_input() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.frame, 1);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase(), GamePhase::Paused);
        assert_eq!(state.frame, 1);

        tick(&mut state, &pause, DT);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_ship_collision_ends_game_after_delay() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        let pos = state.ship().position;
        state.store.insert_asteroid(Asteroid::stationary(pos, 1.0));

        step(&mut state, DT);
        assert!(!state.ship().alive);
        assert_eq!(state.store.explosion_count(), 1);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.session.game_over_pending());

        // 50ms delay at 60 fps: due within a few frames
        for _ in 0..4 {
            step(&mut state, DT);
        }
        assert_eq!(state.phase(), GamePhase::GameOver);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(Sound::ShipExplosion)));
        assert!(events.contains(&GameEvent::RestartVisible(true)));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::EndScreen { .. }))
        );
    }

    #[test]
    fn test_ship_hit_only_once() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        let pos = state.ship().position;
        state.store.insert_asteroid(Asteroid::stationary(pos, 1.0));
        state.store.insert_asteroid(Asteroid::stationary(pos, 2.0));
        step(&mut state, DT);
        step(&mut state, DT);
        assert_eq!(state.store.explosion_count(), 1);
    }

    #[test]
    fn test_shot_destroys_asteroid_in_pipeline() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        let ship = state.ship().clone();
        let ahead = ship.position + ship.forward() * 8.0;
        state.store.insert_asteroid(Asteroid::stationary(ahead, 1.0));
        state.fire();

        for _ in 0..10 {
            step(&mut state, DT);
        }
        assert_eq!(state.store.asteroid_count(), 0);
        assert_eq!(state.store.projectile_count(), 0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PlaySound(Sound::AsteroidDestroyed))
        );
        assert!(state.ship().alive);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                cursor: Some(Vec2::new(0.6, -0.4)),
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..20 {
            for input in &inputs {
                tick(&mut a, input, DT);
                tick(&mut b, input, DT);
            }
        }
        assert_eq!(a.store.asteroid_count(), b.store.asteroid_count());
        assert_eq!(a.store.projectile_count(), b.store.projectile_count());
        assert_eq!(a.ship().position, b.ship().position);
        assert_eq!(a.phase(), b.phase());
    }

    #[test]
    fn test_oversized_dt_clamps_motion_not_clock() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        step(&mut state, 10.0);
        assert!((state.session.elapsed() - 10.0).abs() < 1e-6);
        // Ship integrates at most one clamped step
        let max_travel = state.tuning.ship.forward_speed * MAX_FRAME_DT;
        assert!(state.ship().position.length() <= max_travel + 1e-4);

        step(&mut state, f32::NAN);
        step(&mut state, -1.0);
        assert!((state.session.elapsed() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_frames_keep_full_score() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        for _ in 0..20 {
            step(&mut state, 0.25);
        }
        assert!((state.session.elapsed() - 5.0).abs() < 1e-6);

        let pos = state.ship().position;
        state.store.insert_asteroid(Asteroid::stationary(pos, 1.0));
        // One 0.25 s frame covers the crash; the next runs the 50 ms delay
        step(&mut state, 0.25);
        step(&mut state, 0.25);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.session.score_text().as_deref(), Some("5.50 seconds"));
    }

    #[test]
    fn test_explosion_fades_on_end_screen() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        let pos = state.ship().position;
        state.store.insert_asteroid(Asteroid::stationary(pos, 1.0));
        while state.phase() != GamePhase::GameOver {
            step(&mut state, DT);
        }
        assert_eq!(state.store.explosion_count(), 1);

        for _ in 0..90 {
            step(&mut state, DT);
        }
        assert_eq!(state.store.explosion_count(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_pause_freezes_explosion() {
        let mut state = GameState::with_tuning(1, quiet_tuning());
        state.start();
        let pos = state.ship().position;
        state.store.insert_asteroid(Asteroid::stationary(pos, 1.0));
        step(&mut state, DT);
        state.toggle_pause();

        let opacity = |s: &GameState| s.explosions().map(|(_, e)| e.opacity).next();
        let before = opacity(&state);
        assert!(before.is_some());
        for _ in 0..30 {
            step(&mut state, DT);
        }
        assert_eq!(opacity(&state), before);
    }
}
