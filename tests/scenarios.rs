//! End-to-end gameplay scenarios
//!
//! Each test drives a [`GameState`] frame by frame at 60 fps through the same
//! `tick`/`step` entry points the browser loop uses.

use astro_drift::Tuning;
use astro_drift::consts::SAFE_ZONE_RADIUS;
use astro_drift::sim::{Asteroid, GameEvent, GamePhase, GameState, TickInput, step, tick};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Empty field with spawning disabled
fn quiet_game(seed: u64) -> GameState {
    let mut tuning = Tuning::default();
    tuning.spawn.initial_asteroids = 0;
    tuning.spawn.chance_per_frame = 0.0;
    GameState::with_tuning(seed, tuning)
}

fn started(mut state: GameState) -> GameState {
    let input = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &input, 0.0);
    assert_eq!(state.phase(), GamePhase::Playing);
    state
}

/// Drop a rock on the ship and run until the end screen
fn crash(state: &mut GameState) {
    let pos = state.ship().position;
    state.store.insert_asteroid(Asteroid::stationary(pos, 1.0));
    for _ in 0..30 {
        step(state, DT);
        if state.phase() == GamePhase::GameOver {
            return;
        }
    }
    panic!("game never ended");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn five_second_run_scores_about_five_seconds() {
    let mut state = started(quiet_game(7));
    for _ in 0..300 {
        step(&mut state, DT);
    }
    crash(&mut state);

    let score = state.session.score().expect("score recorded at game over");
    assert!((5.0..=5.1).contains(&score), "score {score}");

    let text = state.session.score_text().expect("score text");
    assert!(text.starts_with("5.0"), "{text}");
    assert!(text.ends_with(" seconds"));
    assert!(
        state
            .drain_events()
            .contains(&GameEvent::EndScreen { score: text })
    );
}

#[test]
fn initial_field_is_clear_of_the_origin() {
    for seed in [1, 42, 1234, 987_654_321] {
        let state = GameState::new(seed);
        assert_eq!(state.store.asteroid_count(), 50);
        for (_, asteroid) in state.asteroids() {
            assert!(
                asteroid.position.length() >= SAFE_ZONE_RADIUS,
                "seed {seed}: asteroid at {:?}",
                asteroid.position
            );
        }
    }
}

#[test]
fn projectile_expires_past_range() {
    let mut state = started(quiet_game(3));
    let id = state.fire().expect("fired while playing");

    for _ in 0..200 {
        step(&mut state, DT);
    }
    let projectile = state.store.projectile(id).expect("still in range");
    assert_eq!(projectile.position.z, -200.0);

    step(&mut state, DT);
    assert!(state.store.projectile(id).is_none());
    assert_eq!(state.store.projectile_count(), 0);
}

#[test]
fn pause_freezes_the_world() {
    let mut state = started(quiet_game(11));
    state.store.insert_asteroid(Asteroid::new(
        Vec3::new(30.0, 10.0, -30.0),
        1.5,
        Vec3::new(0.3, 0.2, 0.1),
        Vec3::new(0.05, 0.0, -0.05),
    ));
    for _ in 0..10 {
        step(&mut state, DT);
    }

    let pause = TickInput {
        pause: true,
        ..Default::default()
    };
    tick(&mut state, &pause, DT);
    assert_eq!(state.phase(), GamePhase::Paused);

    let frozen = state.snapshot();
    for _ in 0..60 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert_eq!(state.snapshot(), frozen);

    tick(&mut state, &pause, DT);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert!(state.session.elapsed() > frozen.elapsed);
    assert_ne!(state.ship().position, frozen.ship.position);
}

#[test]
fn reset_clears_the_field_and_restores_the_ship() {
    let mut state = started(quiet_game(5));
    state
        .store
        .insert_asteroid(Asteroid::stationary(Vec3::new(40.0, 20.0, 40.0), 2.0));
    state.fire();
    for _ in 0..30 {
        step(&mut state, DT);
    }
    crash(&mut state);
    assert_eq!(state.store.explosion_count(), 1);
    assert!(!state.ship().alive);
    state.drain_events();

    let reset = TickInput {
        reset: true,
        ..Default::default()
    };
    tick(&mut state, &reset, 0.0);

    assert_eq!(state.phase(), GamePhase::Playing);
    assert_eq!(state.store.asteroid_count(), 0);
    assert_eq!(state.store.projectile_count(), 0);
    assert!(state.ship().alive);
    assert_eq!(state.ship().position, Vec3::ZERO);
    assert_eq!(state.session.elapsed(), 0.0);
    // The wreck keeps fading across the reset
    assert_eq!(state.store.explosion_count(), 1);
    assert!(state.drain_events().contains(&GameEvent::RestartVisible(false)));
}

#[test]
fn hit_removes_exactly_one_of_each() {
    let mut state = started(quiet_game(9));
    let ship = state.ship().clone();
    state
        .store
        .insert_asteroid(Asteroid::stationary(ship.position + ship.forward() * 8.0, 1.0));
    state
        .store
        .insert_asteroid(Asteroid::stationary(Vec3::new(40.0, 20.0, 40.0), 1.0));
    state.fire();
    state.fire();

    let mut hit_frame = None;
    for frame in 0..30 {
        let asteroids = state.store.asteroid_count();
        let projectiles = state.store.projectile_count();
        step(&mut state, DT);
        if state.store.asteroid_count() != asteroids {
            assert_eq!(state.store.asteroid_count(), asteroids - 1);
            assert_eq!(state.store.projectile_count(), projectiles - 1);
            hit_frame = Some(frame);
            break;
        }
    }

    assert!(hit_frame.is_some(), "shot never connected");
    assert_eq!(state.store.asteroid_count(), 1);
    assert_eq!(state.store.projectile_count(), 1);
}
