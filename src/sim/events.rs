//! Presentation events
//!
//! The simulation never touches audio or the DOM. It queues one-way
//! [`GameEvent`]s which the shell drains into a [`Presenter`] after each frame.

use serde::{Deserialize, Serialize};

/// Sound cues the core asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    /// Projectile launched
    Fire,
    /// Projectile destroyed an asteroid
    AsteroidDestroyed,
    /// Ship hit an asteroid
    ShipExplosion,
}

/// Fire-and-forget notification for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(Sound),
    IntroVisible(bool),
    PauseVisible(bool),
    RestartVisible(bool),
    /// Final score, already formatted ("12.34 seconds")
    EndScreen { score: String },
}

/// Presentation collaborator (audio + UI panels)
pub trait Presenter {
    fn play_sound(&mut self, sound: Sound);
    fn show_end_screen(&mut self, score: &str);
    fn set_intro_visible(&mut self, visible: bool);
    fn set_restart_visible(&mut self, visible: bool);
    fn set_pause_visible(&mut self, _visible: bool) {}
}

/// Route each event to the matching presenter call, in order
pub fn dispatch_events<P: Presenter + ?Sized>(
    events: impl IntoIterator<Item = GameEvent>,
    presenter: &mut P,
) {
    for event in events {
        match event {
            GameEvent::PlaySound(sound) => presenter.play_sound(sound),
            GameEvent::IntroVisible(v) => presenter.set_intro_visible(v),
            GameEvent::PauseVisible(v) => presenter.set_pause_visible(v),
            GameEvent::RestartVisible(v) => presenter.set_restart_visible(v),
            GameEvent::EndScreen { score } => presenter.show_end_screen(&score),
        }
    }
}

/// Presenter that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn play_sound(&mut self, sound: Sound) {
        log::debug!("sound: {:?}", sound);
    }

    fn show_end_screen(&mut self, score: &str) {
        log::info!("Final score: {}", score);
    }

    fn set_intro_visible(&mut self, visible: bool) {
        log::debug!("intro visible: {}", visible);
    }

    fn set_restart_visible(&mut self, visible: bool) {
        log::debug!("restart visible: {}", visible);
    }

    fn set_pause_visible(&mut self, visible: bool) {
        log::debug!("pause visible: {}", visible);
    }
}
