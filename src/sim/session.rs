//! Game phase state machine and session timer
//!
//! Legal transitions:
//!
//! ```text
//! Idle --start--> Playing <--toggle_pause--> Paused
//!                    |  ^
//!       (deferred)   |  | reset
//!                    v  |
//!                  GameOver
//! ```
//!
//! The session clock only advances while `Playing`, so paused time is never
//! part of the score. Timestamps are read from that clock at the moment of
//! each transition.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start; intro screen showing
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ship destroyed, final score shown
    GameOver,
}

/// Actions scheduled to run after a delay on the session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Enter `GameOver` (gives the explosion a head start)
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Scheduled {
    action: DeferredAction,
    due_at: f64,
}

/// Session phase plus timing and score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    phase: GamePhase,
    /// Seconds of playing time accumulated from frame deltas
    clock: f64,
    started_at: f64,
    ended_at: Option<f64>,
    pending: Option<Scheduled>,
}

/// Slack for comparing accumulated clock values
const CLOCK_EPSILON: f64 = 1e-9;

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Current session clock (seconds)
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Seconds survived so far (frozen once the game is over)
    pub fn elapsed(&self) -> f64 {
        self.ended_at.unwrap_or(self.clock) - self.started_at
    }

    /// Final score in seconds, once in `GameOver`
    pub fn score(&self) -> Option<f64> {
        self.ended_at.map(|end| end - self.started_at)
    }

    /// Final score as shown on the end screen, e.g. "5.00 seconds"
    pub fn score_text(&self) -> Option<String> {
        self.score().map(format_score)
    }

    /// Whether a game-over is scheduled but not yet due
    pub fn game_over_pending(&self) -> bool {
        matches!(
            self.pending,
            Some(Scheduled {
                action: DeferredAction::GameOver,
                ..
            })
        )
    }

    /// Advance the clock by one frame (only while playing)
    pub fn advance(&mut self, dt: f32) {
        if self.is_playing() {
            self.clock += dt as f64;
        }
    }

    /// Idle -> Playing. Returns false if the transition is not legal.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.started_at = self.clock;
        self.ended_at = None;
        true
    }

    /// Playing <-> Paused. Returns the new phase, or None if not legal.
    pub fn toggle_pause(&mut self) -> Option<GamePhase> {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            _ => return None,
        };
        Some(self.phase)
    }

    /// GameOver -> Playing, re-anchoring the start time to now
    pub fn reset(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.started_at = self.clock;
        self.ended_at = None;
        self.pending = None;
        true
    }

    /// Playing -> GameOver, returning the score in seconds
    pub fn finish(&mut self) -> Option<f64> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::GameOver;
        self.ended_at = Some(self.clock);
        self.pending = None;
        self.score()
    }

    /// Schedule an action `delay` seconds from now. A pending action is replaced.
    pub fn schedule(&mut self, action: DeferredAction, delay: f64) {
        self.pending = Some(Scheduled {
            action,
            due_at: self.clock + delay.max(0.0),
        });
    }

    /// Take the pending action if its time has come
    pub fn take_due(&mut self) -> Option<DeferredAction> {
        let scheduled = self.pending?;
        if self.clock + CLOCK_EPSILON >= scheduled.due_at {
            self.pending = None;
            Some(scheduled.action)
        } else {
            None
        }
    }
}

/// Format a score in seconds with two decimals
pub fn format_score(seconds: f64) -> String {
    format!("{:.2} seconds", seconds)
}
