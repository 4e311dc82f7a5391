//! Session state machine.
//!
//! ```text
//! Idle ──start──▶ Playing ⇄ Paused
//!                  │
//!                  ├──breach──▶ GameOver
//!                  ├──cleared─▶ LevelTransition ──next──▶ Playing
//!                  └──final───▶ Victory
//! GameOver | Victory | LevelTransition | Paused ──menu──▶ Idle
//! ```

use garden_core::enums::{GameMode, SessionState, TickErrorPolicy};

use crate::error::{Rejection, TickError};
use crate::systems::TickReport;

/// Terminal or transitional outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lost,
    LevelComplete,
    Victory,
}

/// Owns the session state and validates every transition.
#[derive(Debug, Default)]
pub struct SessionStateMachine {
    state: SessionState,
    last_error: Option<TickError>,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// World edits (placement, tools, pickups) are only accepted while playing.
    pub fn require_playing(&self) -> Result<(), Rejection> {
        match self.state {
            SessionState::Playing => Ok(()),
            other => Err(Rejection::NotPlaying(other)),
        }
    }

    /// The tick error that paused the session under the `Halt` policy.
    /// Cleared when play resumes.
    pub fn last_error(&self) -> Option<&TickError> {
        self.last_error.as_ref()
    }

    fn allowed(from: SessionState, to: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (from, to),
            (Idle | GameOver | Victory | LevelTransition, Playing)
                | (Paused, Playing)
                | (Playing, Paused | GameOver | LevelTransition | Victory)
                | (Paused | GameOver | Victory | LevelTransition, Idle)
        )
    }

    /// Move to `to` if the transition is legal.
    pub fn transition(&mut self, to: SessionState) -> Result<(), Rejection> {
        let from = self.state;
        if !Self::allowed(from, to) {
            return Err(Rejection::InvalidTransition { from, to });
        }
        tracing::info!(?from, ?to, "session state changed");
        self.state = to;
        if to == SessionState::Playing {
            self.last_error = None;
        }
        Ok(())
    }

    /// Decide what a completed tick means for the session.
    pub fn evaluate(
        &mut self,
        report: &TickReport,
        mode: GameMode,
        level: u32,
        final_level: Option<u32>,
    ) -> Option<Outcome> {
        if self.state != SessionState::Playing {
            return None;
        }
        let outcome = if report.breached {
            Outcome::Lost
        } else if mode == GameMode::Campaign && report.wave_cleared {
            if final_level.is_some_and(|last| level >= last) {
                Outcome::Victory
            } else {
                Outcome::LevelComplete
            }
        } else {
            return None;
        };
        let to = match outcome {
            Outcome::Lost => SessionState::GameOver,
            Outcome::LevelComplete => SessionState::LevelTransition,
            Outcome::Victory => SessionState::Victory,
        };
        self.transition(to).ok().map(|()| outcome)
    }

    /// Apply the error policy to a failed tick.
    pub fn on_tick_error(&mut self, error: TickError, policy: TickErrorPolicy) {
        match policy {
            TickErrorPolicy::Contain => {
                tracing::error!(phase = %error.phase(), %error, "tick failed; continuing");
            }
            TickErrorPolicy::Halt => {
                tracing::error!(phase = %error.phase(), %error, "tick failed; pausing session");
                if self.transition(SessionState::Paused).is_ok() {
                    self.last_error = Some(error);
                }
            }
        }
    }
}
