//! Session lifecycle
//!
//! Idle -> Starting -> Running <-> Paused -> Idle. Pausing only affects the
//! reference video; pose detection keeps running in both Running and Paused.

use serde::Serialize;

use crate::error::SessionError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Starting,
    Running,
    Paused,
}

/// Inputs that move a session between phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Player pressed start
    Start,
    /// Camera and estimator are both ready
    Ready,
    /// Camera or estimator could not be acquired
    AcquisitionFailed,
    /// Play/pause button on the reference video
    TogglePause,
    /// Explicit reset or teardown
    Reset,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Starting => "starting",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
        }
    }

    /// Phases in which the tick loop runs
    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Running | SessionPhase::Paused)
    }

    /// Apply an event, rejecting transitions the lifecycle does not allow
    pub fn on(self, event: SessionEvent) -> Result<SessionPhase, SessionError> {
        use SessionEvent::*;
        use SessionPhase::*;

        match (self, event) {
            (Idle, Start) => Ok(Starting),
            (Starting, Ready) => Ok(Running),
            (Starting, AcquisitionFailed) => Ok(Idle),
            (Running, TogglePause) => Ok(Paused),
            (Paused, TogglePause) => Ok(Running),
            (_, Reset) => Ok(Idle),
            (phase, event) => Err(SessionError::InvalidTransition { phase, event }),
        }
    }
}
