//! Error types for the motion engine
//!
//! Acquisition failures (camera, estimator load) end a start attempt.
//! Per-tick estimation failures are recovered inside the loop and only logged.

use thiserror::Error;

use crate::session::{SessionEvent, SessionPhase};

/// Camera could not be opened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera access denied: {0}")]
    PermissionDenied(String),

    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

/// Pose estimator failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimatorError {
    #[error("pose estimator failed to load: {0}")]
    Load(String),

    #[error("pose estimation failed: {0}")]
    Estimate(String),

    #[error("could not decode estimator output: {0}")]
    Decode(String),
}

/// Errors returned by session control operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error("cannot apply {event:?} while session is {phase:?}")]
    InvalidTransition {
        phase: SessionPhase,
        event: SessionEvent,
    },

    #[error("session was reset before it finished starting")]
    Cancelled,
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    #[error("confidence threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f32),

    #[error("tier thresholds must satisfy noise floor < medium < high (got {noise_floor}, {medium}, {high})")]
    UnorderedTiers {
        noise_floor: f32,
        medium: f32,
        high: f32,
    },

    #[error("marker radius must be positive (got {0})")]
    InvalidRadius(f32),

    #[error("invalid config: {0}")]
    Parse(String),
}

/// Malformed keypoint input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeypointError {
    #[error("flat keypoint buffer has {0} values, expected a multiple of 3")]
    RaggedBuffer(usize),
}

/// Overlay surface could not be set up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("overlay canvas has no 2d context")]
    NoContext,

    #[error("surface creation failed: {0}")]
    SurfaceCreationFailed(String),

    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,

    #[error("device creation failed: {0}")]
    DeviceCreationFailed(String),
}
