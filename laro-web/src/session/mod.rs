//! Session module - lifecycle, collaborator traits, and the motion loop
//!
//! Re-exports only. All logic in submodules.

mod capabilities;
mod motion_loop;
mod phase;

pub use capabilities::{CameraSource, FrameClock, PoseEstimator, ReferenceVideo};
pub use motion_loop::{
    LoopStats, MotionLoop, SessionSnapshot, TickOutcome,
    // Feedback messages
    CAMERA_DENIED, CAMERA_READY, DETECTOR_FAILED, DETECTOR_LOADED, LOADING_DETECTOR,
    SESSION_STARTED,
};
pub use phase::{SessionEvent, SessionPhase};
