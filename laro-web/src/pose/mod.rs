//! Pose module - keypoint data model and rolling history
//!
//! Re-exports only. All logic in submodules.

mod history;
mod keypoint;

pub use history::{PoseHistory, DEFAULT_CAPACITY};
pub use keypoint::{
    Keypoint, KeypointSet, PoseResult,
    // Constants
    FLAT_STRIDE, KEYPOINT_COUNT,
    NOSE, LEFT_EYE, RIGHT_EYE, LEFT_EAR, RIGHT_EAR,
    LEFT_SHOULDER, RIGHT_SHOULDER, LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST, LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE,
};
