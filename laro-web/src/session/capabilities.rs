//! Collaborators the motion loop drives
//!
//! Browser implementations live in `bridge`; tests use scripted fakes.
//! Everything runs on one thread, so the async methods are not `Send`.

use async_trait::async_trait;

use crate::error::{CameraError, EstimatorError};
use crate::pose::PoseResult;

/// Live camera feed
#[async_trait(?Send)]
pub trait CameraSource {
    type Frame;

    /// Open the device. Permission errors are not retried.
    ///
    /// Acquisitions may overlap when a start is reset and restarted while
    /// the first request is pending. Each completed acquisition replaces and
    /// stops whatever stream the source already held, so at most one stays
    /// open.
    async fn acquire(&self) -> Result<(), CameraError>;

    fn is_live(&self) -> bool;

    /// Current frame, None until the stream delivers data
    fn frame(&self) -> Option<Self::Frame>;

    /// Native video resolution in pixels
    fn resolution(&self) -> (u32, u32);

    /// Stop all tracks. Idempotent.
    fn release(&self);
}

/// External pose-estimation model
#[async_trait(?Send)]
pub trait PoseEstimator {
    type Frame;

    fn is_loaded(&self) -> bool;

    /// Load the model; may take several seconds
    async fn load(&self) -> Result<(), EstimatorError>;

    /// Zero or more poses for one frame
    async fn estimate(&self, frame: &Self::Frame) -> Result<Vec<PoseResult>, EstimatorError>;
}

/// Reference dance clip
pub trait ReferenceVideo {
    fn play(&self);
    fn pause(&self);
    /// Seek back to the start
    fn rewind(&self);
}

/// Paces the tick loop to frame delivery
#[async_trait(?Send)]
pub trait FrameClock {
    async fn next_frame(&self);
}
