//! Keypoint data model
//!
//! Keypoints arrive from MoveNet (running in JavaScript) either as decoded
//! objects `{x, y, score, name}` or as a flat Float32Array of `[x, y, score]`
//! triples. Coordinates are pixels in the camera video's space.

use serde::{Deserialize, Serialize};

use crate::error::KeypointError;

// ============================================================================
// KEYPOINT INDICES (MoveNet - 17 total)
// ============================================================================

pub const NOSE: usize = 0;
pub const LEFT_EYE: usize = 1;
pub const RIGHT_EYE: usize = 2;
pub const LEFT_EAR: usize = 3;
pub const RIGHT_EAR: usize = 4;
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_ELBOW: usize = 7;
pub const RIGHT_ELBOW: usize = 8;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;
pub const LEFT_KNEE: usize = 13;
pub const RIGHT_KNEE: usize = 14;
pub const LEFT_ANKLE: usize = 15;
pub const RIGHT_ANKLE: usize = 16;

/// Keypoints per MoveNet pose
pub const KEYPOINT_COUNT: usize = 17;

/// Values per keypoint in a flat buffer (x, y, score)
pub const FLAT_STRIDE: usize = 3;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single tracked body landmark
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Confidence in [0, 1]; missing scores count as no confidence
    #[serde(default)]
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Self {
        Self { x, y, score }
    }

    /// Euclidean distance in pixels
    pub fn distance_to(&self, other: &Keypoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Strictly above the threshold
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}

/// All keypoints estimated for one subject in one frame.
///
/// Index `i` names the same landmark in every set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeypointSet {
    keypoints: Vec<Keypoint>,
}

impl KeypointSet {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Build from `[x0, y0, s0, x1, y1, s1, ...]`
    pub fn from_flat(data: &[f32]) -> Result<Self, KeypointError> {
        if data.len() % FLAT_STRIDE != 0 {
            return Err(KeypointError::RaggedBuffer(data.len()));
        }

        Ok(data
            .chunks_exact(FLAT_STRIDE)
            .map(|kp| Keypoint::new(kp[0], kp[1], kp[2]))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keypoint> {
        self.keypoints.iter()
    }

    pub fn as_slice(&self) -> &[Keypoint] {
        &self.keypoints
    }

    /// Keypoints whose confidence exceeds `threshold`
    pub fn confident(&self, threshold: f32) -> impl Iterator<Item = &Keypoint> {
        self.keypoints.iter().filter(move |kp| kp.is_confident(threshold))
    }
}

impl From<Vec<Keypoint>> for KeypointSet {
    fn from(keypoints: Vec<Keypoint>) -> Self {
        Self::new(keypoints)
    }
}

impl FromIterator<Keypoint> for KeypointSet {
    fn from_iter<I: IntoIterator<Item = Keypoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeypointSet {
    type Item = &'a Keypoint;
    type IntoIter = std::slice::Iter<'a, Keypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One detected subject as returned by the estimator
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseResult {
    pub keypoints: KeypointSet,
    /// Overall pose confidence, when the model reports one
    #[serde(default)]
    pub score: Option<f32>,
}

impl PoseResult {
    pub fn new(keypoints: KeypointSet) -> Self {
        Self {
            keypoints,
            score: None,
        }
    }
}

impl From<KeypointSet> for PoseResult {
    fn from(keypoints: KeypointSet) -> Self {
        Self::new(keypoints)
    }
}
