//! Pose similarity
//!
//! Average pixel displacement between index-aligned confident keypoints,
//! mapped linearly onto 0-100. No body-scale normalisation: assumes the
//! player stays at roughly the same distance from the camera.

use crate::config::MotionConfig;
use crate::pose::KeypointSet;

/// Both keypoints of a pair must exceed this confidence
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Similarity of two identical poses
pub const MAX_SIMILARITY: f32 = 100.0;

/// Pixels of average displacement per similarity point
pub const DISTANCE_SCALE: f32 = 2.0;

#[derive(Clone, Copy, Debug)]
pub struct SimilarityScorer {
    confidence_threshold: f32,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
        }
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Mean distance over valid pairs, None if there are none
    pub fn average_distance(&self, a: &KeypointSet, b: &KeypointSet) -> Option<f32> {
        let threshold = self.confidence_threshold;

        // zip stops at the shorter set
        let (total, valid) = a
            .iter()
            .zip(b.iter())
            .filter(|(kp1, kp2)| kp1.is_confident(threshold) && kp2.is_confident(threshold))
            .fold((0.0f32, 0usize), |(total, valid), (kp1, kp2)| {
                (total + kp1.distance_to(kp2), valid + 1)
            });

        if valid == 0 {
            None
        } else {
            Some(total / valid as f32)
        }
    }

    /// Similarity in [0, 100]; 0 when either pose is empty or no pair is valid
    pub fn similarity(&self, a: &KeypointSet, b: &KeypointSet) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        match self.average_distance(a, b) {
            Some(avg) => (MAX_SIMILARITY - avg / DISTANCE_SCALE).max(0.0),
            None => 0.0,
        }
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Similarity with the default confidence threshold
pub fn similarity(a: &KeypointSet, b: &KeypointSet) -> f32 {
    SimilarityScorer::new().similarity(a, b)
}
