//! Movement scoring
//!
//! Turns the similarity between consecutive poses into a movement amount,
//! points, and a feedback tier. Stateless: the caller owns the running score.

use crate::config::MotionConfig;

use super::similarity::MAX_SIMILARITY;

/// Movement at or below this is measurement noise
pub const NOISE_FLOOR: f32 = 5.0;

/// Above this movement feedback is at least Medium
pub const MEDIUM_THRESHOLD: f32 = 15.0;

/// Above this movement feedback is High
pub const HIGH_THRESHOLD: f32 = 30.0;

/// Feedback tiers, keyed by movement magnitude
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTier {
    Low,
    Medium,
    High,
}

impl FeedbackTier {
    pub fn name(&self) -> &'static str {
        match self {
            FeedbackTier::Low => "LOW",
            FeedbackTier::Medium => "MEDIUM",
            FeedbackTier::High => "HIGH",
        }
    }

    /// Player-facing message for this tier
    pub fn message(&self, points: u32) -> String {
        match self {
            FeedbackTier::High => format!("🔥 Amazing moves! +{} points!", points),
            FeedbackTier::Medium => format!("👍 Great dancing! +{} points", points),
            FeedbackTier::Low => format!("💃 Keep moving! +{} points", points),
        }
    }
}

/// Result of one tick with noticeable motion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementAward {
    pub movement: f32,
    pub points: u32,
    pub tier: FeedbackTier,
}

impl MovementAward {
    pub fn feedback(&self) -> String {
        self.tier.message(self.points)
    }
}

/// Movement scorer with tier thresholds
#[derive(Clone, Copy, Debug)]
pub struct MovementScorer {
    noise_floor: f32,
    medium_threshold: f32,
    high_threshold: f32,
}

impl MovementScorer {
    pub fn new() -> Self {
        Self {
            noise_floor: NOISE_FLOOR,
            medium_threshold: MEDIUM_THRESHOLD,
            high_threshold: HIGH_THRESHOLD,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self {
            noise_floor: config.noise_floor,
            medium_threshold: config.medium_threshold,
            high_threshold: config.high_threshold,
        }
    }

    /// Movement implied by a similarity score
    pub fn movement(similarity: f32) -> f32 {
        MAX_SIMILARITY - similarity
    }

    /// Score a similarity between the newest pose and the previous one
    pub fn score(&self, similarity: f32) -> Option<MovementAward> {
        self.award(Self::movement(similarity))
    }

    /// None while the player is holding still
    pub fn award(&self, movement: f32) -> Option<MovementAward> {
        if movement <= self.noise_floor {
            return None;
        }

        let points = (movement / 2.0).floor() as u32;

        Some(MovementAward {
            movement,
            points,
            tier: self.classify(movement),
        })
    }

    /// Tier for a movement above the noise floor (highest threshold first)
    pub fn classify(&self, movement: f32) -> FeedbackTier {
        if movement > self.high_threshold {
            FeedbackTier::High
        } else if movement > self.medium_threshold {
            FeedbackTier::Medium
        } else {
            FeedbackTier::Low
        }
    }
}

impl Default for MovementScorer {
    fn default() -> Self {
        Self::new()
    }
}
