//! Scoring module - similarity, movement awards, running score
//!
//! Re-exports only. All logic in submodules.

mod movement;
mod similarity;
mod state;

pub use movement::{
    FeedbackTier, MovementAward, MovementScorer, HIGH_THRESHOLD, MEDIUM_THRESHOLD, NOISE_FLOOR,
};
pub use similarity::{
    similarity, SimilarityScorer, CONFIDENCE_THRESHOLD, DISTANCE_SCALE, MAX_SIMILARITY,
};
pub use state::ScoreState;
