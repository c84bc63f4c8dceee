//! Cumulative score and the feedback line shown under it

use super::MovementAward;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
    total: u64,
    feedback: String,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Add the award's points and replace feedback with its tier message
    pub fn apply(&mut self, award: &MovementAward) {
        self.total = self.total.saturating_add(u64::from(award.points));
        self.feedback = award.feedback();
    }

    /// Lifecycle messages (camera ready, detector loaded, ...)
    pub fn set_feedback(&mut self, message: impl Into<String>) {
        self.feedback = message.into();
    }

    /// Zero the score and clear feedback
    pub fn reset(&mut self) {
        self.total = 0;
        self.feedback.clear();
    }
}
