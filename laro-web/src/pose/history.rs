//! Rolling pose history
//!
//! Keeps the last few keypoint sets in chronological order. The motion loop
//! compares each new pose against the newest entry here.

use std::collections::VecDeque;

use super::KeypointSet;

/// Number of poses kept by default
pub const DEFAULT_CAPACITY: usize = 5;

/// Bounded FIFO of recent poses
#[derive(Clone, Debug)]
pub struct PoseHistory {
    /// Oldest at the front, newest at the back
    entries: VecDeque<KeypointSet>,
    capacity: usize,
}

impl PoseHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity of zero is raised to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a pose, evicting and returning the oldest one when full
    pub fn push(&mut self, pose: KeypointSet) -> Option<KeypointSet> {
        self.entries.push_back(pose);

        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Newest pose
    pub fn latest(&self) -> Option<&KeypointSet> {
        self.entries.back()
    }

    /// The pose pushed just before the newest one
    pub fn previous(&self) -> Option<&KeypointSet> {
        self.entries.len().checked_sub(2).and_then(|i| self.entries.get(i))
    }

    /// `(newest, previous)`, or None when empty
    pub fn latest_pair(&self) -> Option<(&KeypointSet, Option<&KeypointSet>)> {
        self.latest().map(|newest| (newest, self.previous()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &KeypointSet> {
        self.entries.iter()
    }

    /// Drop everything (session start / reset)
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl Default for PoseHistory {
    fn default() -> Self {
        Self::new()
    }
}
