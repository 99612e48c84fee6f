//! Time-indexed history bounded by a maximum age, for kill-cams.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use arena_core::constants::REPLAY_MAX_AGE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame<T> {
    pub time: f64,
    pub data: T,
}

/// Frames are appended in time order; anything older than `max_age`
/// relative to the newest push is trimmed from the front.
#[derive(Debug, Clone)]
pub struct ReplayBuffer<T> {
    frames: VecDeque<ReplayFrame<T>>,
    max_age: f64,
}

impl<T> Default for ReplayBuffer<T> {
    fn default() -> Self {
        Self::new(REPLAY_MAX_AGE)
    }
}

impl<T> ReplayBuffer<T> {
    pub fn new(max_age: f64) -> Self {
        Self {
            frames: VecDeque::new(),
            max_age,
        }
    }

    pub fn push(&mut self, time: f64, data: T) {
        self.frames.push_back(ReplayFrame { time, data });
        while let Some(front) = self.frames.front() {
            if time - front.time > self.max_age {
                self.frames.pop_front();
            } else {
                break;
            }
        }
    }

    /// Frames with `now - seconds <= time <= now`.
    pub fn get_last(&self, seconds: f64, now: f64) -> Vec<&ReplayFrame<T>> {
        let start = now - seconds;
        self.frames
            .iter()
            .filter(|f| f.time >= start && f.time <= now)
            .collect()
    }

    /// Newest frame at or before `t`; the earliest frame if `t` precedes
    /// all data; `None` when empty.
    pub fn sample_at(&self, t: f64) -> Option<&ReplayFrame<T>> {
        let after = self.frames.partition_point(|f| f.time <= t);
        match after {
            0 => self.frames.front(),
            n => self.frames.get(n - 1),
        }
    }

    pub fn latest(&self) -> Option<&ReplayFrame<T>> {
        self.frames.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplayFrame<T>> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
