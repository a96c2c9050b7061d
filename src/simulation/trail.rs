//! Bounded history of recent bob positions for trail rendering
//!
//! Each `push` first evicts the oldest point when the buffer already holds
//! more than `capacity` points, then appends the new point unless it equals
//! the most recent one. Because eviction looks at the length *before* the
//! append, the buffer settles at `capacity + 1` points. That extra point is
//! kept on purpose so trails match the reference animations.

use std::collections::VecDeque;

use super::error::{SimError, Result};
use super::states::{NVec2, Segment};

/// Trail length used when a scenario does not set one
pub const DEFAULT_TRAIL_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: VecDeque<NVec2>, // oldest first
    capacity: usize,
}

impl TrailBuffer {
    /// Empty trail; fails with `InvalidConfiguration` when `capacity == 0`
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidConfiguration("trail capacity must be > 0".into()));
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Trail that already contains the bob's starting position
    pub fn seeded(capacity: usize, start: NVec2) -> Result<Self> {
        let mut trail = Self::new(capacity)?;
        trail.points.push_back(start);
        Ok(trail)
    }

    pub fn push(&mut self, point: NVec2) {
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }

        // skip zero-length pieces, e.g. at a turning point
        match self.points.back() {
            Some(last) if (point - last).norm() == 0.0 => {}
            _ => self.points.push_back(point),
        }
    }

    /// Consecutive point pairs, oldest first; `len() - 1` of them
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(a, b)| (*a, *b))
    }

    pub fn points(&self) -> impl Iterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&NVec2> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self {
            points: VecDeque::with_capacity(DEFAULT_TRAIL_CAPACITY + 1),
            capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}
