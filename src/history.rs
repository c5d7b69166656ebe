//! Bounded snapshot history backing undo.
//!
//! Each entry is a full deep copy of the editable state. When the stack is at
//! capacity the oldest entry is evicted before a new one is pushed.

use crate::types::{Point, Polygon};
use std::collections::VecDeque;

/// Deep copy of the editable state at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySnapshot {
    /// Finalized polygons, colors included
    pub polygons: Vec<Polygon>,
    /// In-progress vertex sequence
    pub current_points: Vec<Point>,
}

/// Stack of snapshots with FIFO eviction once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistorySnapshot>,
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` snapshots (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a snapshot, evicting the oldest entry first when full.
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<HistorySnapshot> {
        self.entries.pop_back()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
