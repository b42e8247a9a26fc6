//! Active-priority multisets.
//!
//! A counter tracks how many intervals are currently open at each priority.
//! The winning priority is the smallest one with a positive count.
//!
//! Decrementing a priority that has no open interval means the event stream
//! was not built from paired boundaries. That is an internal defect, not bad
//! input, so both counters panic instead of returning an error.

use crate::interval::Priority;
use std::collections::BTreeMap;

/// Largest priority the scan strategy will index densely.
/// Beyond this the sparse counter is used to bound memory.
pub const DENSE_PRIORITY_LIMIT: Priority = 4096;

/// Per-priority count of open intervals.
pub trait PriorityCounter {
    /// Record one more open interval at `priority`.
    fn increment(&mut self, priority: Priority);

    /// Record that an interval at `priority` closed.
    ///
    /// # Panics
    ///
    /// Panics if no interval is open at `priority`.
    fn decrement(&mut self, priority: Priority);

    /// Number of open intervals at `priority`.
    fn count(&self, priority: Priority) -> usize;

    /// Smallest priority with a positive count, scanning from zero.
    fn winner(&self) -> Option<Priority>;

    /// Smallest priority strictly greater than `after` with a positive count.
    fn next_active_after(&self, after: Priority) -> Option<Priority>;

    /// Total number of open intervals across all priorities.
    fn depth(&self) -> usize;
}

#[cold]
#[inline(never)]
fn illegal_decrement(priority: Priority) -> ! {
    panic!("illegal counter decrement for priority {}", priority)
}

/// Dense counter indexed directly by priority.
///
/// Grows on demand to `priority + 1` slots, so only suitable for small,
/// compact priority ranges.
#[derive(Debug, Default, Clone)]
pub struct DenseCounter {
    counts: Vec<usize>,
    depth: usize,
}

impl DenseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter with room for priorities `0..=max_priority`.
    pub fn with_max_priority(max_priority: Priority) -> Self {
        Self {
            counts: vec![0; max_priority as usize + 1],
            depth: 0,
        }
    }
}

impl PriorityCounter for DenseCounter {
    #[inline]
    fn increment(&mut self, priority: Priority) {
        let idx = priority as usize;
        if self.counts.len() <= idx {
            self.counts.resize(idx + 1, 0);
        }
        self.counts[idx] += 1;
        self.depth += 1;
    }

    #[inline]
    fn decrement(&mut self, priority: Priority) {
        match self.counts.get_mut(priority as usize) {
            Some(c) if *c > 0 => {
                *c -= 1;
                self.depth -= 1;
            }
            _ => illegal_decrement(priority),
        }
    }

    #[inline]
    fn count(&self, priority: Priority) -> usize {
        self.counts.get(priority as usize).copied().unwrap_or(0)
    }

    fn winner(&self) -> Option<Priority> {
        self.counts
            .iter()
            .position(|&c| c > 0)
            .map(|i| i as Priority)
    }

    fn next_active_after(&self, after: Priority) -> Option<Priority> {
        let from = after as usize + 1;
        self.counts
            .get(from..)?
            .iter()
            .position(|&c| c > 0)
            .map(|i| (from + i) as Priority)
    }

    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }
}

/// Sparse counter keyed by priority.
///
/// Only priorities with open intervals are stored, so the winner is always
/// the first key and any priority value is cheap.
#[derive(Debug, Default, Clone)]
pub struct SparseCounter {
    counts: BTreeMap<Priority, usize>,
    depth: usize,
}

impl SparseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct priorities currently open.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

impl PriorityCounter for SparseCounter {
    #[inline]
    fn increment(&mut self, priority: Priority) {
        *self.counts.entry(priority).or_insert(0) += 1;
        self.depth += 1;
    }

    #[inline]
    fn decrement(&mut self, priority: Priority) {
        let Some(c) = self.counts.get_mut(&priority) else {
            illegal_decrement(priority)
        };
        *c -= 1;
        if *c == 0 {
            self.counts.remove(&priority);
        }
        self.depth -= 1;
    }

    #[inline]
    fn count(&self, priority: Priority) -> usize {
        self.counts.get(&priority).copied().unwrap_or(0)
    }

    #[inline]
    fn winner(&self) -> Option<Priority> {
        self.counts.keys().next().copied()
    }

    #[inline]
    fn next_active_after(&self, after: Priority) -> Option<Priority> {
        self.counts
            .range(after.checked_add(1)?..)
            .next()
            .map(|(&p, _)| p)
    }

    #[inline]
    fn depth(&self) -> usize {
        self.depth
    }
}
