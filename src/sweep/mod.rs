//! Sweep-line merge of prioritized intervals.
//!
//! This module provides the core algorithm:
//! - Event building (interval boundaries in a total order)
//! - Active-priority counters (dense and sparse)
//! - Two interchangeable sweep strategies producing identical output
//!
//! Work is O(n log n) for sorting events plus one pass over them.

pub mod counter;
pub mod event;
pub mod incremental;
pub mod scan;
pub mod sequence;

pub use counter::{DenseCounter, PriorityCounter, SparseCounter, DENSE_PRIORITY_LIMIT};
pub use event::{build_events, Event, EventKind};
pub use sequence::SequenceBuilder;

use crate::interval::{Coordinate, Interval, Priority};
use std::fmt;

/// Which sweep algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Rescan the counter from priority 0 after every event.
    Scan,
    /// Track the winner and only search forward from it when it ends.
    #[default]
    Incremental,
}

impl Strategy {
    /// Parse a strategy name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scan" | "counter-scan" => Some(Self::Scan),
            "incremental" | "inc" => Some(Self::Incremental),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Incremental => "incremental",
        }
    }

    /// Sweep ordered events with this strategy.
    ///
    /// The scan strategy indexes priorities densely while they stay below
    /// [`DENSE_PRIORITY_LIMIT`]; everything else uses the sparse counter.
    pub fn sweep<T: Coordinate>(self, events: &[Event<T>]) -> Sweep<T> {
        match self {
            Self::Scan => match max_priority(events) {
                Some(max) if max < DENSE_PRIORITY_LIMIT => {
                    scan::sweep(events, DenseCounter::with_max_priority(max))
                }
                _ => scan::sweep(events, SparseCounter::new()),
            },
            Self::Incremental => incremental::sweep(events, SparseCounter::new()),
        }
    }

    /// Build events for the intervals and sweep them.
    pub fn merge<T: Coordinate>(self, intervals: &[Interval<T>]) -> Sweep<T> {
        self.sweep(&build_events(intervals))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn max_priority<T>(events: &[Event<T>]) -> Option<Priority> {
    events.iter().map(|e| e.priority).max()
}

/// Counters collected during one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Events consumed.
    pub events: usize,
    /// Output intervals emitted.
    pub emitted: usize,
    /// Times an open interval was closed by a priority change or its end.
    pub switches: usize,
    /// Largest number of input intervals open at once.
    pub max_depth: usize,
}

impl SweepStats {
    #[inline]
    pub(crate) fn observe(&mut self, depth: usize) {
        if depth > self.max_depth {
            self.max_depth = depth;
        }
    }

    /// Accumulate another sweep's counters (e.g. from another track).
    pub fn absorb(&mut self, other: &SweepStats) {
        self.events += other.events;
        self.emitted += other.emitted;
        self.switches += other.switches;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Result of a sweep: the merged sequence and its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sweep<T> {
    pub intervals: Vec<Interval<T>>,
    pub stats: SweepStats,
}
