//! Track-parallel merging using Rayon.
//!
//! Tracks are independent timelines, so each one is swept on its own and the
//! per-track sweeps can run concurrently.

use crate::interval::Interval;
use crate::records::Record;
use crate::sweep::{Strategy, Sweep};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Minimum number of intervals before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Intervals grouped by track name.
pub type TrackGroups = FxHashMap<String, Vec<Interval<i64>>>;

/// Group records by track for parallel processing.
pub fn group_by_track(records: Vec<Record>) -> TrackGroups {
    let mut groups: TrackGroups = FxHashMap::default();

    for record in records {
        groups.entry(record.track).or_default().push(record.interval);
    }

    groups
}

/// Merge every track, returning results sorted by track name.
///
/// Runs sequentially below [`PARALLEL_THRESHOLD`] total intervals.
pub fn merge_tracks(groups: TrackGroups, strategy: Strategy) -> Vec<(String, Sweep<i64>)> {
    let total: usize = groups.values().map(|v| v.len()).sum();

    let mut results: Vec<(String, Sweep<i64>)> = if total < PARALLEL_THRESHOLD {
        groups
            .into_iter()
            .map(|(track, intervals)| {
                let sweep = strategy.merge(&intervals);
                (track, sweep)
            })
            .collect()
    } else {
        groups
            .into_par_iter()
            .map(|(track, intervals)| {
                let sweep = strategy.merge(&intervals);
                (track, sweep)
            })
            .collect()
    };

    results.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Statistics for parallel work distribution.
#[derive(Debug, Clone)]
pub struct ParallelStats {
    pub total_intervals: usize,
    pub num_tracks: usize,
    /// Intervals per track, largest first.
    pub intervals_per_track: Vec<(String, usize)>,
}

impl ParallelStats {
    pub fn from_groups(groups: &TrackGroups) -> Self {
        let mut intervals_per_track: Vec<(String, usize)> = groups
            .iter()
            .map(|(track, intervals)| (track.clone(), intervals.len()))
            .collect();
        intervals_per_track.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_intervals: groups.values().map(|v| v.len()).sum(),
            num_tracks: groups.len(),
            intervals_per_track,
        }
    }

    /// True if the grouping is large enough to be merged in parallel.
    pub fn is_parallel(&self) -> bool {
        self.total_intervals >= PARALLEL_THRESHOLD
    }
}
