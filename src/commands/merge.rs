//! Merge command implementation.
//!
//! Uses an O(n log n) event sort + O(n) single-pass sweep per track.

use crate::config;
use crate::interval::{Coordinate, Interval};
use crate::output::RecordWriter;
use crate::parallel::{group_by_track, merge_tracks};
use crate::records::{Record, RecordError, RecordReader};
use crate::sweep::{Strategy, SweepStats};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Merge command configuration.
#[derive(Debug, Clone)]
pub struct MergeCommand {
    /// Sweep algorithm to use
    pub strategy: Strategy,
}

impl Default for MergeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeCommand {
    /// Create a merge command using the globally configured strategy.
    pub fn new() -> Self {
        Self {
            strategy: config::default_strategy(),
        }
    }

    /// Set the sweep strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Merge intervals into a non-overlapping sequence sorted by start.
    pub fn merge<T: Coordinate>(&self, intervals: &[Interval<T>]) -> Vec<Interval<T>> {
        self.strategy.merge(intervals).intervals
    }

    /// Merge intervals, also returning sweep statistics.
    pub fn merge_with_stats<T: Coordinate>(
        &self,
        intervals: &[Interval<T>],
    ) -> (Vec<Interval<T>>, SweepStats) {
        let sweep = self.strategy.merge(intervals);
        (sweep.intervals, sweep.stats)
    }

    /// Merge tracked records. Each track is merged independently and the
    /// result is ordered by track name, then start.
    pub fn merge_records(&self, records: Vec<Record>) -> Vec<Record> {
        merge_tracks(group_by_track(records), self.strategy)
            .into_iter()
            .flat_map(|(track, sweep)| {
                sweep
                    .intervals
                    .into_iter()
                    .map(move |iv| Record::new(track.clone(), iv))
            })
            .collect()
    }

    /// Execute merge on a file.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input: P,
        output: &mut W,
    ) -> Result<MergeStats, RecordError> {
        let file = File::open(input.as_ref())?;
        self.run_reader(file, output)
    }

    /// Execute merge on stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<MergeStats, RecordError> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), output)
    }

    /// Execute merge on any reader.
    ///
    /// Algorithm:
    /// 1. Read all records
    /// 2. Group by track
    /// 3. Sweep each track (in parallel for large inputs)
    /// 4. Write results in track order
    pub fn run_reader<R: Read, W: Write>(
        &self,
        input: R,
        output: &mut W,
    ) -> Result<MergeStats, RecordError> {
        let records: Vec<Record> = RecordReader::new(input)
            .records()
            .collect::<Result<_, _>>()?;

        let mut stats = MergeStats {
            strategy: self.strategy,
            records_read: records.len(),
            ..MergeStats::default()
        };

        let merged = merge_tracks(group_by_track(records), self.strategy);
        stats.tracks = merged.len();

        let mut writer = RecordWriter::new(output);
        for (track, sweep) in &merged {
            writer.write_track(track, &sweep.intervals)?;
            stats.sweep.absorb(&sweep.stats);
        }
        writer.flush()?;
        stats.intervals_written = writer.written();

        Ok(stats)
    }
}

/// Statistics from a merge run.
#[derive(Debug, Clone, Default)]
pub struct MergeStats {
    pub strategy: Strategy,
    pub records_read: usize,
    pub tracks: usize,
    pub intervals_written: usize,
    pub sweep: SweepStats,
}

impl MergeStats {
    /// Ratio of input records to output intervals.
    pub fn compression_ratio(&self) -> f64 {
        if self.intervals_written == 0 {
            0.0
        } else {
            self.records_read as f64 / self.intervals_written as f64
        }
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Strategy: {}, Read: {}, Tracks: {}, Written: {}, Max depth: {}, Compression: {:.2}x",
            self.strategy,
            self.records_read,
            self.tracks,
            self.intervals_written,
            self.sweep.max_depth,
            self.compression_ratio()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64, priority: u32) -> Interval<i64> {
        Interval::new(start, end, priority)
    }

    #[test]
    fn test_basic_merge() {
        let cmd = MergeCommand::new();
        let merged = cmd.merge(&[iv(5, 10, 0), iv(20, 25, 2), iv(12, 16, 1)]);

        assert_eq!(merged, vec![iv(5, 10, 0), iv(12, 16, 1), iv(20, 25, 2)]);
    }

    #[test]
    fn test_merge_empty() {
        let cmd = MergeCommand::new();
        assert!(cmd.merge::<i64>(&[]).is_empty());
    }

    #[test]
    fn test_merge_adjacent_same_priority_fuses() {
        for strategy in [Strategy::Scan, Strategy::Incremental] {
            let cmd = MergeCommand::new().with_strategy(strategy);
            let merged = cmd.merge(&[iv(5, 10, 0), iv(10, 20, 1), iv(20, 23, 2), iv(23, 26, 2)]);

            assert_eq!(merged, vec![iv(5, 10, 0), iv(10, 20, 1), iv(20, 26, 2)]);
        }
    }

    #[test]
    fn test_merge_with_stats() {
        let cmd = MergeCommand::new().with_strategy(Strategy::Scan);
        let (merged, stats) = cmd.merge_with_stats(&[iv(3, 10, 4), iv(3, 10, 2), iv(3, 10, 5)]);

        assert_eq!(merged, vec![iv(3, 10, 2)]);
        assert_eq!(stats.events, 6);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.emitted, 1);
    }

    #[test]
    fn test_merge_records() {
        let cmd = MergeCommand::new();
        let records = vec![
            Record::new("y", iv(0, 5, 0)),
            Record::new("x", iv(10, 5, 1)),
            Record::new("x", iv(7, 9, 0)),
        ];

        let merged = cmd.merge_records(records);

        assert_eq!(
            merged,
            vec![
                Record::new("x", iv(5, 7, 1)),
                Record::new("x", iv(7, 9, 0)),
                Record::new("x", iv(9, 10, 1)),
                Record::new("y", iv(0, 5, 0)),
            ]
        );
    }

    #[test]
    fn test_run_reader() {
        let input = "# tracks\nt\t5\t13\t0\nt\t10\t20\t1\nt\t17\t25\t2\nu\t1\t1\t0\n";
        let mut output = Vec::new();

        let stats = MergeCommand::new()
            .run_reader(input.as_bytes(), &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "t\t5\t13\t0\nt\t13\t20\t1\nt\t20\t25\t2\n"
        );
        assert_eq!(stats.records_read, 4);
        assert_eq!(stats.tracks, 2);
        assert_eq!(stats.intervals_written, 3);
        assert_eq!(stats.sweep.max_depth, 2);
    }

    #[test]
    fn test_run_reader_rejects_negative_priority() {
        let mut output = Vec::new();
        let result = MergeCommand::new().run_reader("t\t0\t5\t-2\n".as_bytes(), &mut output);

        assert!(matches!(result, Err(RecordError::Interval { line: 1, .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_stats_display() {
        let stats = MergeStats {
            strategy: Strategy::Scan,
            records_read: 4,
            tracks: 1,
            intervals_written: 2,
            sweep: SweepStats {
                max_depth: 3,
                ..SweepStats::default()
            },
        };

        assert_eq!(
            stats.to_string(),
            "Strategy: scan, Read: 4, Tracks: 1, Written: 2, Max depth: 3, Compression: 2.00x"
        );
    }
}
