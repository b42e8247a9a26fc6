//! Verification of merged sequences.
//!
//! A well-formed merged sequence, per track, satisfies:
//! 1. All records for a track are contiguous
//! 2. Intervals are non-empty
//! 3. Each interval starts at or after the previous one's end
//! 4. Touching neighbours never share a priority

use crate::interval::{Coordinate, Interval};
use crate::records::{RecordError, RecordReader};
use rustc_hash::FxHashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// A rule broken by a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceViolation<T> {
    #[error("interval #{index} {interval} is empty")]
    Empty { index: usize, interval: Interval<T> },

    #[error("interval #{index} {interval} overlaps or precedes {previous}")]
    Overlap {
        index: usize,
        previous: Interval<T>,
        interval: Interval<T>,
    },

    #[error("interval #{index} {interval} touches {previous} with the same priority")]
    Unfused {
        index: usize,
        previous: Interval<T>,
        interval: Interval<T>,
    },
}

/// Check a single pair of neighbours.
fn check_pair<T: Coordinate>(
    index: usize,
    previous: &Interval<T>,
    interval: &Interval<T>,
) -> Result<(), SequenceViolation<T>> {
    if interval.start < previous.end {
        return Err(SequenceViolation::Overlap {
            index,
            previous: *previous,
            interval: *interval,
        });
    }
    if previous.touches(interval) && previous.priority == interval.priority {
        return Err(SequenceViolation::Unfused {
            index,
            previous: *previous,
            interval: *interval,
        });
    }
    Ok(())
}

/// Check that a slice is a well-formed merged sequence.
pub fn validate_sequence<T: Coordinate>(
    intervals: &[Interval<T>],
) -> Result<(), SequenceViolation<T>> {
    let mut previous: Option<&Interval<T>> = None;

    for (index, interval) in intervals.iter().enumerate() {
        if interval.is_empty() {
            return Err(SequenceViolation::Empty {
                index,
                interval: *interval,
            });
        }
        if let Some(prev) = previous {
            check_pair(index, prev, interval)?;
        }
        previous = Some(interval);
    }

    Ok(())
}

/// Inline validator for a stream of tracked records.
#[derive(Debug, Default)]
pub struct SequenceValidator {
    prev_track: Option<String>,
    prev: Option<Interval<i64>>,
    seen_tracks: FxHashSet<String>,
    record_count: usize,
}

impl SequenceValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the next record of the stream.
    pub fn validate(&mut self, track: &str, interval: &Interval<i64>) -> Result<(), RecordError> {
        self.record_count += 1;

        if interval.is_empty() {
            return Err(RecordError::InvalidFormat(format!(
                "Empty interval {} at record {} on track '{}'",
                interval, self.record_count, track
            )));
        }

        match self.prev_track.as_deref() {
            Some(pt) if pt == track => {
                if let Some(prev) = &self.prev {
                    check_pair(self.record_count, prev, interval).map_err(|v| {
                        RecordError::InvalidFormat(format!("Track '{}': {}", track, v))
                    })?;
                }
            }
            Some(pt) => {
                // Switching tracks - check we haven't seen this one before
                if self.seen_tracks.contains(track) {
                    return Err(RecordError::InvalidFormat(format!(
                        "Track '{}' at record {} was seen earlier (tracks must be contiguous)",
                        track, self.record_count
                    )));
                }
                self.seen_tracks.insert(pt.to_string());
                self.prev_track = Some(track.to_string());
            }
            None => self.prev_track = Some(track.to_string()),
        }

        self.prev = Some(*interval);
        Ok(())
    }

    /// Number of records validated.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of distinct tracks validated.
    pub fn track_count(&self) -> usize {
        self.seen_tracks.len() + usize::from(self.prev_track.is_some())
    }
}

/// Verify command: checks that a record file is a well-formed merged sequence.
#[derive(Debug, Clone, Default)]
pub struct VerifyCommand;

impl VerifyCommand {
    pub fn new() -> Self {
        Self
    }

    /// Verify a file.
    pub fn run<P: AsRef<Path>>(&self, input: P) -> Result<VerifyReport, RecordError> {
        let file = File::open(input.as_ref())?;
        self.run_reader(file)
    }

    /// Verify any reader, stopping at the first violation.
    pub fn run_reader<R: Read>(&self, input: R) -> Result<VerifyReport, RecordError> {
        let mut validator = SequenceValidator::new();

        for result in RecordReader::new(input).records() {
            let record = result?;
            validator.validate(&record.track, &record.interval)?;
        }

        Ok(VerifyReport {
            records: validator.record_count(),
            tracks: validator.track_count(),
        })
    }
}

/// Summary of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyReport {
    pub records: usize,
    pub tracks: usize,
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OK: {} intervals on {} tracks", self.records, self.tracks)
    }
}
