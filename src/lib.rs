// Clippy allows for the whole crate
#![allow(clippy::should_implement_trait)]

//! prioseq: prioritized interval sequencing
//!
//! This library merges possibly-overlapping, half-open intervals carrying a
//! priority (0 = highest) into a minimal sequence of non-overlapping
//! intervals. At every point the output carries the highest priority of the
//! input intervals covering that point.
//!
//! # Features
//!
//! - **Sweep-line merge**: O(n log n) with two interchangeable strategies
//! - **Any integer domain**: coordinates may be any primitive integer type
//! - **Track-parallel processing**: independent timelines merged with Rayon
//!
//! # Example
//!
//! ```rust
//! use prioseq::{merge, Interval};
//!
//! let merged = merge(&[
//!     Interval::new(5, 13, 0),
//!     Interval::new(10, 20, 1),
//!     Interval::new(17, 25, 2),
//! ]);
//!
//! assert_eq!(
//!     merged,
//!     vec![
//!         Interval::new(5, 13, 0),
//!         Interval::new(13, 20, 1),
//!         Interval::new(20, 25, 2),
//!     ]
//! );
//! ```

pub mod commands;
pub mod config;
pub mod interval;
pub mod output;
pub mod parallel;
pub mod records;
pub mod sweep;

// Re-export commonly used types
pub use interval::{Coordinate, Interval, IntervalError, Priority};
pub use records::{parse_records, read_records, Record, RecordError, RecordReader};
pub use sweep::Strategy;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Merge intervals into a non-overlapping sequence sorted by start.
///
/// Inverted intervals are normalized, empty ones contribute nothing. Uses
/// the strategy selected in [`config`].
pub fn merge<T: Coordinate>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    commands::MergeCommand::new().merge(intervals)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{GenerateCommand, MergeCommand, VerifyCommand};
    pub use crate::interval::{Coordinate, Interval, Priority};
    pub use crate::merge;
    pub use crate::records::{parse_records, read_records, Record, RecordReader};
    pub use crate::sweep::Strategy;
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_workflow() {
        use crate::commands::MergeCommand;
        use crate::records::parse_records;

        let content = "a\t5\t25\t3\na\t10\t20\t2\na\t13\t17\t1\n";
        let records = parse_records(content).unwrap();

        let merged = MergeCommand::new().merge_records(records);

        assert_eq!(merged.len(), 5);
        assert_eq!(merged[2].start(), 13);
        assert_eq!(merged[2].end(), 17);
        assert_eq!(merged[2].interval.priority, 1);
    }

    #[test]
    fn test_merge_then_verify_workflow() {
        use crate::commands::{validate_sequence, GenerateCommand, GenerateConfig};
        use crate::parallel::{group_by_track, merge_tracks};
        use crate::sweep::Strategy;

        let records = GenerateCommand::new(GenerateConfig {
            count: 500,
            tracks: 4,
            span: 2_000,
            inverted_fraction: 0.1,
            ..GenerateConfig::default()
        })
        .generate()
        .unwrap();

        for (_, sweep) in merge_tracks(group_by_track(records), Strategy::Scan) {
            assert_eq!(validate_sequence(&sweep.intervals), Ok(()));
        }
    }
}
