//! Counter-scan sweep.
//!
//! After every event the winner is recomputed from scratch by scanning the
//! counter from the lowest priority. Simple, and cheap when priorities are
//! few and dense.

use super::counter::PriorityCounter;
use super::event::{Event, EventKind};
use super::sequence::SequenceBuilder;
use super::{Sweep, SweepStats};
use crate::interval::Coordinate;

/// Sweep ordered events, rescanning the counter after each one.
pub fn sweep<T, C>(events: &[Event<T>], mut counter: C) -> Sweep<T>
where
    T: Coordinate,
    C: PriorityCounter,
{
    let mut out = SequenceBuilder::with_capacity(events.len() / 2);
    let mut stats = SweepStats::default();

    for e in events {
        match e.kind {
            EventKind::Start => counter.increment(e.priority),
            EventKind::End => counter.decrement(e.priority),
        }
        stats.observe(counter.depth());

        let winner = counter.winner();
        if winner == out.current() {
            continue;
        }

        if out.close_at(e.time).is_some() {
            stats.switches += 1;
        }
        if let Some(p) = winner {
            out.open_at(e.time, p);
        }
    }

    stats.events = events.len();
    let intervals = out.finish();
    stats.emitted = intervals.len();
    Sweep { intervals, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::sweep::counter::{DenseCounter, SparseCounter};
    use crate::sweep::event::build_events;

    #[test]
    fn test_scan_overlap() {
        let events = build_events(&[
            Interval::new(5i64, 13, 0),
            Interval::new(10, 20, 1),
            Interval::new(17, 25, 2),
        ]);
        let result = sweep(&events, DenseCounter::new());

        assert_eq!(
            result.intervals,
            vec![
                Interval::new(5, 13, 0),
                Interval::new(13, 20, 1),
                Interval::new(20, 25, 2),
            ]
        );
        assert_eq!(result.stats.events, 6);
        assert_eq!(result.stats.emitted, 3);
        assert_eq!(result.stats.max_depth, 2);
    }

    #[test]
    fn test_scan_sparse_large_priorities() {
        let events = build_events(&[
            Interval::new(0i64, 10, 4_000_000_000),
            Interval::new(3, 6, 2_000_000_000),
        ]);
        let result = sweep(&events, SparseCounter::new());

        assert_eq!(
            result.intervals,
            vec![
                Interval::new(0, 3, 4_000_000_000),
                Interval::new(3, 6, 2_000_000_000),
                Interval::new(6, 10, 4_000_000_000),
            ]
        );
    }

    #[test]
    fn test_scan_degenerate_inside_lower_priority() {
        let events = build_events(&[Interval::new(5i64, 20, 1), Interval::new(10, 10, 0)]);
        let result = sweep(&events, DenseCounter::new());

        assert_eq!(result.intervals, vec![Interval::new(5, 20, 1)]);
    }

    #[test]
    #[should_panic(expected = "illegal counter decrement")]
    fn test_scan_unpaired_end_panics() {
        let events = vec![Event::end(5i64, 0)];
        sweep(&events, DenseCounter::new());
    }
}
