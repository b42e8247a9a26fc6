//! Boundary events driving the sweep.
//!
//! Every interval contributes one `Start` and one `End` event. Events are
//! sorted by time, then kind (`Start` before `End`), then priority, which
//! is exactly the derived ordering of [`Event`].

use crate::interval::{Coordinate, Interval, Priority};

/// Kind of boundary. `Start` orders before `End` at the same instant so an
/// interval ending where another begins hands off without a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Start,
    End,
}

/// A single interval boundary.
///
/// Field order matters: the derived `Ord` compares `time`, then `kind`,
/// then `priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Event<T> {
    pub time: T,
    pub kind: EventKind,
    pub priority: Priority,
}

impl<T: Coordinate> Event<T> {
    #[inline]
    pub fn start(time: T, priority: Priority) -> Self {
        Self {
            time,
            kind: EventKind::Start,
            priority,
        }
    }

    #[inline]
    pub fn end(time: T, priority: Priority) -> Self {
        Self {
            time,
            kind: EventKind::End,
            priority,
        }
    }

    /// The two events of an interval, normalized so the start comes first.
    #[inline]
    pub fn pair(interval: &Interval<T>) -> [Self; 2] {
        let iv = interval.normalized();
        [Self::start(iv.start, iv.priority), Self::end(iv.end, iv.priority)]
    }
}

/// Convert intervals into the totally ordered event sequence.
///
/// Inverted intervals are swapped before their events are emitted. Since
/// the ordering is total over every field, an unstable sort is deterministic.
pub fn build_events<T: Coordinate>(intervals: &[Interval<T>]) -> Vec<Event<T>> {
    let mut events: Vec<Event<T>> = Vec::with_capacity(intervals.len() * 2);

    for interval in intervals {
        events.extend(Event::pair(interval));
    }

    events.sort_unstable();
    events
}
