//! Output accumulator shared by both sweep strategies.

use crate::interval::{Coordinate, Interval, Priority};

/// Builds the merged output sequence one open/close at a time.
///
/// Keeps two guarantees regardless of how the strategy drives it:
/// no zero-width interval is ever emitted, and an interval reopened at the
/// instant a same-priority interval closed extends that interval instead of
/// producing a touching duplicate.
#[derive(Debug)]
pub struct SequenceBuilder<T> {
    output: Vec<Interval<T>>,
    /// Start and priority of the interval currently being emitted.
    open: Option<(T, Priority)>,
}

impl<T: Coordinate> Default for SequenceBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coordinate> SequenceBuilder<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            open: None,
        }
    }

    /// Priority of the interval currently open, if any.
    #[inline]
    pub fn current(&self) -> Option<Priority> {
        self.open.map(|(_, p)| p)
    }

    /// Open a new output interval at `time`.
    #[inline]
    pub fn open_at(&mut self, time: T, priority: Priority) {
        debug_assert!(self.open.is_none(), "interval already open");
        let start = match self.output.last() {
            Some(last) if last.end == time && last.priority == priority => {
                let start = last.start;
                self.output.pop();
                start
            }
            _ => time,
        };
        self.open = Some((start, priority));
    }

    /// Close the open interval at `time`, returning its priority.
    ///
    /// An interval that would be zero-width is dropped.
    #[inline]
    pub fn close_at(&mut self, time: T) -> Option<Priority> {
        let (start, priority) = self.open.take()?;
        if start < time {
            self.output.push(Interval::new(start, time, priority));
        }
        Some(priority)
    }

    /// Number of intervals emitted so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Finish the sequence. Every interval must have been closed.
    pub fn finish(self) -> Vec<Interval<T>> {
        debug_assert!(self.open.is_none(), "sweep ended with an open interval");
        self.output
    }
}
