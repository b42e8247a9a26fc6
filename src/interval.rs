//! Core interval types for prioritized ranges.

use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Precedence of an interval. Lower values win: 0 is the highest priority.
pub type Priority = u32;

/// Errors raised when validating interval data coming from signed sources.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Negative priority: {0} (priorities must be >= 0)")]
    NegativePriority(i64),

    #[error("Priority {0} exceeds the maximum of {max}", max = Priority::MAX)]
    PriorityOverflow(i64),
}

/// Convert a signed priority into a [`Priority`], rejecting out-of-range values.
#[inline]
pub fn checked_priority(raw: i64) -> Result<Priority, IntervalError> {
    if raw < 0 {
        return Err(IntervalError::NegativePriority(raw));
    }
    Priority::try_from(raw).map_err(|_| IntervalError::PriorityOverflow(raw))
}

/// Integer domain an interval can live on.
pub trait Coordinate: Copy + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

macro_rules! impl_coordinate {
    ($($t:ty),* $(,)?) => {
        $(impl Coordinate for $t {})*
    };
}

impl_coordinate!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// A prioritized interval.
/// Uses half-open coordinates: `start` is included, `end` is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval<T = i64> {
    pub start: T,
    pub end: T,
    pub priority: Priority,
}

impl<T: Coordinate> Interval<T> {
    /// Create a new interval. Coordinates are stored as given.
    #[inline]
    pub fn new(start: T, end: T, priority: Priority) -> Self {
        Self {
            start,
            end,
            priority,
        }
    }

    /// Create an interval from a signed priority, rejecting negative values.
    pub fn try_new(start: T, end: T, priority: i64) -> Result<Self, IntervalError> {
        Ok(Self::new(start, end, checked_priority(priority)?))
    }

    /// Returns true if `start > end`.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Returns a copy with `start <= end`, swapping the bounds if needed.
    #[inline]
    pub fn normalized(self) -> Self {
        if self.is_inverted() {
            Self {
                start: self.end,
                end: self.start,
                priority: self.priority,
            }
        } else {
            self
        }
    }

    /// Returns true if the interval covers no point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if the point lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, point: T) -> bool {
        self.start <= point && point < self.end
    }

    /// Check if this interval shares at least one point with another.
    #[inline]
    pub fn overlaps(&self, other: &Interval<T>) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this interval ends exactly where the other begins.
    #[inline]
    pub fn touches(&self, other: &Interval<T>) -> bool {
        self.end == other.start
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} -> {} prio {}}}", self.start, self.end, self.priority)
    }
}

impl<T: Coordinate> From<(T, T, Priority)> for Interval<T> {
    fn from((start, end, priority): (T, T, Priority)) -> Self {
        Self::new(start, end, priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_normalize() {
        let inverted = Interval::new(10i64, 5, 0);
        assert!(inverted.is_inverted());

        let fixed = inverted.normalized();
        assert_eq!(fixed, Interval::new(5, 10, 0));
        assert!(!fixed.is_inverted());

        // Already ordered intervals are untouched
        assert_eq!(fixed.normalized(), fixed);
    }

    #[test]
    fn test_interval_contains() {
        let a = Interval::new(100i32, 200, 1);

        assert!(a.contains(100));
        assert!(a.contains(199));
        assert!(!a.contains(200)); // End is exclusive
        assert!(!a.contains(99));
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(100u64, 200, 0);
        let b = Interval::new(150, 250, 0);
        let c = Interval::new(200, 300, 0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // Adjacent, not overlapping
        assert!(a.touches(&c));
    }

    #[test]
    fn test_degenerate_interval_is_empty() {
        let a = Interval::new(7i16, 7, 3);
        assert!(a.is_empty());
        assert!(!a.contains(7));
        assert!(!a.overlaps(&a));
    }

    #[test]
    fn test_display() {
        let a = Interval::new(-5i64, 23, 2);
        assert_eq!(a.to_string(), "{-5 -> 23 prio 2}");
    }

    #[test]
    fn test_checked_priority() {
        assert_eq!(checked_priority(0), Ok(0));
        assert_eq!(checked_priority(42), Ok(42));
        assert_eq!(
            checked_priority(-1),
            Err(IntervalError::NegativePriority(-1))
        );
        assert_eq!(
            checked_priority(i64::from(u32::MAX) + 1),
            Err(IntervalError::PriorityOverflow(i64::from(u32::MAX) + 1))
        );
    }

    #[test]
    fn test_try_new_rejects_negative_priority() {
        assert!(Interval::try_new(0i64, 10, -3).is_err());
        assert_eq!(Interval::try_new(0i64, 10, 3), Ok(Interval::new(0, 10, 3)));
    }

    #[test]
    fn test_interval_ordering() {
        let mut intervals = [
            Interval::new(20i64, 25, 0),
            Interval::new(5, 10, 2),
            Interval::new(5, 8, 1),
        ];
        intervals.sort();

        assert_eq!(intervals[0], Interval::new(5, 8, 1));
        assert_eq!(intervals[1], Interval::new(5, 10, 2));
        assert_eq!(intervals[2], Interval::new(20, 25, 0));
    }
}
