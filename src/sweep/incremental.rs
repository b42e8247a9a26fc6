//! Incremental sweep.
//!
//! The open interval's priority is always the current winner, so a `Start`
//! only matters when it beats it and an `End` only matters when it removes
//! the winner's last holder. In that case the next winner is searched
//! forward from the old one; nothing smaller can still be open.

use super::counter::PriorityCounter;
use super::event::{Event, EventKind};
use super::sequence::SequenceBuilder;
use super::{Sweep, SweepStats};
use crate::interval::Coordinate;

/// Sweep ordered events, tracking the winner across events.
pub fn sweep<T, C>(events: &[Event<T>], mut counter: C) -> Sweep<T>
where
    T: Coordinate,
    C: PriorityCounter,
{
    let mut out = SequenceBuilder::with_capacity(events.len() / 2);
    let mut stats = SweepStats::default();

    for e in events {
        match e.kind {
            EventKind::Start => {
                counter.increment(e.priority);
                match out.current() {
                    // Absorbed underneath the open interval
                    Some(current) if current <= e.priority => {}
                    Some(_) => {
                        out.close_at(e.time);
                        stats.switches += 1;
                        out.open_at(e.time, e.priority);
                    }
                    None => out.open_at(e.time, e.priority),
                }
            }
            EventKind::End => {
                counter.decrement(e.priority);
                match out.current() {
                    Some(current) if current == e.priority && counter.count(current) == 0 => {
                        out.close_at(e.time);
                        stats.switches += 1;
                        if let Some(next) = counter.next_active_after(current) {
                            out.open_at(e.time, next);
                        }
                    }
                    _ => {}
                }
            }
        }
        stats.observe(counter.depth());
    }

    stats.events = events.len();
    let intervals = out.finish();
    stats.emitted = intervals.len();
    Sweep { intervals, stats }
}
