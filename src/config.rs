//! Global configuration for prioseq runtime behavior.
//!
//! This module provides thread-safe global configuration that selects the
//! sweep strategy without threading it through every call site.

use crate::sweep::Strategy;
use std::sync::atomic::{AtomicU8, Ordering};

const SCAN: u8 = 0;
const INCREMENTAL: u8 = 1;

/// Global default sweep strategy.
///
/// Set once at startup (e.g. from `--strategy`) and read whenever a
/// `MergeCommand` is created without an explicit strategy.
static DEFAULT_STRATEGY: AtomicU8 = AtomicU8::new(INCREMENTAL);

/// Set the strategy used by newly created merge commands.
///
/// # Example
///
/// ```
/// use prioseq::config;
/// use prioseq::sweep::Strategy;
///
/// config::set_default_strategy(Strategy::Scan);
/// assert_eq!(config::default_strategy(), Strategy::Scan);
/// config::set_default_strategy(Strategy::Incremental);
/// ```
#[inline]
pub fn set_default_strategy(strategy: Strategy) {
    let raw = match strategy {
        Strategy::Scan => SCAN,
        Strategy::Incremental => INCREMENTAL,
    };
    DEFAULT_STRATEGY.store(raw, Ordering::Release);
}

/// Current default sweep strategy.
#[inline]
pub fn default_strategy() -> Strategy {
    match DEFAULT_STRATEGY.load(Ordering::Acquire) {
        SCAN => Strategy::Scan,
        _ => Strategy::Incremental,
    }
}
