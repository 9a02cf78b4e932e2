//! Time sources for diagnostics
//!
//! Physics never reads the wall clock directly. Anything that wants a
//! timestamp takes a [`Clock`], so simulations can be replayed with a
//! [`ManualClock`] and produce identical trails.

use std::cell::Cell;
use std::time::Instant;

/// A point in time, in seconds since the owning clock's origin
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    /// The clock origin
    pub const ZERO: Self = Self(0.0);

    /// Create a timestamp from seconds
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Seconds since the clock origin
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later)
    pub fn secs_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

/// Source of timestamps
pub trait Clock {
    /// Current time
    fn now(&self) -> Timestamp;
}

/// Monotonic clock measuring from its own creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_secs_f64())
    }
}

/// Clock that only moves when told to
///
/// Used by tests and by the sandbox, which advances it by the fixed step.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: Cell<f64>,
}

impl ManualClock {
    /// Create a clock starting at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Cell::new(start.0),
        }
    }

    /// Move the clock forward by `secs`
    pub fn advance(&self, secs: f64) {
        self.current.set(self.current.get() + secs);
    }

    /// Jump to an absolute time
    pub fn set(&self, time: Timestamp) {
        self.current.set(time.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.current.get())
    }
}
