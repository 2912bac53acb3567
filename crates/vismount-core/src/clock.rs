#![forbid(unsafe_code)]

//! Time source for resize scheduling: real wall clock or a manually
//! advanced test clock.
//!
//! The debounce window is the only place the library reads time, so time
//! enters through a [`Clock`] handle instead of `Instant::now()` calls.
//! In production the handle is [`Clock::Real`]; tests use
//! [`Clock::manual`] and advance time explicitly, making the 50 ms quiet
//! period fully deterministic without sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use web_time::{Duration, Instant};

/// A manually-advanceable clock for deterministic tests.
///
/// All [`Clock`] handles sharing the same `ManualClock` see the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    epoch: Instant,
    offset_us: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a new manual clock starting at `Instant::now()`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            offset_us: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        let us = delta.as_micros().min(u64::MAX as u128) as u64;
        self.offset_us.fetch_add(us, Ordering::Release);
    }

    /// Current manual time.
    #[must_use]
    pub fn now(&self) -> Instant {
        let offset = Duration::from_micros(self.offset_us.load(Ordering::Acquire));
        self.epoch + offset
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Time source handle. Cheap to clone; clones observe the same time.
#[derive(Debug, Clone)]
pub enum Clock {
    /// Real wall-clock time.
    Real,
    /// Manually advanced clock for deterministic tests.
    Manual(ManualClock),
}

impl Clock {
    /// Create a manual clock pair: the handle plus its controller.
    #[must_use]
    pub fn manual() -> (Self, ManualClock) {
        let clock = ManualClock::new();
        (Self::Manual(clock.clone()), clock)
    }

    /// Current time according to this source.
    #[must_use]
    pub fn now(&self) -> Instant {
        match self {
            Self::Real => Instant::now(),
            Self::Manual(clock) => clock.now(),
        }
    }

    /// Whether this handle reads a manual clock.
    #[inline]
    #[must_use]
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::Real
    }
}
