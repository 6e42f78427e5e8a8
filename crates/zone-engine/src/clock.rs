//! Time sources and the process-wide simulated clock.
//!
//! Time access goes through the [`TimeSource`] trait so tests can inject a
//! fixed instant instead of mutating global state. The default
//! [`SystemTimeSource`] reads the host clock, but consults the process-wide
//! simulated override first; setting it moves "now" for every facade
//! instance on the system source at once, which is how device firmware is
//! exercised against DST boundaries without waiting for them.
//!
//! The override lives in an `RwLock` only because Rust statics require
//! synchronized interior mutability; the crate's contract remains a
//! single-threaded host (see the crate docs).

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Local, Utc};
use tracing::trace;

static SIMULATED_NOW: RwLock<Option<DateTime<Utc>>> = RwLock::new(None);

/// A provider of "now" and the host's current UTC offset.
pub trait TimeSource {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The host's current UTC offset in minutes, used when no zone hint was
    /// given and as the last-resort offset for unresolvable hints.
    fn local_offset_minutes(&self) -> i32;
}

/// The real host clock, subject to the simulated override.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        simulated_now().unwrap_or_else(Utc::now)
    }

    fn local_offset_minutes(&self) -> i32 {
        Local::now().offset().local_minus_utc() / 60
    }
}

/// A frozen instant and offset, for tests and replay.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    now: DateTime<Utc>,
    offset_minutes: i32,
}

impl FixedTimeSource {
    pub fn new(now: DateTime<Utc>, offset_minutes: i32) -> Self {
        Self { now, offset_minutes }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

/// Override "now" for every instance using the system source.
pub fn set_simulated_now(instant: DateTime<Utc>) {
    trace!("simulated clock set to {}", instant);
    *SIMULATED_NOW
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(instant);
}

/// Drop the override and return to the real host clock.
pub fn clear_simulated_now() {
    trace!("simulated clock cleared");
    *SIMULATED_NOW
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

fn simulated_now() -> Option<DateTime<Utc>> {
    *SIMULATED_NOW.read().unwrap_or_else(PoisonError::into_inner)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // The simulated override itself is exercised in the facade tests, which
    // own the only mutations of the global so parallel test threads cannot
    // race on it.

    #[test]
    fn test_fixed_source_returns_given_values() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let source = FixedTimeSource::new(instant, -300);
        assert_eq!(source.now(), instant);
        assert_eq!(source.local_offset_minutes(), -300);
    }

    #[test]
    fn test_system_source_offset_in_representable_range() {
        // The real "now" is asserted in the facade's simulated-clock test;
        // here only the host offset, which the override never touches.
        let source = SystemTimeSource;
        assert!((-720..=840).contains(&source.local_offset_minutes()));
    }
}
