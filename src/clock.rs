//! Injectable time source.
//!
//! Every time-sensitive operation in the engine takes its "now" from a
//! [`Clock`] rather than calling `Utc::now()` directly, so tests can pin
//! the current instant deterministically.

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock, backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant.
///
/// # Example
///
/// ```
/// use attendance_engine::clock::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2024, 3, 1, 9, 10, 0).unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_reports_pinned_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
