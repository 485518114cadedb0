//! Nanosecond timestamps for buffered entries
//!
//! Loki orders lines inside a stream by timestamp, so two lines logged in
//! the same millisecond must still get distinct, increasing values. The
//! default source multiplies wall-clock milliseconds by one million and adds
//! the per-logger call counter.

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Time source called with the number of previous calls on this logger
pub type TimeSource = Arc<dyn Fn(u64) -> u64 + Send + Sync>;

/// Default time source: `wall_clock_millis * 1_000_000 + call_count`
pub fn wall_clock_nanos(call_count: u64) -> u64 {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    millis * 1_000_000 + call_count
}

/// Per-logger clock that feeds the call counter into its time source
pub struct Clock {
    source: TimeSource,
    calls: AtomicU64,
}

impl Clock {
    pub fn new(source: TimeSource) -> Self {
        Self {
            source,
            calls: AtomicU64::new(0),
        }
    }

    /// Next timestamp; the counter starts at 0 and increments on every call
    pub fn now_nanos(&self) -> u64 {
        let call_count = self.calls.fetch_add(1, Ordering::Relaxed);
        (self.source)(call_count)
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Arc::new(wall_clock_nanos))
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let clock = Clock::new(Arc::new(|count| count));
        assert_eq!(clock.now_nanos(), 0);
        assert_eq!(clock.now_nanos(), 1);
        assert_eq!(clock.now_nanos(), 2);
        assert_eq!(clock.call_count(), 3);
    }

    #[test]
    fn test_frozen_wall_clock_still_increases() {
        const FROZEN_MILLIS: u64 = 1_736_332_245_123;
        let clock = Clock::new(Arc::new(|count| FROZEN_MILLIS * 1_000_000 + count));

        let first = clock.now_nanos();
        let second = clock.now_nanos();
        assert!(second > first);
        assert_eq!(first, FROZEN_MILLIS * 1_000_000);
    }

    #[test]
    fn test_default_clock_is_nanosecond_scale() {
        let clock = Clock::default();
        let now = clock.now_nanos();
        // 2020-01-01T00:00:00Z in nanoseconds
        assert!(now > 1_577_836_800_000_000_000);
        assert!(clock.now_nanos() > now);
    }
}
