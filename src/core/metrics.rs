//! Logger metrics for observability
//!
//! Provides counters for monitoring the buffering and delivery pipeline:
//! captured lines, shipped batches and failed deliveries.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use loki_batch_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_batch(1);
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.entries_flushed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Number of entries captured by leveled calls
    total_logged: AtomicU64,

    /// Number of batches handed to the transport
    batches_flushed: AtomicU64,

    /// Number of entries contained in those batches
    entries_flushed: AtomicU64,

    /// Number of batches whose delivery failed
    delivery_failures: AtomicU64,

    /// Number of flushes that found nothing to send
    empty_flushes: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            batches_flushed: AtomicU64::new(0),
            entries_flushed: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
            empty_flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_flushed(&self) -> u64 {
        self.batches_flushed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_flushed(&self) -> u64 {
        self.entries_flushed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivery_failures(&self) -> u64 {
        self.delivery_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn empty_flushes(&self) -> u64 {
        self.empty_flushes.load(Ordering::Relaxed)
    }

    /// Record a captured entry, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a batch of `entries` lines handed to the transport
    #[inline]
    pub fn record_batch(&self, entries: usize) -> u64 {
        self.entries_flushed
            .fetch_add(entries as u64, Ordering::Relaxed);
        self.batches_flushed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery_failure(&self) -> u64 {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_empty_flush(&self) -> u64 {
        self.empty_flushes.fetch_add(1, Ordering::Relaxed)
    }

    /// Get delivery failure rate as a percentage of flushed batches (0.0 - 100.0)
    ///
    /// Returns 0.0 if no batch has been flushed.
    pub fn failure_rate(&self) -> f64 {
        let batches = self.batches_flushed() as f64;
        if batches == 0.0 {
            0.0
        } else {
            (self.delivery_failures() as f64 / batches) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.batches_flushed.store(0, Ordering::Relaxed);
        self.entries_flushed.store(0, Ordering::Relaxed);
        self.delivery_failures.store(0, Ordering::Relaxed);
        self.empty_flushes.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            batches_flushed: AtomicU64::new(self.batches_flushed()),
            entries_flushed: AtomicU64::new(self.entries_flushed()),
            delivery_failures: AtomicU64::new(self.delivery_failures()),
            empty_flushes: AtomicU64::new(self.empty_flushes()),
        }
    }
}
