//! Logger metrics for observability
//!
//! Counters are shared between a logger and every logger derived from it.
//! Filtered calls never touch them.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use stackdriver_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records lost to a serialization or sink write failure
    dropped_count: AtomicU64,

    /// Records written to the sink
    total_logged: AtomicU64,

    /// ERROR and CRITICAL records written to the sink
    error_reports: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
            error_reports: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn error_reports(&self) -> u64 {
        self.error_reports.load(Ordering::Relaxed)
    }

    /// Record a dropped record, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) {
        self.total_logged.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_error_report(&self) {
        self.error_reports.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of attempted records that were dropped
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = dropped + self.total_logged() as f64;
        if total == 0.0 {
            0.0
        } else {
            dropped / total * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
