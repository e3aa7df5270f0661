//! Dispatch counters
//!
//! Write failures are swallowed by the dispatcher so that logging never takes
//! the host process down; these counters are the only trace they leave
//! besides a line on stderr.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a [`Logger`](crate::Logger)
///
/// # Example
///
/// ```
/// use zapper::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.failed_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Sink writes that succeeded
    written: AtomicU64,

    /// Sink writes that returned an error or panicked
    failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the failure count before this one
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of sink writes that failed
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed_count();
        let total = failed + self.written_count();
        if total == 0 {
            0.0
        } else {
            (failed as f64 / total as f64) * 100.0
        }
    }
}
