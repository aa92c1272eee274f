//! Pipeline metrics for observability
//!
//! Counts what happened to each record that entered the write path. One
//! instance is shared by every logger derived from the same `Logger::new`
//! call, alongside the write lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the write path
///
/// # Example
///
/// ```
/// use context_logger::PipelineMetrics;
///
/// let metrics = PipelineMetrics::new();
///
/// metrics.record_written();
/// metrics.record_skipped();
///
/// assert_eq!(metrics.written_count(), 1);
/// assert_eq!(metrics.skipped_count(), 1);
/// ```
#[derive(Debug)]
pub struct PipelineMetrics {
    /// Records that reached the sink
    written: AtomicU64,

    /// Records suppressed by a hook
    skipped: AtomicU64,

    /// Records replaced by a diagnostic line after a hook or formatter failure
    failed: AtomicU64,

    /// Sink writes that returned an error
    sink_errors: AtomicU64,
}

impl PipelineMetrics {
    /// Create a set of counters at zero
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            sink_errors: AtomicU64::new(0),
        }
    }

    /// Get the number of records written to the sink
    #[inline]
    pub fn written_count(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Get the number of records suppressed by a hook
    #[inline]
    pub fn skipped_count(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Get the number of records replaced by a diagnostic line
    #[inline]
    pub fn failed_count(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Get the number of failed sink writes
    #[inline]
    pub fn sink_error_count(&self) -> u64 {
        self.sink_errors.load(Ordering::Relaxed)
    }

    /// Record a record written to the sink
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a skipped record
    #[inline]
    pub fn record_skipped(&self) -> u64 {
        self.skipped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a hook or formatter failure
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed sink write
    #[inline]
    pub fn record_sink_error(&self) -> u64 {
        self.sink_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Get failure rate as a percentage (0.0 - 100.0)
    ///
    /// Skipped records are intentional and are not counted. Returns 0.0 if no
    /// records have been processed.
    pub fn failure_rate(&self) -> f64 {
        let failed = (self.failed_count() + self.sink_error_count()) as f64;
        let total = self.written_count() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.sink_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PipelineMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written_count()),
            skipped: AtomicU64::new(self.skipped_count()),
            failed: AtomicU64::new(self.failed_count()),
            sink_errors: AtomicU64::new(self.sink_error_count()),
        }
    }
}
