//! Logger metrics for observability
//!
//! Counters for what happened to each logging call: filtered out, written to
//! the host channel, written to the console fallback, or lost to a failing
//! sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use host_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_suppressed();
/// metrics.record_fallback();
///
/// assert_eq!(metrics.suppressed_count(), 1);
/// assert_eq!(metrics.emitted_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Calls dropped by the level threshold
    suppressed: AtomicU64,

    /// Lines written to the host output channel
    native: AtomicU64,

    /// Lines written to the console fallback
    fallback: AtomicU64,

    /// Lines a sink failed to write
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            suppressed: AtomicU64::new(0),
            native: AtomicU64::new(0),
            fallback: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn native_count(&self) -> u64 {
        self.native.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fallback_count(&self) -> u64 {
        self.fallback.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    /// Lines that reached either sink
    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.native_count() + self.fallback_count()
    }

    #[inline]
    pub fn record_suppressed(&self) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_native(&self) {
        self.native.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_fallback(&self) {
        self.fallback.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the failure count before this one
    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.suppressed.store(0, Ordering::Relaxed);
        self.native.store(0, Ordering::Relaxed);
        self.fallback.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = LoggerMetrics::new();
        metrics.record_native();
        metrics.record_native();
        metrics.record_fallback();
        metrics.record_suppressed();
        assert_eq!(metrics.record_sink_failure(), 0);
        assert_eq!(metrics.record_sink_failure(), 1);

        assert_eq!(metrics.native_count(), 2);
        assert_eq!(metrics.fallback_count(), 1);
        assert_eq!(metrics.emitted_count(), 3);
        assert_eq!(metrics.suppressed_count(), 1);
        assert_eq!(metrics.sink_failures(), 2);
    }

    #[test]
    fn test_reset() {
        let metrics = LoggerMetrics::default();
        metrics.record_fallback();
        metrics.record_suppressed();
        metrics.reset();
        assert_eq!(metrics.emitted_count(), 0);
        assert_eq!(metrics.suppressed_count(), 0);
    }
}
