//! Metrics collection for pool monitoring.

use hdrhistogram::Histogram;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Pool metrics collector.
#[derive(Debug)]
pub struct Metrics {
    // Task counters
    tasks_submitted: AtomicU64,
    tasks_executed: AtomicU64,
    tasks_rejected: AtomicU64,
    tasks_discarded: AtomicU64,
    tasks_panicked: AtomicU64,

    // Execution latency histogram (RwLock for interior mutability)
    latency_histogram: RwLock<Histogram<u64>>,

    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        // 3 significant figures, max value of 1 hour in nanoseconds
        let histogram = Histogram::new_with_max(3_600_000_000_000, 3)
            .expect("Failed to create histogram");

        Self {
            tasks_submitted: AtomicU64::new(0),
            tasks_executed: AtomicU64::new(0),
            tasks_rejected: AtomicU64::new(0),
            tasks_discarded: AtomicU64::new(0),
            tasks_panicked: AtomicU64::new(0),
            latency_histogram: RwLock::new(histogram),
            start_time: Instant::now(),
        }
    }

    /// Record an accepted submission.
    pub fn record_task_submitted(&self) {
        self.tasks_submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed task execution with its duration.
    pub fn record_task_execution(&self, duration_ns: u64) {
        self.tasks_executed.fetch_add(1, Ordering::Relaxed);

        if let Some(mut hist) = self.latency_histogram.try_write() {
            let _ = hist.record(duration_ns);
        }
    }

    /// Record a submission rejected because the pool was shutting down.
    pub fn record_task_rejected(&self) {
        self.tasks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record tasks discarded unexecuted during teardown.
    pub fn record_tasks_discarded(&self, count: u64) {
        self.tasks_discarded.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a task panic.
    pub fn record_task_panic(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let histogram = self.latency_histogram.read();

        MetricsSnapshot {
            uptime: self.start_time.elapsed(),
            tasks_submitted: self.tasks_submitted.load(Ordering::Relaxed),
            tasks_executed: self.tasks_executed.load(Ordering::Relaxed),
            tasks_rejected: self.tasks_rejected.load(Ordering::Relaxed),
            tasks_discarded: self.tasks_discarded.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            avg_latency_ns: if histogram.len() > 0 {
                histogram.mean() as u64
            } else {
                0
            },
            p50_latency_ns: histogram.value_at_quantile(0.50),
            p95_latency_ns: histogram.value_at_quantile(0.95),
            p99_latency_ns: histogram.value_at_quantile(0.99),
            max_latency_ns: histogram.max(),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.tasks_submitted.store(0, Ordering::Relaxed);
        self.tasks_executed.store(0, Ordering::Relaxed);
        self.tasks_rejected.store(0, Ordering::Relaxed);
        self.tasks_discarded.store(0, Ordering::Relaxed);
        self.tasks_panicked.store(0, Ordering::Relaxed);

        if let Some(mut hist) = self.latency_histogram.try_write() {
            hist.reset();
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Time since the collector was created.
    pub uptime: std::time::Duration,
    /// Submissions accepted into the queue.
    pub tasks_submitted: u64,
    /// Task bodies run to completion.
    pub tasks_executed: u64,
    /// Submissions rejected during shutdown.
    pub tasks_rejected: u64,
    /// Tasks discarded unexecuted during teardown.
    pub tasks_discarded: u64,
    /// Task bodies that panicked.
    pub tasks_panicked: u64,
    /// Mean execution latency in nanoseconds.
    pub avg_latency_ns: u64,
    /// Median execution latency in nanoseconds.
    pub p50_latency_ns: u64,
    /// 95th percentile execution latency in nanoseconds.
    pub p95_latency_ns: u64,
    /// 99th percentile execution latency in nanoseconds.
    pub p99_latency_ns: u64,
    /// Maximum observed execution latency in nanoseconds.
    pub max_latency_ns: u64,
}

impl MetricsSnapshot {
    /// Calculate executed tasks per second over the collector's lifetime.
    pub fn tasks_per_second(&self) -> f64 {
        let seconds = self.uptime.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.tasks_executed as f64 / seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_basic() {
        let metrics = Metrics::new();

        metrics.record_task_submitted();
        metrics.record_task_submitted();
        metrics.record_task_execution(1000);
        metrics.record_task_execution(2000);
        metrics.record_task_panic();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.tasks_submitted, 2);
        assert_eq!(snapshot.tasks_executed, 2);
        assert_eq!(snapshot.tasks_panicked, 1);
        assert!(snapshot.avg_latency_ns > 0);
    }

    #[test]
    fn test_metrics_discarded() {
        let metrics = Metrics::new();

        metrics.record_tasks_discarded(3);
        assert_eq!(metrics.snapshot().tasks_discarded, 3);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = Metrics::new();

        metrics.record_task_execution(1000);
        assert_eq!(metrics.snapshot().tasks_executed, 1);

        metrics.reset();
        assert_eq!(metrics.snapshot().tasks_executed, 0);
    }
}
