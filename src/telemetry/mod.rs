//! Telemetry and observability subsystem.
//!
//! Provides the diagnostic event sink consumed by the pool and, behind the
//! `telemetry` feature, a metrics collector with execution-latency
//! percentiles.

pub mod sink;

pub use sink::{EventLevel, EventSink, NullSink, StderrSink};

#[cfg(feature = "telemetry")]
pub mod metrics;

#[cfg(feature = "telemetry")]
pub use metrics::{Metrics, MetricsSnapshot};

// Stub implementations when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub mod metrics {
    //! No-op metrics stubs compiled when the `telemetry` feature is off.

    /// No-op metrics collector.
    #[derive(Debug, Default)]
    pub struct Metrics;

    impl Metrics {
        /// Create a no-op collector.
        pub fn new() -> Self {
            Self
        }
        /// Ignored.
        pub fn record_task_submitted(&self) {}
        /// Ignored.
        pub fn record_task_execution(&self, _: u64) {}
        /// Ignored.
        pub fn record_task_rejected(&self) {}
        /// Ignored.
        pub fn record_tasks_discarded(&self, _: u64) {}
        /// Ignored.
        pub fn record_task_panic(&self) {}
        /// Returns an all-zero snapshot.
        pub fn snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot::default()
        }
        /// Ignored.
        pub fn reset(&self) {}
    }

    /// All-zero snapshot used when metrics are disabled.
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
        /// Always 0.0 when metrics are disabled.
        pub fn tasks_per_second(&self) -> f64 {
            0.0
        }
    }
}

#[cfg(not(feature = "telemetry"))]
pub use metrics::{Metrics, MetricsSnapshot};
