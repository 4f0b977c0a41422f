//! Write-only diagnostic event sink.
//!
//! The pool reports queue and worker state transitions through a single
//! `emit(level, component, message)` call. The sink is injected via
//! [`Config`](crate::Config) by the owning application; the pool never
//! initializes any process-wide logging state itself, and correctness never
//! depends on a sink being present.

use std::fmt;

/// Severity of an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    /// Finest-grained tracing.
    Trace,
    /// Queue and worker state transitions.
    Debug,
    /// Pool lifecycle milestones.
    Info,
    /// Degraded but recoverable situations.
    Warn,
    /// Failures worth operator attention.
    Error,
}

impl EventLevel {
    /// Fixed-width label used by text sinks.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Trace => "TRACE",
            EventLevel::Debug => "DEBUG",
            EventLevel::Info => "INFO",
            EventLevel::Warn => "WARN",
            EventLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for diagnostic events emitted by the pool.
///
/// Implementations must be cheap and non-blocking where possible; `emit` is
/// called from worker threads and producers alike.
pub trait EventSink: Send + Sync {
    /// Record one diagnostic event.
    fn emit(&self, level: EventLevel, component: &str, message: &str);
}

/// Sink that drops every event. Used when no sink is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _level: EventLevel, _component: &str, _message: &str) {}
}

/// Sink that writes one line per event to standard error.
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    min_level: EventLevel,
}

impl StderrSink {
    /// Create a sink that forwards events at `min_level` and above.
    pub fn new(min_level: EventLevel) -> Self {
        Self { min_level }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new(EventLevel::Info)
    }
}

impl EventSink for StderrSink {
    fn emit(&self, level: EventLevel, component: &str, message: &str) {
        if level >= self.min_level {
            eprintln!("[{:5}] {}: {}", level.as_str(), component, message);
        }
    }
}
