//! Taskwell - a fixed-size worker pool with task introspection.
//!
//! A fixed set of worker threads executes named closures in strict FIFO
//! submission order off one shared queue, coordinated by a single
//! lock/condition-variable pair. The pool can report, at any moment, the
//! name of the task each worker is executing.
//!
//! # Quick Start
//!
//! ```
//! use taskwell::ThreadPool;
//!
//! let mut pool = ThreadPool::with_threads(4).unwrap();
//!
//! pool.submit("greet", || println!("hello from the pool")).unwrap();
//!
//! // One entry per worker: a task name, or "[idle]"
//! let names = pool.running_task_names();
//! assert_eq!(names.len(), 4);
//!
//! // Drains queued work, joins every worker
//! pool.shutdown();
//! ```
//!
//! # Features
//!
//! - **Ordered Dispatch**: strict FIFO execution relative to each producer
//! - **Introspection**: point-in-time snapshot of every worker's current task
//! - **Safe Teardown**: shutdown joins all workers before releasing state
//! - **Panic Isolation**: a panicking task never kills its worker
//! - **Diagnostics**: injectable event sink, no global logging state
//! - **Metrics**: counters and latency percentiles (optional feature)

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod telemetry;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use executor::{
    PanicHandler, PanicStrategy, TaskPanic, ThreadPool, DEFAULT_TASK_NAME, IDLE_TASK_NAME,
    MAX_TASK_NAME_LEN,
};
pub use telemetry::{EventLevel, EventSink, Metrics, MetricsSnapshot, NullSink, StderrSink};
