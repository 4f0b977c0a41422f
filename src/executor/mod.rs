//! Task execution infrastructure.
//!
//! This module provides the worker pool core: the shared FIFO task queue,
//! the worker loop, panic isolation, and the public [`ThreadPool`] handle.

pub mod panic_handler;
pub mod pool;
pub(crate) mod queue;
pub(crate) mod task;
pub(crate) mod worker;

pub use panic_handler::{PanicHandler, PanicStrategy, TaskPanic};
pub use pool::ThreadPool;
pub use task::{DEFAULT_TASK_NAME, IDLE_TASK_NAME, MAX_TASK_NAME_LEN};
