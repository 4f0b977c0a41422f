//! Panic isolation for task bodies.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

/// What to do when a task body panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStrategy {
    /// Abort the whole process.
    Abort,
    /// Catch the panic, report it, and keep the worker alive.
    Continue,
}

impl Default for PanicStrategy {
    fn default() -> Self {
        PanicStrategy::Continue
    }
}

/// Runs task bodies under `catch_unwind` and counts panics.
#[derive(Debug)]
pub struct PanicHandler {
    strategy: PanicStrategy,
    panic_count: AtomicUsize,
}

impl PanicHandler {
    /// Create a handler with the given strategy.
    pub fn new(strategy: PanicStrategy) -> Self {
        Self {
            strategy,
            panic_count: AtomicUsize::new(0),
        }
    }

    /// Run `f`, converting a panic into an [`TaskPanic`] according to the
    /// strategy. With [`PanicStrategy::Abort`] this call does not return
    /// after a panic.
    pub fn execute<F, R>(&self, f: F) -> Result<R, TaskPanic>
    where
        F: FnOnce() -> R,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(result) => Ok(result),
            Err(payload) => {
                self.panic_count.fetch_add(1, Ordering::Relaxed);

                let panic = TaskPanic::from_payload(payload);

                if self.strategy == PanicStrategy::Abort {
                    eprintln!("taskwell: task panicked (abort strategy): {}", panic.message);
                    std::process::abort();
                }

                Err(panic)
            }
        }
    }

    /// Number of panics caught so far.
    pub fn panic_count(&self) -> usize {
        self.panic_count.load(Ordering::Relaxed)
    }

    /// The configured strategy.
    pub fn strategy(&self) -> PanicStrategy {
        self.strategy
    }
}

impl Default for PanicHandler {
    fn default() -> Self {
        Self::new(PanicStrategy::default())
    }
}

/// Description of a caught task panic.
#[derive(Debug, Clone)]
pub struct TaskPanic {
    /// Best-effort rendering of the panic payload.
    pub message: String,
}

impl TaskPanic {
    fn from_payload(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };

        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_caught() {
        let handler = PanicHandler::new(PanicStrategy::Continue);

        let result = handler.execute(|| {
            panic!("test panic");
        });

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().message, "test panic");
        assert_eq!(handler.panic_count(), 1);
    }

    #[test]
    fn test_success_passes_through() {
        let handler = PanicHandler::new(PanicStrategy::Continue);

        let result = handler.execute(|| 42);

        assert_eq!(result.unwrap(), 42);
        assert_eq!(handler.panic_count(), 0);
    }

    #[test]
    fn test_panic_counter() {
        let handler = PanicHandler::new(PanicStrategy::Continue);

        for _ in 0..5 {
            let _ = handler.execute(|| {
                panic!("test");
            });
        }

        assert_eq!(handler.panic_count(), 5);
    }
}
