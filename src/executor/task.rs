//! Task representation and bounded task names.

use std::fmt;

/// Maximum stored length of a task name in bytes, including the byte the C
/// heritage reserved for a terminator. Stored names carry at most
/// `MAX_TASK_NAME_LEN - 1` bytes of visible text.
pub const MAX_TASK_NAME_LEN: usize = 64;

/// Label substituted for an empty task name.
pub const DEFAULT_TASK_NAME: &str = "unnamed_task";

/// Sentinel reported for a worker with no task in flight.
pub const IDLE_TASK_NAME: &str = "[idle]";

/// Bounded human-readable task label.
///
/// Names longer than the bound are truncated on a UTF-8 character boundary;
/// an empty name becomes [`DEFAULT_TASK_NAME`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TaskName(String);

impl TaskName {
    pub(crate) fn new(raw: &str) -> Self {
        if raw.is_empty() {
            return TaskName(DEFAULT_TASK_NAME.to_string());
        }
        let mut end = raw.len().min(MAX_TASK_NAME_LEN - 1);
        while !raw.is_char_boundary(end) {
            end -= 1;
        }
        TaskName(raw[..end].to_string())
    }

    pub(crate) fn idle() -> Self {
        TaskName(IDLE_TASK_NAME.to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of work: a named closure owning its captures.
pub(crate) struct Task {
    pub(crate) name: TaskName,
    func: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    pub(crate) fn new<F>(name: &str, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Task {
            name: TaskName::new(name),
            func: Box::new(f),
        }
    }

    /// Execute the task body, consuming the task.
    pub(crate) fn run(self) {
        (self.func)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_passthrough() {
        let name = TaskName::new("compress-chunk-7");
        assert_eq!(name.as_str(), "compress-chunk-7");
    }

    #[test]
    fn test_empty_name_gets_default() {
        assert_eq!(TaskName::new("").as_str(), DEFAULT_TASK_NAME);
    }

    #[test]
    fn test_name_truncated_at_bound() {
        let long = "x".repeat(200);
        let name = TaskName::new(&long);
        assert_eq!(name.as_str().len(), MAX_TASK_NAME_LEN - 1);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 'é' is 2 bytes; 32 of them straddle the 63-byte bound
        let long = "é".repeat(32);
        let name = TaskName::new(&long);
        assert_eq!(name.as_str(), "é".repeat(31));
    }

    #[test]
    fn test_idle_sentinel() {
        assert_eq!(TaskName::idle().as_str(), IDLE_TASK_NAME);
    }

    #[test]
    fn test_task_runs_closure() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let task = Task::new("probe", move || flag.store(true, Ordering::Relaxed));

        assert_eq!(task.name.as_str(), "probe");
        task.run();
        assert!(ran.load(Ordering::Relaxed));
    }
}
