//! Worker thread loop.

use super::pool::Shared;
use super::task::{Task, TaskName};
use crate::telemetry::EventLevel;
use std::sync::Arc;
use std::time::Instant;

const COMPONENT: &str = "worker";

pub(crate) type WorkerId = usize;

/// One long-lived worker running a fetch-execute-report loop against the
/// shared queue. Identified by its index into the running-name slots.
pub(crate) struct Worker {
    pub(crate) id: WorkerId,
    pub(crate) shared: Arc<Shared>,
}

impl Worker {
    pub(crate) fn new(id: WorkerId, shared: Arc<Shared>) -> Self {
        Self { id, shared }
    }

    // main loop
    pub(crate) fn run(&self) {
        self.shared.emit(
            EventLevel::Debug,
            COMPONENT,
            &format!("worker #{} started", self.id),
        );

        loop {
            let mut state = self.shared.state.lock();

            while state.queue.is_empty() && !state.shutdown {
                self.shared.work_available.wait(&mut state);
            }

            // Leave only once the queue has fully drained; tasks queued
            // before shutdown still execute.
            if state.shutdown && state.queue.is_empty() {
                break;
            }

            let task = match state.queue.pop() {
                Some(task) => task,
                None => continue,
            };
            state.running[self.id] = task.name.clone();
            drop(state);

            // Task bodies run without the lock; they may block or
            // re-enter the pool.
            self.execute(task);

            self.shared.state.lock().running[self.id] = TaskName::idle();
        }

        self.shared.emit(
            EventLevel::Debug,
            COMPONENT,
            &format!("worker #{} exiting", self.id),
        );
    }

    fn execute(&self, task: Task) {
        let name = task.name.clone();
        self.shared.emit(
            EventLevel::Debug,
            COMPONENT,
            &format!("worker #{} running task '{}'", self.id, name),
        );

        let start = Instant::now();
        let result = self.shared.panic_handler.execute(|| task.run());
        let duration_ns = start.elapsed().as_nanos() as u64;

        match result {
            Ok(()) => {
                self.shared.metrics.record_task_execution(duration_ns);
                self.shared.emit(
                    EventLevel::Debug,
                    COMPONENT,
                    &format!("worker #{} finished task '{}'", self.id, name),
                );
            }
            Err(panic) => {
                self.shared.metrics.record_task_panic();
                self.shared.emit(
                    EventLevel::Error,
                    COMPONENT,
                    &format!(
                        "worker #{} caught panic in task '{}': {}",
                        self.id, name, panic.message
                    ),
                );
            }
        }
    }
}
