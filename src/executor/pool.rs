//! Pool lifecycle, submission, and introspection.

use super::panic_handler::PanicHandler;
use super::queue::TaskQueue;
use super::task::{Task, TaskName};
use super::worker::{Worker, WorkerId};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::telemetry::{EventLevel, EventSink, Metrics, MetricsSnapshot};
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const COMPONENT: &str = "pool";

/// Everything guarded by the single pool lock.
pub(crate) struct PoolState {
    pub(crate) queue: TaskQueue,
    pub(crate) shutdown: bool,
    pub(crate) running: Vec<TaskName>,
}

/// State shared between the pool handle and its workers.
pub(crate) struct Shared {
    pub(crate) state: Mutex<PoolState>,
    pub(crate) work_available: Condvar,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) metrics: Arc<Metrics>,
    pub(crate) panic_handler: PanicHandler,
}

impl Shared {
    pub(crate) fn emit(&self, level: EventLevel, component: &str, message: &str) {
        self.sink.emit(level, component, message);
    }
}

struct WorkerHandle {
    id: WorkerId,
    thread: Option<JoinHandle<()>>,
}

#[cfg(target_os = "linux")]
fn pin_thread_to_core(core_id: usize) -> bool {
    unsafe {
        let mut cpuset: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_SET(core_id, &mut cpuset);
        libc::sched_setaffinity(
            0, // current thread
            std::mem::size_of::<libc::cpu_set_t>(),
            &cpuset,
        ) == 0
    }
}

/// Fixed-size worker pool with a shared FIFO queue.
///
/// Producers submit named closures from any number of threads; a fixed set
/// of workers executes them in submission order. [`running_task_names`]
/// reports what each worker is doing at a point in time.
///
/// Dropping the pool shuts it down: remaining queued tasks are drained and
/// in-flight task bodies run to completion before the handle is released.
///
/// [`running_task_names`]: ThreadPool::running_task_names
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<WorkerHandle>,
    num_threads: usize,
}

impl ThreadPool {
    /// Create a pool as described by `config`.
    ///
    /// Spawns exactly `config.worker_threads()` workers. If any spawn
    /// fails, workers already started are shut down and joined before the
    /// error is returned; no partially constructed pool escapes.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let num_threads = config.worker_threads();

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue: TaskQueue::new(),
                shutdown: false,
                running: vec![TaskName::idle(); num_threads],
            }),
            work_available: Condvar::new(),
            sink: config.event_sink(),
            metrics: Arc::new(Metrics::new()),
            panic_handler: PanicHandler::new(config.panic_strategy),
        });

        let mut workers = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let worker = Worker::new(id, shared.clone());
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            #[cfg(target_os = "linux")]
            let pin_workers = config.pin_workers;

            let spawned = builder.spawn(move || {
                #[cfg(target_os = "linux")]
                if pin_workers && !pin_thread_to_core(worker.id) {
                    worker.shared.emit(
                        EventLevel::Warn,
                        COMPONENT,
                        &format!("failed to pin worker #{} to core {}", worker.id, worker.id),
                    );
                }

                worker.run();
            });

            match spawned {
                Ok(thread) => workers.push(WorkerHandle {
                    id,
                    thread: Some(thread),
                }),
                Err(err) => {
                    shared.emit(
                        EventLevel::Error,
                        COMPONENT,
                        &format!("failed to spawn worker #{}: {}", id, err),
                    );
                    Self::unwind_partial(&shared, &mut workers);
                    return Err(Error::Spawn(err));
                }
            }
        }

        shared.emit(
            EventLevel::Info,
            COMPONENT,
            &format!("pool started with {} worker(s)", num_threads),
        );

        Ok(Self {
            shared,
            workers,
            num_threads,
        })
    }

    /// Create a pool with `num_threads` workers and default configuration.
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        let config = Config::builder().num_threads(num_threads).build()?;
        Self::new(&config)
    }

    /// Stop and join workers that were started before a spawn failure.
    fn unwind_partial(shared: &Arc<Shared>, workers: &mut Vec<WorkerHandle>) {
        shared.state.lock().shutdown = true;
        shared.work_available.notify_all();
        for handle in workers.iter_mut() {
            if let Some(thread) = handle.thread.take() {
                let _ = thread.join();
            }
        }
    }

    /// Submit a named task for execution.
    ///
    /// The name is truncated to one byte less than
    /// [`MAX_TASK_NAME_LEN`](crate::MAX_TASK_NAME_LEN); an empty name becomes
    /// [`DEFAULT_TASK_NAME`](crate::DEFAULT_TASK_NAME). Returns
    /// [`Error::ShuttingDown`] once shutdown has begun, in which case `f` is
    /// dropped without running and its captures are released.
    pub fn submit<F>(&self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let task = Task::new(name, f);
        let task_name = task.name.clone();

        let queue_len = {
            let mut state = self.shared.state.lock();
            if state.shutdown {
                drop(state);
                self.shared.metrics.record_task_rejected();
                self.shared.emit(
                    EventLevel::Warn,
                    COMPONENT,
                    &format!("rejected task '{}': pool is shutting down", task_name),
                );
                return Err(Error::ShuttingDown);
            }
            state.queue.push(task);
            self.shared.work_available.notify_one();
            state.queue.len()
        };

        self.shared.metrics.record_task_submitted();
        self.shared.emit(
            EventLevel::Debug,
            COMPONENT,
            &format!("task '{}' enqueued (queue depth {})", task_name, queue_len),
        );
        Ok(())
    }

    /// Submit an unnamed task; it is reported under
    /// [`DEFAULT_TASK_NAME`](crate::DEFAULT_TASK_NAME).
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit("", f)
    }

    /// Snapshot of what each worker is doing right now.
    ///
    /// Returns one entry per worker: the name of the task it is executing,
    /// or [`IDLE_TASK_NAME`](crate::IDLE_TASK_NAME). The snapshot is copied
    /// under the pool lock and may be stale the instant it returns; it is a
    /// diagnostic, not a synchronization primitive.
    pub fn running_task_names(&self) -> Vec<String> {
        let state = self.shared.state.lock();
        state
            .running
            .iter()
            .map(|name| name.as_str().to_owned())
            .collect()
    }

    /// Number of tasks currently waiting in the queue.
    pub fn queued_tasks(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// The fixed number of workers in this pool.
    pub fn thread_count(&self) -> usize {
        self.num_threads
    }

    /// Snapshot of the pool's metrics counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Shut the pool down and join every worker.
    ///
    /// Idempotent: the second and later calls return immediately. Workers
    /// finish the tasks already in the queue, then exit; this call blocks
    /// until every in-flight task body returns, with no timeout. A worker
    /// that fails to join is reported to the sink and teardown continues.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.state.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
        }

        self.shared.emit(
            EventLevel::Info,
            COMPONENT,
            "shutdown requested; waking all workers",
        );
        self.shared.work_available.notify_all();

        for handle in &mut self.workers {
            if let Some(thread) = handle.thread.take() {
                if thread.join().is_err() {
                    self.shared.emit(
                        EventLevel::Error,
                        COMPONENT,
                        &format!("worker #{} terminated abnormally", handle.id),
                    );
                }
            }
        }

        // Workers drain the queue before exiting, so this only sees tasks
        // left behind by an abnormal worker exit.
        let discarded = self.shared.state.lock().queue.drain_discard();
        if discarded > 0 {
            self.shared.metrics.record_tasks_discarded(discarded as u64);
            self.shared.emit(
                EventLevel::Warn,
                COMPONENT,
                &format!("{} queued task(s) discarded during teardown", discarded),
            );
        }

        self.shared.emit(EventLevel::Info, COMPONENT, "shutdown complete");
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPool")
            .field("threads", &self.num_threads)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::task::IDLE_TASK_NAME;

    #[test]
    fn test_all_idle_after_create() {
        let pool = ThreadPool::with_threads(3).unwrap();
        let names = pool.running_task_names();

        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|name| name == IDLE_TASK_NAME));
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(ThreadPool::with_threads(0).is_err());
    }

    #[test]
    fn test_thread_count() {
        let pool = ThreadPool::with_threads(2).unwrap();
        assert_eq!(pool.thread_count(), 2);
        assert_eq!(pool.queued_tasks(), 0);
    }
}
