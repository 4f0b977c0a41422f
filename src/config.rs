//! Pool configuration.

use crate::error::{Error, Result};
use crate::executor::PanicStrategy;
use crate::telemetry::{EventSink, NullSink};
use std::fmt;
use std::sync::Arc;

/// Configuration for a [`ThreadPool`](crate::ThreadPool).
#[derive(Clone)]
pub struct Config {
    /// Worker count; `None` means one worker per logical CPU.
    pub num_threads: Option<usize>,
    /// Prefix for worker thread names, suffixed with the worker index.
    pub thread_name_prefix: String,
    /// Stack size per worker thread.
    pub stack_size: Option<usize>,
    /// Pin each worker to the CPU core matching its index (Linux only).
    pub pin_workers: bool,
    /// What to do when a task body panics.
    pub panic_strategy: PanicStrategy,
    /// Diagnostic sink; `None` discards all events.
    pub event_sink: Option<Arc<dyn EventSink>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "taskwell-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
            pin_workers: false,
            panic_strategy: PanicStrategy::default(),
            event_sink: None,
        }
    }
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Check the configuration for invalid values.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_threads {
            if n == 0 {
                return Err(Error::config("num_threads must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("num_threads too large (max 1024)"));
            }
        }

        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }

        Ok(())
    }

    /// The effective worker count.
    pub fn worker_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }

    /// The effective sink: the configured one, or a [`NullSink`].
    pub fn event_sink(&self) -> Arc<dyn EventSink> {
        self.event_sink
            .clone()
            .unwrap_or_else(|| Arc::new(NullSink))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("num_threads", &self.num_threads)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field("stack_size", &self.stack_size)
            .field("pin_workers", &self.pin_workers)
            .field("panic_strategy", &self.panic_strategy)
            .field("event_sink", &self.event_sink.is_some())
            .finish()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the worker count.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = Some(n);
        self
    }

    /// Set the worker thread name prefix.
    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Set the per-worker stack size.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    /// Pin workers to cores (Linux only).
    pub fn pin_workers(mut self, pin: bool) -> Self {
        self.config.pin_workers = pin;
        self
    }

    /// Set the panic strategy.
    pub fn panic_strategy(mut self, strategy: PanicStrategy) -> Self {
        self.config.panic_strategy = strategy;
        self
    }

    /// Install a diagnostic sink.
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.config.event_sink = Some(sink);
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = Config::builder().num_threads(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_pool_rejected() {
        let result = Config::builder().num_threads(4096).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_roundtrip() {
        let config = Config::builder()
            .num_threads(4)
            .thread_name_prefix("io-pool")
            .stack_size(512 * 1024)
            .build()
            .unwrap();

        assert_eq!(config.worker_threads(), 4);
        assert_eq!(config.thread_name_prefix, "io-pool");
        assert_eq!(config.stack_size, Some(512 * 1024));
    }

    #[test]
    fn test_worker_threads_defaults_to_cpus() {
        let config = Config::default();
        assert_eq!(config.worker_threads(), num_cpus::get());
    }
}
