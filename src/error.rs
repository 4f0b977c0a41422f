//! Error types for pool construction and task submission.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by pool operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration, e.g. a zero thread count.
    #[error("config error: {0}")]
    Config(String),

    /// The pool has begun shutting down and no longer accepts tasks.
    #[error("pool is shutting down")]
    ShuttingDown,

    /// A worker thread could not be spawned during pool construction.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::Config`] from any message.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}
