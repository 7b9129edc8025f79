//! Feed errors

use thiserror::Error;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors raised by snapshot sources and the feed lifecycle
#[derive(Debug, Error)]
pub enum FeedError {
    /// Reading a snapshot file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetching a snapshot over HTTP failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// `start()` on a feed that is already running
    #[error("Feed already running")]
    AlreadyRunning,

    /// `stop()` on a feed that is not running
    #[error("Feed not running")]
    NotRunning,

    /// A thread panicked while holding the hub lock
    #[error("Hub lock poisoned")]
    LockPoisoned,

    /// `start()` called outside a tokio runtime
    #[error("No tokio runtime available")]
    NoRuntime,

    /// The feed task panicked or was cancelled
    #[error("Feed task failed: {0}")]
    Task(String),

    /// Invalid feed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Config(err.to_string())
    }
}
