//! Error types for readinator

use thiserror::Error;

/// Fatal error that aborts a run before any check executes
#[derive(Error, Debug)]
pub enum ReadinatorError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error with context
    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },

    /// Tool configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two checks registered under the same id
    #[error("Duplicate check id: {0}")]
    DuplicateCheckId(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The run was interrupted by the operator before completing
    #[error("Interrupted by operator")]
    Interrupted,
}

impl From<serde_json::Error> for ReadinatorError {
    fn from(err: serde_json::Error) -> Self {
        ReadinatorError::Serialization(err.to_string())
    }
}

/// Result type alias for readinator operations
pub type Result<T> = std::result::Result<T, ReadinatorError>;

/// Failure raised while executing a single check.
///
/// Every variant is caught by the runner and downgraded to a Fail or Warn
/// outcome according to the check's severity; none propagate further.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Target unreachable
    #[error("connection failed: {0}")]
    Connection(String),

    /// Check exceeded its I/O bound
    #[error("timed out")]
    Timeout,

    /// A value was present but wrong
    #[error("{0}")]
    Assertion(String),

    /// A file, table, header, or record was absent
    #[error("{0}")]
    MissingResource(String),

    /// The verified application's settings failed to load or are malformed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
