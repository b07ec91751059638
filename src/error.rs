//! Error types for gridlink operations.

use thiserror::Error;

/// Main error type for gridlink operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Operation invoked on a torn-down context, or an argument from a
    /// foreign execution context. Always raised before any engine call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Caller-supplied shape violates a documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The execution engine rejected a creation request. Not retried.
    #[error("driver error: {0}")]
    Driver(String),

    /// An assumed-infallible step failed. Indicates a hosting-environment
    /// defect, not a recoverable condition.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for gridlink operations.
pub type Result<T> = std::result::Result<T, Error>;
