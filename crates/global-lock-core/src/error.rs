//! Error types for global lock operations.

use thiserror::Error;

/// Errors that can occur during lock operations.
///
/// Contention is not an error: a denied acquisition is reported through
/// the boolean (or `Option`) result of the acquisition call.
#[derive(Error, Debug)]
pub enum LockError {
    /// Invalid lock name.
    #[error("invalid lock name: {0}")]
    InvalidName(String),

    /// Backend connection failed.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;
