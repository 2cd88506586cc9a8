//! # Store Errors
//!
//! Error types for the document store.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection could not be established at startup
    #[error("connection failed: {0}")]
    Connect(String),

    /// An operation against the engine failed
    #[error("operation failed: {0}")]
    Operation(String),

    /// Collection lock was poisoned
    #[error("lock poisoned: {0}")]
    Lock(String),

    /// Identifier is not a well-formed 24-character hex string
    #[error("malformed identifier: {0}")]
    MalformedId(String),
}
