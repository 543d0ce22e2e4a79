//! Error types for the sync server.

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors the sync authority can report.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// More changes were pushed than the server accepts in one batch.
    #[error("push batch too large: {got} > {limit}")]
    BatchTooLarge {
        /// Changes in the rejected push.
        got: usize,
        /// Configured batch limit.
        limit: usize,
    },
}
