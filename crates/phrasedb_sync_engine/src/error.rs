//! Error types for the sync engine.

use phrasedb_store::{EmptyUserId, StoreError};
use phrasedb_sync_protocol::ProtocolError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network failure reaching the remote authority.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// Local persistence failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Corrupt or unexpected payload shape.
    #[error(transparent)]
    Malformed(#[from] ProtocolError),

    /// A session was constructed without a user id.
    #[error(transparent)]
    EmptyUserId(#[from] EmptyUserId),
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns true if local state remains fully usable after this error.
    ///
    /// A warm-start round swallows these and keeps serving suggestions from
    /// the local replica (offline degradation). Store failures are never
    /// recoverable this way: without working local persistence there is no
    /// degraded mode to fall back to.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SyncError::Transport { .. } | SyncError::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_recoverable() {
        assert!(SyncError::transport("connection refused").is_recoverable());
    }

    #[test]
    fn malformed_payloads_are_recoverable() {
        let err: SyncError = serde_json::from_str::<Vec<phrasedb_sync_protocol::PhraseDelta>>("{")
            .map_err(ProtocolError::from)
            .unwrap_err()
            .into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn store_errors_are_not_recoverable() {
        let err = SyncError::Store(StoreError::malformed("bad document"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn error_display() {
        let err = SyncError::transport("timed out");
        assert_eq!(err.to_string(), "transport error: timed out");
    }
}
