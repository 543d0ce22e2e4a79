//! Error types for the sync protocol.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur encoding or decoding sync payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The payload was not valid JSON of the expected shape.
    #[error("malformed sync payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
