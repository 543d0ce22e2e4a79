//! Error types for the replica store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in local persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure writing the on-disk document.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The on-disk document had an unexpected shape.
    #[error("malformed store data: {message}")]
    Malformed {
        /// Description of the problem.
        message: String,
    },
}

impl StoreError {
    /// Creates a malformed-data error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::malformed("not an array");
        assert_eq!(err.to_string(), "malformed store data: not an array");
    }
}
