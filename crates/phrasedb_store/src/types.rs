//! Core record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when constructing a [`UserId`] from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user id must not be empty")]
pub struct EmptyUserId;

/// Identifier of the user owning a set of phrase records.
///
/// Construction fails on an empty id, so every record in the system is
/// attributable to a concrete user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyUserId> {
        let id = id.into();
        if id.is_empty() {
            return Err(EmptyUserId);
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a record's current state has been acknowledged by the remote
/// authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    /// Local change not yet accepted by the remote store.
    Dirty,
    /// In sync with the remote store.
    Clean,
}

impl SyncState {
    /// Returns true for [`SyncState::Dirty`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        matches!(self, SyncState::Dirty)
    }
}

/// Composite key identifying a phrase record: `(user_id, text)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhraseKey {
    /// Owning user.
    pub user_id: UserId,
    /// The phrase text.
    pub text: String,
}

impl PhraseKey {
    /// Creates a key.
    pub fn new(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: text.into(),
        }
    }
}

/// A single learned phrase for one user.
///
/// Exactly one record exists per `(user_id, text)` pair. The frequency only
/// grows through local use, but a winning remote value during merge
/// overwrites it (never sums). `updated_at` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseRecord {
    /// Owning user.
    pub user_id: UserId,
    /// The phrase text; non-empty, unique per user.
    pub text: String,
    /// Confirmed-use count.
    pub frequency: u64,
    /// Last modification time, epoch milliseconds.
    pub updated_at: i64,
    /// Remote acknowledgement state.
    pub sync_state: SyncState,
}

impl PhraseRecord {
    /// Creates a record.
    pub fn new(
        user_id: UserId,
        text: impl Into<String>,
        frequency: u64,
        updated_at: i64,
        sync_state: SyncState,
    ) -> Self {
        Self {
            user_id,
            text: text.into(),
            frequency,
            updated_at,
            sync_state,
        }
    }

    /// Returns the record's composite key.
    #[must_use]
    pub fn key(&self) -> PhraseKey {
        PhraseKey::new(self.user_id.clone(), self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert_eq!(UserId::new(""), Err(EmptyUserId));
        assert!(UserId::new("alice").is_ok());
    }

    #[test]
    fn user_id_display_and_as_str() {
        let id = UserId::new("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn sync_state_dirty_check() {
        assert!(SyncState::Dirty.is_dirty());
        assert!(!SyncState::Clean.is_dirty());
    }

    #[test]
    fn record_key_round_trip() {
        let user = UserId::new("u1").unwrap();
        let record = PhraseRecord::new(user.clone(), "hi", 3, 100, SyncState::Dirty);
        assert_eq!(record.key(), PhraseKey::new(user, "hi"));
    }

    #[test]
    fn record_serializes_camel_case() {
        let user = UserId::new("u1").unwrap();
        let record = PhraseRecord::new(user, "hi", 3, 100, SyncState::Clean);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"syncState\":\"clean\""));

        let parsed: PhraseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
