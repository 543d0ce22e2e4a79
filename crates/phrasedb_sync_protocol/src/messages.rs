//! Request envelopes for the sync exchange.

use crate::delta::PhraseDelta;
use phrasedb_store::UserId;
use serde::{Deserialize, Serialize};

/// The push/pull exchange request.
///
/// Uploads local changes and asks for everything the server has seen after
/// `last_synced_at`. The response is a bare JSON array of
/// [`PhraseDelta`] triples, so it needs no envelope type of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// The user whose records are being exchanged.
    pub user_id: UserId,
    /// Local changes not yet acknowledged by the server.
    pub changes: Vec<PhraseDelta>,
    /// The client's watermark: max `updated_at` over its local records.
    pub last_synced_at: i64,
}

impl SyncRequest {
    /// Creates a request.
    pub fn new(user_id: UserId, changes: Vec<PhraseDelta>, last_synced_at: i64) -> Self {
        Self {
            user_id,
            changes,
            last_synced_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let request = SyncRequest::new(
            UserId::new("alice").unwrap(),
            vec![PhraseDelta::new("hi", 5, 100)],
            90,
        );

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"userId":"alice","changes":[["hi",5,100]],"lastSyncedAt":90}"#
        );
    }

    #[test]
    fn request_round_trips() {
        let json = r#"{"userId":"bob","changes":[],"lastSyncedAt":0}"#;
        let request: SyncRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id.as_str(), "bob");
        assert!(request.changes.is_empty());
        assert_eq!(request.last_synced_at, 0);
    }
}
