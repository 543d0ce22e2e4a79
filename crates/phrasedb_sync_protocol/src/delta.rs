//! The phrase delta wire triple.

use phrasedb_store::{PhraseRecord, SyncState, UserId};
use serde::{Deserialize, Serialize};

type DeltaTuple = (String, u64, i64);

/// One server- or client-reported phrase change.
///
/// Serializes as the compact array `[text, frequency, updatedAt]` used by
/// both the push/pull exchange and the full download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeltaTuple", into = "DeltaTuple")]
pub struct PhraseDelta {
    /// The phrase text.
    pub text: String,
    /// Confirmed-use count at the reporting side.
    pub frequency: u64,
    /// Last modification time at the reporting side, epoch milliseconds.
    pub updated_at: i64,
}

impl PhraseDelta {
    /// Creates a delta.
    pub fn new(text: impl Into<String>, frequency: u64, updated_at: i64) -> Self {
        Self {
            text: text.into(),
            frequency,
            updated_at,
        }
    }

    /// Builds the delta describing a local record.
    #[must_use]
    pub fn from_record(record: &PhraseRecord) -> Self {
        Self {
            text: record.text.clone(),
            frequency: record.frequency,
            updated_at: record.updated_at,
        }
    }

    /// Converts the delta into a store record for the given user.
    #[must_use]
    pub fn into_record(self, user_id: UserId, sync_state: SyncState) -> PhraseRecord {
        PhraseRecord {
            user_id,
            text: self.text,
            frequency: self.frequency,
            updated_at: self.updated_at,
            sync_state,
        }
    }
}

impl From<DeltaTuple> for PhraseDelta {
    fn from((text, frequency, updated_at): DeltaTuple) -> Self {
        Self {
            text,
            frequency,
            updated_at,
        }
    }
}

impl From<PhraseDelta> for DeltaTuple {
    fn from(delta: PhraseDelta) -> Self {
        (delta.text, delta.frequency, delta.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_triple() {
        let delta = PhraseDelta::new("hi", 5, 100);
        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"["hi",5,100]"#);
    }

    #[test]
    fn deserializes_from_triple() {
        let delta: PhraseDelta = serde_json::from_str(r#"["bye",2,90]"#).unwrap();
        assert_eq!(delta, PhraseDelta::new("bye", 2, 90));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(serde_json::from_str::<PhraseDelta>(r#"["hi",5]"#).is_err());
        assert!(serde_json::from_str::<PhraseDelta>(r#""hi""#).is_err());
    }

    #[test]
    fn delta_list_round_trips() {
        let deltas = vec![PhraseDelta::new("hi", 5, 100), PhraseDelta::new("bye", 2, 90)];
        let json = serde_json::to_string(&deltas).unwrap();
        assert_eq!(json, r#"[["hi",5,100],["bye",2,90]]"#);

        let parsed: Vec<PhraseDelta> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, deltas);
    }

    #[test]
    fn record_conversions() {
        let user = UserId::new("alice").unwrap();
        let record = PhraseRecord::new(user.clone(), "hi", 5, 100, SyncState::Dirty);

        let delta = PhraseDelta::from_record(&record);
        assert_eq!(delta, PhraseDelta::new("hi", 5, 100));

        let back = delta.into_record(user, SyncState::Clean);
        assert_eq!(back.text, "hi");
        assert_eq!(back.frequency, 5);
        assert_eq!(back.updated_at, 100);
        assert_eq!(back.sync_state, SyncState::Clean);
    }
}
