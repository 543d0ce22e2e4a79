//! In-memory replica store.

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::store::ReplicaStore;
use crate::types::{PhraseKey, PhraseRecord, SyncState, UserId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The per-phrase payload held under a `(user, text)` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredRecord {
    pub(crate) frequency: u64,
    pub(crate) updated_at: i64,
    pub(crate) sync_state: SyncState,
}

/// All records of one user, keyed by phrase text.
pub(crate) type UserTable = BTreeMap<String, StoredRecord>;

/// All records of all users.
pub(crate) type RecordMap = HashMap<UserId, UserTable>;

pub(crate) fn to_record(user_id: &UserId, text: &str, stored: &StoredRecord) -> PhraseRecord {
    PhraseRecord {
        user_id: user_id.clone(),
        text: text.to_owned(),
        frequency: stored.frequency,
        updated_at: stored.updated_at,
        sync_state: stored.sync_state,
    }
}

/// An in-memory replica store.
///
/// Suitable for unit tests and ephemeral sessions that do not need
/// persistence. All batch operations run under a single write lock, so they
/// are atomic with respect to concurrent readers.
///
/// # Example
///
/// ```rust
/// use phrasedb_store::{MemoryStore, ReplicaStore, SyncState, UserId};
///
/// let store = MemoryStore::new();
/// let user = UserId::new("alice").unwrap();
/// let record = store.save(&user, "hello", 1).unwrap();
/// assert_eq!(record.sync_state, SyncState::Dirty);
/// ```
pub struct MemoryStore {
    records: RwLock<RecordMap>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Creates an empty store stamping records with wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(RecordMap::new()),
            clock,
        }
    }

    /// Returns the total number of records across all users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().values().map(BTreeMap::len).sum()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplicaStore for MemoryStore {
    fn find_all(&self, user_id: &UserId) -> StoreResult<Vec<PhraseRecord>> {
        let records = self.records.read();
        Ok(records
            .get(user_id)
            .map(|table| {
                table
                    .iter()
                    .map(|(text, stored)| to_record(user_id, text, stored))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_unsynced(&self, user_id: &UserId) -> StoreResult<Vec<PhraseRecord>> {
        let records = self.records.read();
        Ok(records
            .get(user_id)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, stored)| stored.sync_state.is_dirty())
                    .map(|(text, stored)| to_record(user_id, text, stored))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_by_text(&self, user_id: &UserId, text: &str) -> StoreResult<Option<PhraseRecord>> {
        let records = self.records.read();
        Ok(records
            .get(user_id)
            .and_then(|table| table.get(text))
            .map(|stored| to_record(user_id, text, stored)))
    }

    fn save(&self, user_id: &UserId, text: &str, frequency: u64) -> StoreResult<PhraseRecord> {
        let stored = StoredRecord {
            frequency,
            updated_at: self.clock.now_millis(),
            sync_state: SyncState::Dirty,
        };

        let mut records = self.records.write();
        records
            .entry(user_id.clone())
            .or_default()
            .insert(text.to_owned(), stored.clone());

        Ok(to_record(user_id, text, &stored))
    }

    fn apply_merged_batch(&self, batch: &[PhraseRecord]) -> StoreResult<()> {
        let mut records = self.records.write();
        for record in batch {
            records.entry(record.user_id.clone()).or_default().insert(
                record.text.clone(),
                StoredRecord {
                    frequency: record.frequency,
                    updated_at: record.updated_at,
                    sync_state: SyncState::Clean,
                },
            );
        }
        Ok(())
    }

    fn mark_synced(&self, keys: &[PhraseKey]) -> StoreResult<()> {
        let mut records = self.records.write();
        for key in keys {
            if let Some(stored) = records
                .get_mut(&key.user_id)
                .and_then(|table| table.get_mut(&key.text))
            {
                stored.sync_state = SyncState::Clean;
            }
        }
        Ok(())
    }

    fn clear(&self, user_id: &UserId) -> StoreResult<()> {
        self.records.write().remove(user_id);
        Ok(())
    }
}
