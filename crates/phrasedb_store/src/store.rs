//! Replica store trait definition.

use crate::error::StoreResult;
use crate::types::{PhraseKey, PhraseRecord, UserId};

/// Durable per-user storage of phrase records.
///
/// This is the contract the sync engine consumes. Implementations persist
/// one record per `(user_id, text)` pair and track which records the remote
/// authority has acknowledged.
///
/// # Invariants
///
/// - `save` upserts by `(user_id, text)`, always forces
///   [`SyncState::Dirty`](crate::SyncState::Dirty) and stamps `updated_at`
///   from the store's clock
/// - `apply_merged_batch` and `mark_synced` are atomic: either every record
///   in the batch is visible or none is, so a concurrent suggestion query
///   never observes a half-applied merge
/// - `mark_synced` flips sync state only, leaving `frequency` and
///   `updated_at` untouched
/// - Implementations must be `Send + Sync`
///
/// # Implementors
///
/// - [`MemoryStore`](crate::MemoryStore) - for tests and ephemeral sessions
/// - [`FileStore`](crate::FileStore) - JSON-document persistence
pub trait ReplicaStore: Send + Sync {
    /// Returns every record for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn find_all(&self, user_id: &UserId) -> StoreResult<Vec<PhraseRecord>>;

    /// Returns every record for `user_id` not yet acknowledged by the
    /// remote authority.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn find_unsynced(&self, user_id: &UserId) -> StoreResult<Vec<PhraseRecord>>;

    /// Looks up the record for an exact phrase text, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn find_by_text(&self, user_id: &UserId, text: &str) -> StoreResult<Option<PhraseRecord>>;

    /// Upserts a locally-written record.
    ///
    /// The stored record takes `frequency` as given, is stamped with the
    /// store clock's current time, and is marked dirty. Returns the record
    /// as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn save(&self, user_id: &UserId, text: &str, frequency: u64) -> StoreResult<PhraseRecord>;

    /// Atomically upserts a batch of merged records, each marked clean.
    ///
    /// Used for remote values that won a merge (or a cold-start full
    /// download): they came from the authority, so they are definitionally
    /// in sync. Timestamps are taken from the records, not the clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be persisted; in that case no
    /// record of the batch is visible.
    fn apply_merged_batch(&self, records: &[PhraseRecord]) -> StoreResult<()>;

    /// Atomically marks the given records clean.
    ///
    /// `frequency` and `updated_at` are left untouched. Keys with no
    /// matching record are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the update cannot be persisted.
    fn mark_synced(&self, keys: &[PhraseKey]) -> StoreResult<()>;

    /// Deletes every record for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion cannot be persisted.
    fn clear(&self, user_id: &UserId) -> StoreResult<()>;
}
