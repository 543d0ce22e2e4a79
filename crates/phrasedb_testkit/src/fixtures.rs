//! Fixtures for seeding replica stores.

use phrasedb_store::{
    FileStore, ManualClock, MemoryStore, PhraseRecord, ReplicaStore, StoreResult, SyncState, UserId,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Builds a [`MemoryStore`] with scripted records and timestamps.
///
/// The builder drives the store through its public contract: dirty records
/// go through `save` under a manual clock, clean records through
/// `apply_merged_batch`, so fixtures exercise the same paths production
/// code does.
pub struct StoreBuilder {
    user_id: UserId,
    clock: Arc<ManualClock>,
    store: Arc<MemoryStore>,
}

impl StoreBuilder {
    /// Creates a builder for the given user.
    ///
    /// # Panics
    ///
    /// Panics on an empty user id; fixtures are test-only code.
    #[must_use]
    pub fn new(user_id: &str) -> Self {
        let clock = Arc::new(ManualClock::new(0));
        Self {
            user_id: UserId::new(user_id).expect("fixture user id"),
            store: Arc::new(MemoryStore::with_clock(clock.clone())),
            clock,
        }
    }

    /// Adds a dirty record written locally at `updated_at`.
    #[must_use]
    pub fn dirty(self, text: &str, frequency: u64, updated_at: i64) -> Self {
        self.clock.set(updated_at);
        self.store
            .save(&self.user_id, text, frequency)
            .expect("memory store save");
        self
    }

    /// Adds a clean record acknowledged by the authority at `updated_at`.
    #[must_use]
    pub fn clean(self, text: &str, frequency: u64, updated_at: i64) -> Self {
        self.store
            .apply_merged_batch(&[PhraseRecord::new(
                self.user_id.clone(),
                text,
                frequency,
                updated_at,
                SyncState::Clean,
            )])
            .expect("memory store batch");
        self
    }

    /// Returns the fixture's user id.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the manual clock driving the store's stamps.
    #[must_use]
    pub fn clock(&self) -> Arc<ManualClock> {
        Arc::clone(&self.clock)
    }

    /// Returns the seeded store.
    #[must_use]
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }
}

/// Runs `f` over a [`FileStore`] in a temporary directory.
///
/// The directory lives until `f` returns, so the store can be reopened
/// inside the closure via the returned path.
///
/// # Errors
///
/// Propagates store errors from opening or from `f`.
pub fn with_temp_file_store<F, R>(f: F) -> StoreResult<R>
where
    F: FnOnce(&TempDir, FileStore) -> StoreResult<R>,
{
    let dir = TempDir::new()?;
    let store = FileStore::open(dir.path().join("phrases.json"))?;
    f(&dir, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_seeds_dirty_and_clean() {
        let fixture = StoreBuilder::new("alice")
            .dirty("typed offline", 2, 100)
            .clean("acknowledged", 5, 90);

        let store = fixture.store();
        let all = store.find_all(fixture.user_id()).unwrap();
        assert_eq!(all.len(), 2);

        let dirty = store.find_unsynced(fixture.user_id()).unwrap();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].text, "typed offline");
        assert_eq!(dirty[0].updated_at, 100);
    }

    #[test]
    fn temp_file_store_round_trips() {
        with_temp_file_store(|dir, store| {
            let alice = UserId::new("alice").unwrap();
            store.save(&alice, "persisted", 1)?;

            let reopened = FileStore::open(dir.path().join("phrases.json"))?;
            assert_eq!(reopened.find_all(&alice)?.len(), 1);
            Ok(())
        })
        .unwrap();
    }
}
