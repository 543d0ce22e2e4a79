//! Per-user session facade.

use crate::engine::{EngineState, SyncEngine, SyncReport, SyncStats};
use crate::error::SyncResult;
use crate::periodic::PeriodicSync;
use crate::transport::SyncTransport;
use phrasedb_index::Suggestion;
use phrasedb_store::{ReplicaStore, UserId};
use phrasedb_sync_protocol::BackupEntry;
use std::sync::Arc;
use std::time::Duration;

/// One user's autocompletion session.
///
/// Ties a user id to its explicit collaborators (the replica store and the
/// sync transport) and owns the sync engine built over them. Construction
/// fails if the user id is empty, so a session always has a concrete owner.
///
/// The read path (`suggest`, `best_match`) is synchronous and in-memory;
/// the write path (`record_use`) updates the index immediately and
/// persists asynchronously with respect to the caller's needs (failures
/// are logged, not surfaced).
pub struct Session<T: SyncTransport, S: ReplicaStore> {
    engine: Arc<SyncEngine<T, S>>,
}

impl<T, S> Session<T, S>
where
    T: SyncTransport + 'static,
    S: ReplicaStore + 'static,
{
    /// Creates a session for `user_id` over the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if `user_id` is empty.
    pub fn new(user_id: &str, store: Arc<S>, transport: Arc<T>) -> SyncResult<Self> {
        let user_id = UserId::new(user_id)?;
        Ok(Self {
            engine: Arc::new(SyncEngine::new(user_id, store, transport)),
        })
    }

    /// Returns the session's user id.
    pub fn user_id(&self) -> &UserId {
        self.engine.user_id()
    }

    /// Returns the underlying sync engine.
    pub fn engine(&self) -> &SyncEngine<T, S> {
        &self.engine
    }

    /// Runs one sync round. See [`SyncEngine::initialize`].
    ///
    /// # Errors
    ///
    /// Propagates cold-start and store failures.
    pub fn initialize(&self) -> SyncResult<SyncReport> {
        self.engine.initialize()
    }

    /// Records one confirmed use of `phrase`. See [`SyncEngine::record_use`].
    ///
    /// # Errors
    ///
    /// Propagates replica read failures and forced cold-start failures.
    pub fn record_use(&self, phrase: &str) -> SyncResult<Option<u64>> {
        self.engine.record_use(phrase)
    }

    /// Returns ranked completions for `prefix`.
    #[must_use]
    pub fn suggest(&self, prefix: &str) -> Vec<Suggestion> {
        self.engine.index().read().suggest(prefix)
    }

    /// Returns the single best completion for `prefix`.
    #[must_use]
    pub fn best_match(&self, prefix: &str) -> Option<Suggestion> {
        self.engine.index().read().best_match(prefix)
    }

    /// Exports the whole index as a frequency-only backup snapshot.
    #[must_use]
    pub fn export(&self) -> Vec<BackupEntry> {
        self.engine
            .index()
            .read()
            .export_flat()
            .into_iter()
            .map(|s| BackupEntry::new(s.text, s.frequency))
            .collect()
    }

    /// Imports a backup snapshot, restoring each entry as a fresh local
    /// write so the next sync offers it to the authority.
    ///
    /// Returns the number of entries imported.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be persisted.
    pub fn import(&self, entries: &[BackupEntry]) -> SyncResult<usize> {
        let index = self.engine.index();
        for entry in entries {
            if entry.text.is_empty() {
                continue;
            }
            self.engine
                .store()
                .save(self.user_id(), &entry.text, entry.frequency)?;
            index.write().restore(&entry.text, entry.frequency);
        }
        Ok(entries.iter().filter(|e| !e.text.is_empty()).count())
    }

    /// Wipes every record for this user. See [`SyncEngine::wipe`].
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn wipe(&self) -> SyncResult<()> {
        self.engine.wipe()
    }

    /// Returns the engine's current state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Returns a snapshot of the sync counters.
    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.engine.stats()
    }

    /// Starts background sync rounds every `interval`.
    ///
    /// The first round runs immediately. Ticks that land while a round is
    /// still in flight are no-ops through the engine's reentrancy guard.
    #[must_use]
    pub fn start_periodic_sync(&self, interval: Duration) -> PeriodicSync {
        PeriodicSync::spawn(Arc::clone(&self.engine), interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use phrasedb_store::MemoryStore;
    use phrasedb_sync_protocol::PhraseDelta;

    fn new_session() -> Session<MockTransport, MemoryStore> {
        Session::new(
            "alice",
            Arc::new(MemoryStore::new()),
            Arc::new(MockTransport::new()),
        )
        .unwrap()
    }

    #[test]
    fn empty_user_id_fails_construction() {
        let result = Session::new(
            "",
            Arc::new(MemoryStore::new()),
            Arc::new(MockTransport::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn write_then_read() {
        let session = new_session();
        session.record_use("good morning").unwrap();
        session.record_use("good morning").unwrap();
        session.record_use("good night").unwrap();

        let results = session.suggest("good");
        assert_eq!(results[0].text, "good morning");
        assert_eq!(results[0].frequency, 2);
        assert_eq!(session.best_match("good").unwrap().text, "good morning");
    }

    #[test]
    fn export_and_import_round_trip() {
        let session = new_session();
        session.record_use("hello world").unwrap();
        session.record_use("hello world").unwrap();

        let snapshot = session.export();
        assert_eq!(snapshot, vec![BackupEntry::new("hello world", 2)]);

        let other = new_session();
        let imported = other.import(&snapshot).unwrap();
        assert_eq!(imported, 1);
        assert_eq!(other.suggest("hello")[0].frequency, 2);

        // Imported entries are fresh local writes, offered on the next sync.
        let dirty = other
            .engine()
            .store()
            .find_unsynced(other.user_id())
            .unwrap();
        assert_eq!(dirty.len(), 1);
    }

    #[test]
    fn cold_start_scenario_through_the_facade() {
        let transport = Arc::new(MockTransport::new());
        transport.set_full_download_response(vec![
            PhraseDelta::new("hi", 5, 100),
            PhraseDelta::new("bye", 2, 90),
        ]);
        let session = Session::new("alice", Arc::new(MemoryStore::new()), transport).unwrap();

        session.initialize().unwrap();

        let results = session.suggest("h");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "hi");
        assert_eq!(results[0].frequency, 5);
    }

    #[test]
    fn wipe_then_suggest_is_empty() {
        let session = new_session();
        session.record_use("anything").unwrap();
        session.wipe().unwrap();
        assert!(session.suggest("").is_empty());
    }
}
