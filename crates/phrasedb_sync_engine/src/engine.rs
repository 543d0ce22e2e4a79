//! Sync engine state machine.

use crate::error::{SyncError, SyncResult};
use crate::transport::SyncTransport;
use parking_lot::RwLock;
use phrasedb_index::{PrefixIndex, Suggestion};
use phrasedb_store::{PhraseKey, PhraseRecord, ReplicaStore, SyncState, UserId};
use phrasedb_sync_protocol::{resolve, PhraseDelta};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The current state of the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No sync round in progress.
    Idle,
    /// A sync round is running.
    Syncing,
}

/// How a completed round ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// No local records existed; the authoritative set was downloaded.
    Cold,
    /// Local records existed and the delta exchange succeeded.
    Warm,
    /// Local records existed but the exchange failed; local state served
    /// as-is.
    WarmOffline,
    /// Another round was already in progress; nothing was done.
    Skipped,
}

/// Result of one sync round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// How the round ran.
    pub mode: SyncMode,
    /// Dirty records offered to the authority.
    pub pushed: usize,
    /// Deltas received from the authority.
    pub pulled: usize,
    /// Received deltas that won the merge and were applied.
    pub merged: usize,
}

impl SyncReport {
    fn skipped() -> Self {
        Self {
            mode: SyncMode::Skipped,
            pushed: 0,
            pulled: 0,
            merged: 0,
        }
    }
}

/// Counters describing sync activity since the engine was created.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Completed rounds, including offline-degraded ones.
    pub rounds_completed: u64,
    /// Rounds that ran the cold-start full download.
    pub cold_starts: u64,
    /// Rounds that degraded to offline mode.
    pub offline_rounds: u64,
    /// Total dirty records offered to the authority.
    pub deltas_pushed: u64,
    /// Total deltas received from the authority.
    pub deltas_pulled: u64,
    /// Total received deltas that won the merge.
    pub records_merged: u64,
    /// Message of the last failed round, cleared on success.
    pub last_error: Option<String>,
}

/// Releases the reentrancy flag on every exit path, including unwinds.
struct RoundGuard<'a>(&'a AtomicBool);

impl Drop for RoundGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates initialization, delta exchange, conflict resolution, and
/// re-indexing for one user's replica.
///
/// The engine owns the decision of when a full download versus an
/// incremental exchange is required, and guarantees the index and the
/// replica store converge to the state the remote authority would compute
/// from the same inputs.
///
/// Reentrancy: a round is entered through an atomic check-and-set, so a
/// second [`SyncEngine::initialize`] call while one is running returns
/// immediately as a no-op. This is the only mutual exclusion the engine
/// needs: the index and store are otherwise mutated only by the sync and
/// write paths of a single logical session.
pub struct SyncEngine<T: SyncTransport, S: ReplicaStore> {
    user_id: UserId,
    transport: Arc<T>,
    store: Arc<S>,
    index: Arc<RwLock<PrefixIndex>>,
    syncing: AtomicBool,
    stats: RwLock<SyncStats>,
}

impl<T: SyncTransport, S: ReplicaStore> SyncEngine<T, S> {
    /// Creates an engine for `user_id` over the given collaborators.
    pub fn new(user_id: UserId, store: Arc<S>, transport: Arc<T>) -> Self {
        Self {
            user_id,
            transport,
            store,
            index: Arc::new(RwLock::new(PrefixIndex::new())),
            syncing: AtomicBool::new(false),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// Returns the user this engine syncs for.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the engine's current state.
    pub fn state(&self) -> EngineState {
        if self.syncing.load(Ordering::SeqCst) {
            EngineState::Syncing
        } else {
            EngineState::Idle
        }
    }

    /// Returns a snapshot of the sync counters.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Returns a handle to the ranked prefix index.
    ///
    /// The index is a derived view; the engine rebuilds it from the store
    /// at the end of every completed round.
    pub fn index(&self) -> Arc<RwLock<PrefixIndex>> {
        Arc::clone(&self.index)
    }

    /// Returns the underlying replica store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Runs one sync round: cold-start full download when no local records
    /// exist, otherwise a warm-start delta exchange with smart merge.
    ///
    /// Called again while a round is in progress, this is a no-op returning
    /// [`SyncMode::Skipped`].
    ///
    /// # Errors
    ///
    /// A cold-start failure is fatal to the round and surfaces here; there
    /// is nothing useful to serve yet. A warm-start exchange failure is
    /// recovered into offline mode and is *not* an error; only store
    /// failures propagate from a warm round.
    pub fn initialize(&self) -> SyncResult<SyncReport> {
        if self
            .syncing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(user = %self.user_id, "sync round already in progress");
            return Ok(SyncReport::skipped());
        }
        let _guard = RoundGuard(&self.syncing);

        let result = self.run_round();
        match &result {
            Ok(report) => {
                let mut stats = self.stats.write();
                stats.rounds_completed += 1;
                stats.deltas_pushed += report.pushed as u64;
                stats.deltas_pulled += report.pulled as u64;
                stats.records_merged += report.merged as u64;
                if report.mode == SyncMode::Cold {
                    stats.cold_starts += 1;
                }
                if report.mode == SyncMode::WarmOffline {
                    stats.offline_rounds += 1;
                } else {
                    stats.last_error = None;
                }
            }
            Err(err) => {
                self.stats.write().last_error = Some(err.to_string());
            }
        }
        result
    }

    /// Records one confirmed use of `phrase`, returning its new frequency.
    ///
    /// If the replica is still empty, a sync round runs first so the write
    /// lands on top of remote history instead of silently diverging from
    /// it. The index is updated synchronously (authoritative for immediate
    /// feedback); persistence is best-effort, so a store failure is logged
    /// and the index is allowed to run ahead of durable storage until the
    /// next successful round or restart rebuilds it.
    ///
    /// Empty input is a no-op returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the replica could not be read, or if the forced
    /// cold start fails.
    pub fn record_use(&self, phrase: &str) -> SyncResult<Option<u64>> {
        if phrase.is_empty() {
            return Ok(None);
        }

        if self.store.find_all(&self.user_id)?.is_empty() {
            self.initialize()?;
        }

        let frequency = match self.index.write().insert_or_increment(phrase) {
            Some(frequency) => frequency,
            None => return Ok(None),
        };

        if let Err(err) = self.store.save(&self.user_id, phrase, frequency) {
            warn!(
                user = %self.user_id,
                error = %err,
                "failed to persist phrase use; index is ahead of durable storage"
            );
        }
        Ok(Some(frequency))
    }

    /// Deletes every record for the user and empties the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion cannot be persisted.
    pub fn wipe(&self) -> SyncResult<()> {
        self.store.clear(&self.user_id)?;
        self.index.write().clear();
        info!(user = %self.user_id, "wiped local replica");
        Ok(())
    }

    fn run_round(&self) -> SyncResult<SyncReport> {
        let local = self.store.find_all(&self.user_id)?;
        if local.is_empty() {
            self.cold_start()
        } else {
            self.warm_start(&local)
        }
    }

    /// Clean slate: the authority's record set is downloaded wholesale,
    /// persisted clean (it came from the authority, so it is definitionally
    /// in sync), and indexed.
    fn cold_start(&self) -> SyncResult<SyncReport> {
        let downloaded = self.transport.full_download(&self.user_id)?;

        let records: Vec<PhraseRecord> = downloaded
            .into_iter()
            .map(|delta| delta.into_record(self.user_id.clone(), SyncState::Clean))
            .collect();
        self.store.apply_merged_batch(&records)?;

        let persisted = self.store.find_all(&self.user_id)?;
        self.rebuild_index(&persisted);

        info!(
            user = %self.user_id,
            records = records.len(),
            "cold start complete"
        );
        Ok(SyncReport {
            mode: SyncMode::Cold,
            pushed: 0,
            pulled: records.len(),
            merged: records.len(),
        })
    }

    /// Incremental exchange: offer dirty records with the local watermark,
    /// merge the authority's counter-delta, then mark the offered records
    /// acknowledged. An exchange failure leaves the replica untouched and
    /// the round completes in offline mode.
    fn warm_start(&self, local: &[PhraseRecord]) -> SyncResult<SyncReport> {
        // The watermark is derived from local state rather than issued by
        // the server; records are never deleted outside a full wipe, so the
        // local maximum tracks the newest change this replica has seen.
        let last_synced_at = local.iter().map(|r| r.updated_at).max().unwrap_or(0);

        let dirty = self.store.find_unsynced(&self.user_id)?;
        let changes: Vec<PhraseDelta> = dirty.iter().map(PhraseDelta::from_record).collect();

        let mut report = SyncReport {
            mode: SyncMode::Warm,
            pushed: changes.len(),
            pulled: 0,
            merged: 0,
        };

        match self
            .transport
            .push_pull(&self.user_id, &changes, last_synced_at)
        {
            Ok(server_deltas) => {
                report.pulled = server_deltas.len();
                report.merged = self.smart_merge(server_deltas)?;

                let pushed_keys: Vec<PhraseKey> = dirty.iter().map(PhraseRecord::key).collect();
                self.store.mark_synced(&pushed_keys)?;

                info!(
                    user = %self.user_id,
                    pushed = report.pushed,
                    pulled = report.pulled,
                    merged = report.merged,
                    "delta sync complete"
                );
            }
            Err(err) if err.is_recoverable() => {
                warn!(
                    user = %self.user_id,
                    error = %err,
                    "sync exchange failed; serving local state offline"
                );
                report.mode = SyncMode::WarmOffline;
                report.pushed = 0;
            }
            Err(err) => return Err(err),
        }

        // Whether or not the exchange succeeded, the index is rebuilt from
        // whatever the store actually holds now.
        let current = self.store.find_all(&self.user_id)?;
        self.rebuild_index(&current);
        Ok(report)
    }

    /// Applies server-reported deltas record by record: the server value
    /// wins when no local record exists or when it is strictly newer;
    /// otherwise the local value is kept and stays dirty, to be offered
    /// again on the next push. Winners go to the index as overwrites and to
    /// the store as one atomic clean batch.
    fn smart_merge(&self, server_deltas: Vec<PhraseDelta>) -> SyncResult<usize> {
        if server_deltas.is_empty() {
            return Ok(0);
        }

        let mut winners: Vec<PhraseRecord> = Vec::new();
        for delta in server_deltas {
            let local = self.store.find_by_text(&self.user_id, &delta.text)?;
            let local_updated_at = local.as_ref().map(|record| record.updated_at);

            if resolve(local_updated_at, delta.updated_at).is_remote_win() {
                debug!(
                    user = %self.user_id,
                    text = %delta.text,
                    server_ts = delta.updated_at,
                    local_ts = ?local_updated_at,
                    "merge: server value wins"
                );
                winners.push(delta.into_record(self.user_id.clone(), SyncState::Clean));
            } else {
                debug!(
                    user = %self.user_id,
                    text = %delta.text,
                    server_ts = delta.updated_at,
                    local_ts = ?local_updated_at,
                    "merge: local value kept"
                );
            }
        }

        if winners.is_empty() {
            return Ok(0);
        }

        {
            let mut index = self.index.write();
            for record in &winners {
                index.restore(&record.text, record.frequency);
            }
        }
        self.store.apply_merged_batch(&winners)?;
        Ok(winners.len())
    }

    fn rebuild_index(&self, records: &[PhraseRecord]) {
        let entries = records
            .iter()
            .map(|record| Suggestion::new(record.text.clone(), record.frequency));
        self.index.write().rebuild_from(entries);
    }
}
