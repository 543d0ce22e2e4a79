//! JSON-document replica store.

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::memory::{to_record, RecordMap, StoredRecord};
use crate::store::ReplicaStore;
use crate::types::{PhraseKey, PhraseRecord, SyncState, UserId};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// A replica store persisted as a single JSON document.
///
/// The whole record set is loaded eagerly at open and rewritten after each
/// mutation through a temp-file-then-rename, so the on-disk document is
/// never observed half-written. A document that fails to parse is logged,
/// discarded, and replaced by an empty store; the next sync round then runs
/// as a cold start and re-downloads the authoritative set.
pub struct FileStore {
    path: PathBuf,
    records: RwLock<RecordMap>,
    clock: Arc<dyn Clock>,
}

impl FileStore {
    /// Opens (or creates) the store backed by the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read. A readable
    /// but malformed file is not an error: its contents are discarded.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    /// Opens the store with the given clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let records = if path.exists() {
            Self::load(&path)?
        } else {
            RecordMap::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
            clock,
        })
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<RecordMap> {
        let contents = fs::read_to_string(path)?;

        let flat: Vec<PhraseRecord> = match serde_json::from_str(&contents) {
            Ok(flat) => flat,
            Err(err) => {
                // Corrupt cache: discard and let the next initialize run as
                // a cold start against the remote authority.
                warn!(path = %path.display(), error = %err, "discarding malformed store document");
                return Ok(RecordMap::new());
            }
        };

        let mut records = RecordMap::new();
        for record in flat {
            records.entry(record.user_id.clone()).or_default().insert(
                record.text,
                StoredRecord {
                    frequency: record.frequency,
                    updated_at: record.updated_at,
                    sync_state: record.sync_state,
                },
            );
        }
        Ok(records)
    }

    /// Rewrites the document from the given map. Caller holds the write
    /// lock, so readers never see the store between mutation and persist.
    fn persist(&self, records: &RecordMap) -> StoreResult<()> {
        let mut flat: Vec<PhraseRecord> = records
            .iter()
            .flat_map(|(user_id, table)| {
                table
                    .iter()
                    .map(move |(text, stored)| to_record(user_id, text, stored))
            })
            .collect();
        flat.sort_by(|a, b| a.user_id.cmp(&b.user_id).then_with(|| a.text.cmp(&b.text)));

        let contents = serde_json::to_string(&flat)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ReplicaStore for FileStore {
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
        self.persist(&records)?;

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
        self.persist(&records)
    }

    fn mark_synced(&self, keys: &[PhraseKey]) -> StoreResult<()> {
        let mut records = self.records.write();
        let mut changed = false;
        for key in keys {
            if let Some(stored) = records
                .get_mut(&key.user_id)
                .and_then(|table| table.get_mut(&key.text))
            {
                stored.sync_state = SyncState::Clean;
                changed = true;
            }
        }
        if changed {
            self.persist(&records)?;
        }
        Ok(())
    }

    fn clear(&self, user_id: &UserId) -> StoreResult<()> {
        let mut records = self.records.write();
        if records.remove(user_id).is_some() {
            self.persist(&records)?;
        }
        Ok(())
    }
}
