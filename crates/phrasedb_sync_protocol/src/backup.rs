//! Frequency-only backup snapshot format.

use crate::error::ProtocolResult;
use serde::{Deserialize, Serialize};

type EntryTuple = (String, u64);

/// One entry of a backup snapshot: `[text, frequency]`.
///
/// Snapshots carry no timestamps. An imported entry is restored as a fresh
/// local write, so the next sync offers it to the authority instead of
/// pretending it was already acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryTuple", into = "EntryTuple")]
pub struct BackupEntry {
    /// The phrase text.
    pub text: String,
    /// Confirmed-use count at export time.
    pub frequency: u64,
}

impl BackupEntry {
    /// Creates an entry.
    pub fn new(text: impl Into<String>, frequency: u64) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }

    /// Serializes a snapshot to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(entries: &[BackupEntry]) -> ProtocolResult<String> {
        Ok(serde_json::to_string(entries)?)
    }

    /// Serializes a snapshot to human-readable JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(entries: &[BackupEntry]) -> ProtocolResult<String> {
        Ok(serde_json::to_string_pretty(entries)?)
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an array of
    /// `[text, frequency]` pairs.
    pub fn from_json(json: &str) -> ProtocolResult<Vec<BackupEntry>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<EntryTuple> for BackupEntry {
    fn from((text, frequency): EntryTuple) -> Self {
        Self { text, frequency }
    }
}

impl From<BackupEntry> for EntryTuple {
    fn from(entry: BackupEntry) -> Self {
        (entry.text, entry.frequency)
    }
}
