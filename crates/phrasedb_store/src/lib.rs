//! # PhraseDB Store
//!
//! Durable per-user storage of phrase records for PhraseDB.
//!
//! This crate provides:
//! - The [`PhraseRecord`] data model and its [`SyncState`] lifecycle
//! - The [`ReplicaStore`] contract the sync engine consumes
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`FileStore`] for JSON-document persistence
//! - The [`Clock`] abstraction used to stamp record timestamps
//!
//! The store is the source of truth for a user's phrase history; the
//! in-memory prefix index is a derived view rebuilt from store scans.
//! Records are keyed by `(user_id, text)` and carry a dirty/clean flag
//! recording whether the remote authority has acknowledged them.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod error;
mod file;
mod memory;
mod store;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::ReplicaStore;
pub use types::{EmptyUserId, PhraseKey, PhraseRecord, SyncState, UserId};
