//! # PhraseDB Sync Protocol
//!
//! Wire types and conflict policy for PhraseDB synchronization.
//!
//! This crate provides:
//! - [`PhraseDelta`], the `[text, frequency, updatedAt]` wire triple
//! - [`SyncRequest`], the push/pull envelope
//! - [`BackupEntry`], the `[text, frequency]` backup snapshot format
//! - [`resolve`], the last-write-wins comparison shared by the client
//!   merge and the server upsert
//!
//! All payloads are JSON. Delta responses are bare arrays of triples; the
//! backup snapshot carries frequencies only (no timestamps), since it
//! restores as fresh local writes rather than as authoritative state.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backup;
mod conflict;
mod delta;
mod error;
mod messages;

pub use backup::BackupEntry;
pub use conflict::{resolve, MergeOutcome};
pub use delta::PhraseDelta;
pub use error::{ProtocolError, ProtocolResult};
pub use messages::SyncRequest;
