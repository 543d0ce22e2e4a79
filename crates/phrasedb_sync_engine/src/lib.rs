//! # PhraseDB Sync Engine
//!
//! The synchronization core of PhraseDB.
//!
//! This crate provides:
//! - The [`SyncEngine`] state machine: cold-start full download, warm-start
//!   delta exchange, smart merge, and index rebuild
//! - The [`SyncTransport`] boundary with [`MockTransport`] and
//!   [`OfflineTransport`]
//! - [`HttpTransport`] over an abstract [`HttpClient`]
//! - The [`Session`] facade tying a user id to its index, store, and
//!   transport
//! - [`PeriodicSync`] background rounds on a timer
//!
//! ## Architecture
//!
//! Writes are usable immediately and offline: the in-memory index is
//! updated synchronously and the replica store persists each write as a
//! dirty record. A sync round drains dirty records to the remote authority,
//! merges the authority's counter-delta back with a last-write-wins policy,
//! and rebuilds the index from the post-merge store state.
//!
//! ## Key invariants
//!
//! - At most one sync round runs at a time (atomic check-and-set guard)
//! - A locally newer write is never clobbered by a stale server value
//! - A failed warm-start exchange degrades to offline mode instead of
//!   failing initialization
//! - After a quiescent period, repeated rounds reach a fixed point

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod http;
mod periodic;
mod session;
mod transport;

pub use engine::{EngineState, SyncEngine, SyncMode, SyncReport, SyncStats};
pub use error::{SyncError, SyncResult};
pub use http::{HttpClient, HttpTransport};
pub use periodic::PeriodicSync;
pub use session::Session;
pub use transport::{MockTransport, OfflineTransport, SyncTransport};
