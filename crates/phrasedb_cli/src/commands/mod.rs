//! CLI command implementations.

pub mod backup;
pub mod inspect;
pub mod learn;
pub mod suggest;

use phrasedb_store::FileStore;
use phrasedb_sync_engine::{OfflineTransport, Session};

/// The session type every command operates on.
pub type CliSession = Session<OfflineTransport, FileStore>;
