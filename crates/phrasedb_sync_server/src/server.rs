//! The sync server facade.

use crate::config::ServerConfig;
use crate::handler::RequestHandler;
use crate::store::ServerStore;
use phrasedb_store::UserId;
use phrasedb_sync_protocol::{PhraseDelta, SyncRequest};
use std::sync::Arc;

/// The reference sync authority.
///
/// Maintains the per-user record table and answers the two operations of
/// the sync contract. The facade is transport-agnostic: a deployment wraps
/// it in HTTP endpoints (`POST /sync`, `GET /sync/full-download`) that
/// decode payloads and delegate here; tests call it in-process.
///
/// # Example
///
/// ```
/// use phrasedb_store::UserId;
/// use phrasedb_sync_protocol::{PhraseDelta, SyncRequest};
/// use phrasedb_sync_server::{ServerConfig, SyncServer};
///
/// let server = SyncServer::new(ServerConfig::default());
/// let alice = UserId::new("alice").unwrap();
///
/// let request = SyncRequest::new(alice.clone(), vec![PhraseDelta::new("hi", 1, 100)], 0);
/// let response = server.handle_sync(request).unwrap();
/// assert_eq!(response.len(), 1);
/// assert_eq!(server.record_count(&alice), 1);
/// ```
pub struct SyncServer {
    handler: RequestHandler,
    store: Arc<ServerStore>,
}

impl SyncServer {
    /// Creates a server with an empty record table.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(ServerStore::new()))
    }

    /// Creates a server over an existing record table.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Arc<ServerStore>) -> Self {
        let handler = RequestHandler::new(config, Arc::clone(&store));
        Self { handler, store }
    }

    /// Handles a push/pull exchange. See [`RequestHandler::handle_sync`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails validation.
    pub fn handle_sync(&self, request: SyncRequest) -> crate::ServerResult<Vec<PhraseDelta>> {
        self.handler.handle_sync(request)
    }

    /// Handles a full download for `user_id`.
    pub fn handle_full_download(&self, user_id: &UserId) -> Vec<PhraseDelta> {
        self.handler.handle_full_download(user_id)
    }

    /// Returns the underlying record table.
    #[must_use]
    pub fn store(&self) -> &Arc<ServerStore> {
        &self.store
    }

    /// Returns the number of records stored for `user_id`.
    #[must_use]
    pub fn record_count(&self, user_id: &UserId) -> usize {
        self.store.record_count(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_exchange_flow() {
        let server = SyncServer::new(ServerConfig::default());
        let alice = UserId::new("alice").unwrap();

        // Another device seeds the server.
        server
            .handle_sync(SyncRequest::new(
                alice.clone(),
                vec![PhraseDelta::new("from other device", 3, 500)],
                0,
            ))
            .unwrap();

        // A fresh device full-downloads everything.
        let all = server.handle_full_download(&alice);
        assert_eq!(all, vec![PhraseDelta::new("from other device", 3, 500)]);

        // Then exchanges deltas from its watermark.
        let response = server
            .handle_sync(SyncRequest::new(
                alice.clone(),
                vec![PhraseDelta::new("typed here", 1, 600)],
                500,
            ))
            .unwrap();
        assert_eq!(response, vec![PhraseDelta::new("typed here", 1, 600)]);
        assert_eq!(server.record_count(&alice), 2);
    }

    #[test]
    fn shared_store_across_servers() {
        let store = Arc::new(ServerStore::new());
        let first = SyncServer::with_store(ServerConfig::default(), Arc::clone(&store));
        let second = SyncServer::with_store(ServerConfig::default(), store);
        let alice = UserId::new("alice").unwrap();

        first
            .handle_sync(SyncRequest::new(
                alice.clone(),
                vec![PhraseDelta::new("hi", 1, 100)],
                0,
            ))
            .unwrap();
        assert_eq!(second.record_count(&alice), 1);
    }
}
