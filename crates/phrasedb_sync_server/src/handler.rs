//! Request handling for the sync exchange.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::store::ServerStore;
use phrasedb_store::UserId;
use phrasedb_sync_protocol::{PhraseDelta, SyncRequest};
use std::sync::Arc;
use tracing::{debug, info};

/// Validates and executes sync requests against the record table.
///
/// A missing or empty user id cannot reach this layer: the wire types
/// require a valid [`UserId`], so a request without one fails decoding at
/// the transport edge.
pub struct RequestHandler {
    config: ServerConfig,
    store: Arc<ServerStore>,
}

impl RequestHandler {
    /// Creates a handler over the given store.
    pub fn new(config: ServerConfig, store: Arc<ServerStore>) -> Self {
        Self { config, store }
    }

    /// Handles a push/pull exchange.
    ///
    /// Applies the pushed changes first (last-write-wins per record), then
    /// answers with every stored record updated strictly after the client's
    /// watermark. The exchange is all-or-nothing from the client's view: a
    /// rejected request applies none of its changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the push exceeds the configured batch limit.
    pub fn handle_sync(&self, request: SyncRequest) -> ServerResult<Vec<PhraseDelta>> {
        if request.changes.len() > self.config.max_push_batch {
            return Err(ServerError::BatchTooLarge {
                got: request.changes.len(),
                limit: self.config.max_push_batch,
            });
        }

        let accepted = self.store.apply_changes(&request.user_id, &request.changes);
        debug!(
            user = %request.user_id,
            pushed = request.changes.len(),
            accepted,
            "applied pushed changes"
        );

        let response = self
            .store
            .deltas_since(&request.user_id, request.last_synced_at);
        info!(
            user = %request.user_id,
            pushed = request.changes.len(),
            returned = response.len(),
            "sync exchange"
        );
        Ok(response)
    }

    /// Handles a full download: everything stored for the user.
    pub fn handle_full_download(&self, user_id: &UserId) -> Vec<PhraseDelta> {
        let response = self.store.all(user_id);
        info!(user = %user_id, records = response.len(), "full download");
        response
    }
}
