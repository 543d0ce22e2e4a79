//! Transport layer abstraction for the sync exchange.

use crate::error::{SyncError, SyncResult};
use phrasedb_store::UserId;
use phrasedb_sync_protocol::{PhraseDelta, SyncRequest};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// The network boundary between the engine and the remote authority.
///
/// This trait abstracts the wire so different implementations can back it
/// (HTTP, an in-process reference server in tests, a mock). Partial
/// application is forbidden on both calls: either the whole exchange is
/// accepted or the whole call fails. Timeout policy belongs to the
/// implementation; the engine treats every error here uniformly as "sync
/// round failed, retain local state".
pub trait SyncTransport: Send + Sync {
    /// Uploads local changes and returns server-side records updated
    /// strictly after `last_synced_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange could not be completed.
    fn push_pull(
        &self,
        user_id: &UserId,
        changes: &[PhraseDelta],
        last_synced_at: i64,
    ) -> SyncResult<Vec<PhraseDelta>>;

    /// Returns every record the remote authority has for the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the download could not be completed.
    fn full_download(&self, user_id: &UserId) -> SyncResult<Vec<PhraseDelta>>;
}

/// A scriptable transport for unit tests.
///
/// Responses default to empty delta sets (an authority with no data);
/// failure injection flips either call into a transport error. Push/pull
/// requests are recorded for assertions.
#[derive(Debug, Default)]
pub struct MockTransport {
    push_pull_response: Mutex<Vec<PhraseDelta>>,
    full_download_response: Mutex<Vec<PhraseDelta>>,
    fail_push_pull: AtomicBool,
    fail_full_download: AtomicBool,
    recorded_requests: Mutex<Vec<SyncRequest>>,
    full_downloads: AtomicUsize,
}

impl MockTransport {
    /// Creates a mock with empty responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deltas returned by the next push/pull exchanges.
    pub fn set_push_pull_response(&self, deltas: Vec<PhraseDelta>) {
        *self.push_pull_response.lock().unwrap() = deltas;
    }

    /// Sets the records returned by full downloads.
    pub fn set_full_download_response(&self, deltas: Vec<PhraseDelta>) {
        *self.full_download_response.lock().unwrap() = deltas;
    }

    /// Makes push/pull fail with a transport error.
    pub fn fail_push_pull(&self, fail: bool) {
        self.fail_push_pull.store(fail, Ordering::SeqCst);
    }

    /// Makes full download fail with a transport error.
    pub fn fail_full_download(&self, fail: bool) {
        self.fail_full_download.store(fail, Ordering::SeqCst);
    }

    /// Returns every push/pull request seen so far.
    pub fn recorded_requests(&self) -> Vec<SyncRequest> {
        self.recorded_requests.lock().unwrap().clone()
    }

    /// Returns the number of full downloads served.
    pub fn full_download_count(&self) -> usize {
        self.full_downloads.load(Ordering::SeqCst)
    }
}

impl SyncTransport for MockTransport {
    fn push_pull(
        &self,
        user_id: &UserId,
        changes: &[PhraseDelta],
        last_synced_at: i64,
    ) -> SyncResult<Vec<PhraseDelta>> {
        if self.fail_push_pull.load(Ordering::SeqCst) {
            return Err(SyncError::transport("mock push/pull failure"));
        }

        self.recorded_requests.lock().unwrap().push(SyncRequest::new(
            user_id.clone(),
            changes.to_vec(),
            last_synced_at,
        ));
        Ok(self.push_pull_response.lock().unwrap().clone())
    }

    fn full_download(&self, _user_id: &UserId) -> SyncResult<Vec<PhraseDelta>> {
        if self.fail_full_download.load(Ordering::SeqCst) {
            return Err(SyncError::transport("mock full download failure"));
        }

        self.full_downloads.fetch_add(1, Ordering::SeqCst);
        Ok(self.full_download_response.lock().unwrap().clone())
    }
}

/// The transport to wire when no remote authority is configured.
///
/// Full downloads report an empty record set (there is no authority, so
/// the authoritative set is empty), which lets a cold start complete and
/// local writes proceed. Push/pull fails, so dirty records stay dirty and
/// are offered to a real authority if one is configured later.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl SyncTransport for OfflineTransport {
    fn push_pull(
        &self,
        _user_id: &UserId,
        _changes: &[PhraseDelta],
        _last_synced_at: i64,
    ) -> SyncResult<Vec<PhraseDelta>> {
        Err(SyncError::transport("no remote authority configured"))
    }

    fn full_download(&self, _user_id: &UserId) -> SyncResult<Vec<PhraseDelta>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn mock_defaults_to_empty_responses() {
        let transport = MockTransport::new();
        assert!(transport.push_pull(&user("u"), &[], 0).unwrap().is_empty());
        assert!(transport.full_download(&user("u")).unwrap().is_empty());
        assert_eq!(transport.full_download_count(), 1);
    }

    #[test]
    fn mock_records_push_pull_requests() {
        let transport = MockTransport::new();
        let changes = vec![PhraseDelta::new("hi", 5, 100)];
        transport.push_pull(&user("alice"), &changes, 90).unwrap();

        let recorded = transport.recorded_requests();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].user_id.as_str(), "alice");
        assert_eq!(recorded[0].changes, changes);
        assert_eq!(recorded[0].last_synced_at, 90);
    }

    #[test]
    fn mock_failure_injection() {
        let transport = MockTransport::new();
        transport.fail_push_pull(true);
        assert!(matches!(
            transport.push_pull(&user("u"), &[], 0),
            Err(SyncError::Transport { .. })
        ));

        transport.fail_full_download(true);
        assert!(matches!(
            transport.full_download(&user("u")),
            Err(SyncError::Transport { .. })
        ));
    }

    #[test]
    fn offline_transport_behavior() {
        let transport = OfflineTransport;
        assert!(transport.full_download(&user("u")).unwrap().is_empty());
        assert!(transport.push_pull(&user("u"), &[], 0).is_err());
    }
}
