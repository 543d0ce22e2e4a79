//! HTTP-shaped transport implementation.
//!
//! The actual HTTP client is abstracted behind a trait so callers can plug
//! in whichever library (or in-process adapter) they already use; this
//! crate only defines how the sync contract maps onto URLs and JSON bodies.

use crate::error::{SyncError, SyncResult};
use crate::transport::SyncTransport;
use phrasedb_store::UserId;
use phrasedb_sync_protocol::{PhraseDelta, ProtocolError, SyncRequest};

/// HTTP client abstraction.
///
/// Implementations own connection management and timeout policy. Errors
/// are reported as plain strings; the transport wraps them into
/// [`SyncError::Transport`].
pub trait HttpClient: Send + Sync {
    /// Sends a GET request, returning the response body.
    fn get(&self, url: &str) -> Result<String, String>;

    /// Sends a POST request with a JSON body, returning the response body.
    fn post_json(&self, url: &str, body: String) -> Result<String, String>;
}

/// A sync transport speaking the JSON-over-HTTP exchange.
///
/// Maps the contract onto two endpoints:
/// - `POST {base}/sync` with a `{userId, changes, lastSyncedAt}` body,
///   answered by a bare array of `[text, frequency, updatedAt]` triples
/// - `GET {base}/sync/full-download?userId={id}`, answered the same way
pub struct HttpTransport<C: HttpClient> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a transport against `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn parse_deltas(body: &str) -> SyncResult<Vec<PhraseDelta>> {
        let deltas = serde_json::from_str(body).map_err(ProtocolError::from)?;
        Ok(deltas)
    }
}

impl<C: HttpClient> SyncTransport for HttpTransport<C> {
    fn push_pull(
        &self,
        user_id: &UserId,
        changes: &[PhraseDelta],
        last_synced_at: i64,
    ) -> SyncResult<Vec<PhraseDelta>> {
        let request = SyncRequest::new(user_id.clone(), changes.to_vec(), last_synced_at);
        let body = serde_json::to_string(&request).map_err(ProtocolError::from)?;

        let url = format!("{}/sync", self.base_url);
        let response = self
            .client
            .post_json(&url, body)
            .map_err(SyncError::transport)?;

        Self::parse_deltas(&response)
    }

    fn full_download(&self, user_id: &UserId) -> SyncResult<Vec<PhraseDelta>> {
        let url = format!(
            "{}/sync/full-download?userId={}",
            self.base_url,
            user_id.as_str()
        );
        let response = self.client.get(&url).map_err(SyncError::transport)?;

        Self::parse_deltas(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedClient {
        response: Mutex<Result<String, String>>,
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ScriptedClient {
        fn new(response: Result<&str, &str>) -> Self {
            Self {
                response: Mutex::new(response.map(str::to_owned).map_err(str::to_owned)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<(String, Option<String>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl HttpClient for ScriptedClient {
        fn get(&self, url: &str) -> Result<String, String> {
            self.seen.lock().unwrap().push((url.to_owned(), None));
            self.response.lock().unwrap().clone()
        }

        fn post_json(&self, url: &str, body: String) -> Result<String, String> {
            self.seen.lock().unwrap().push((url.to_owned(), Some(body)));
            self.response.lock().unwrap().clone()
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn push_pull_posts_envelope_and_parses_response() {
        let client = ScriptedClient::new(Ok(r#"[["hi",7,150]]"#));
        let transport = HttpTransport::new("http://localhost:3000", client);

        let deltas = transport
            .push_pull(&user("alice"), &[PhraseDelta::new("hi", 5, 100)], 90)
            .unwrap();
        assert_eq!(deltas, vec![PhraseDelta::new("hi", 7, 150)]);

        let seen = transport.client.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "http://localhost:3000/sync");
        assert_eq!(
            seen[0].1.as_deref(),
            Some(r#"{"userId":"alice","changes":[["hi",5,100]],"lastSyncedAt":90}"#)
        );
    }

    #[test]
    fn full_download_hits_query_endpoint() {
        let client = ScriptedClient::new(Ok("[]"));
        let transport = HttpTransport::new("http://localhost:3000", client);

        let deltas = transport.full_download(&user("alice")).unwrap();
        assert!(deltas.is_empty());

        let seen = transport.client.seen();
        assert_eq!(
            seen[0].0,
            "http://localhost:3000/sync/full-download?userId=alice"
        );
    }

    #[test]
    fn client_failure_is_a_transport_error() {
        let client = ScriptedClient::new(Err("connection refused"));
        let transport = HttpTransport::new("http://localhost:3000", client);

        let err = transport.full_download(&user("alice")).unwrap_err();
        assert!(matches!(err, SyncError::Transport { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn garbage_response_is_malformed() {
        let client = ScriptedClient::new(Ok("<html>not json</html>"));
        let transport = HttpTransport::new("http://localhost:3000", client);

        let err = transport.push_pull(&user("alice"), &[], 0).unwrap_err();
        assert!(matches!(err, SyncError::Malformed(_)));
        assert!(err.is_recoverable());
    }
}
