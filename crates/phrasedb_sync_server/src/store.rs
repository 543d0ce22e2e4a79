//! Server-side record table.

use parking_lot::RwLock;
use phrasedb_store::UserId;
use phrasedb_sync_protocol::{resolve, PhraseDelta};
use std::collections::{BTreeMap, HashMap};

/// The stored state of one phrase on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerRecord {
    frequency: u64,
    updated_at: i64,
}

/// The authority's per-user record table.
///
/// Holds one `(frequency, updated_at)` pair per `(user, text)` and applies
/// the last-write-wins policy on every upsert: an incoming value replaces
/// the stored one only when strictly newer. There is no per-client state;
/// clients tell the server what they have seen via the watermark in each
/// pull.
#[derive(Debug, Default)]
pub struct ServerStore {
    users: RwLock<HashMap<UserId, BTreeMap<String, ServerRecord>>>,
}

impl ServerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one pushed change, returning true if it won.
    pub fn upsert(&self, user_id: &UserId, delta: &PhraseDelta) -> bool {
        let mut users = self.users.write();
        let table = users.entry(user_id.clone()).or_default();

        let existing = table.get(&delta.text).map(|r| r.updated_at);
        if !resolve(existing, delta.updated_at).is_remote_win() {
            return false;
        }

        table.insert(
            delta.text.clone(),
            ServerRecord {
                frequency: delta.frequency,
                updated_at: delta.updated_at,
            },
        );
        true
    }

    /// Applies a batch of pushed changes, returning how many won.
    pub fn apply_changes(&self, user_id: &UserId, changes: &[PhraseDelta]) -> usize {
        changes
            .iter()
            .filter(|delta| self.upsert(user_id, delta))
            .count()
    }

    /// Returns every record updated strictly after `watermark`.
    #[must_use]
    pub fn deltas_since(&self, user_id: &UserId, watermark: i64) -> Vec<PhraseDelta> {
        let users = self.users.read();
        users
            .get(user_id)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, record)| record.updated_at > watermark)
                    .map(|(text, record)| {
                        PhraseDelta::new(text.clone(), record.frequency, record.updated_at)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns every record stored for the user.
    #[must_use]
    pub fn all(&self, user_id: &UserId) -> Vec<PhraseDelta> {
        self.deltas_since(user_id, i64::MIN)
    }

    /// Returns the number of records stored for the user.
    #[must_use]
    pub fn record_count(&self, user_id: &UserId) -> usize {
        self.users
            .read()
            .get(user_id)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn upsert_accepts_new_phrase() {
        let store = ServerStore::new();
        let alice = user("alice");
        assert!(store.upsert(&alice, &PhraseDelta::new("hi", 5, 100)));
        assert_eq!(store.record_count(&alice), 1);
    }

    #[test]
    fn upsert_applies_strict_lww() {
        let store = ServerStore::new();
        let alice = user("alice");
        store.upsert(&alice, &PhraseDelta::new("hi", 5, 100));

        // Tie loses, older loses, strictly newer wins.
        assert!(!store.upsert(&alice, &PhraseDelta::new("hi", 9, 100)));
        assert!(!store.upsert(&alice, &PhraseDelta::new("hi", 9, 99)));
        assert!(store.upsert(&alice, &PhraseDelta::new("hi", 9, 101)));

        let all = store.all(&alice);
        assert_eq!(all, vec![PhraseDelta::new("hi", 9, 101)]);
    }

    #[test]
    fn deltas_since_is_strictly_greater() {
        let store = ServerStore::new();
        let alice = user("alice");
        store.upsert(&alice, &PhraseDelta::new("old", 1, 100));
        store.upsert(&alice, &PhraseDelta::new("new", 1, 200));

        let deltas = store.deltas_since(&alice, 100);
        assert_eq!(deltas, vec![PhraseDelta::new("new", 1, 200)]);
        assert!(store.deltas_since(&alice, 200).is_empty());
    }

    #[test]
    fn users_are_isolated() {
        let store = ServerStore::new();
        store.upsert(&user("alice"), &PhraseDelta::new("hers", 1, 100));
        store.upsert(&user("bob"), &PhraseDelta::new("his", 1, 100));

        assert_eq!(store.record_count(&user("alice")), 1);
        assert_eq!(store.all(&user("bob")), vec![PhraseDelta::new("his", 1, 100)]);
    }

    #[test]
    fn unknown_user_is_empty() {
        let store = ServerStore::new();
        assert!(store.all(&user("nobody")).is_empty());
        assert_eq!(store.record_count(&user("nobody")), 0);
    }
}
