//! Last-write-wins conflict resolution.
//!
//! The same comparison drives both sides of the exchange: the client's
//! smart merge when applying server deltas, and the server's upsert when
//! accepting pushed changes. Keeping it in one place means the two sides
//! cannot disagree about who wins.

/// Which side's value survives a per-record comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The incoming remote value replaces the existing one.
    RemoteWins,
    /// The existing local value is kept; the remote item is a no-op.
    LocalWins,
}

impl MergeOutcome {
    /// Returns true for [`MergeOutcome::RemoteWins`].
    #[must_use]
    pub fn is_remote_win(&self) -> bool {
        matches!(self, MergeOutcome::RemoteWins)
    }
}

/// Decides whether an incoming value replaces an existing record.
///
/// The remote side wins unconditionally when no local record exists, and
/// otherwise only when its timestamp is **strictly** greater. A tie keeps
/// the existing value, which makes the policy deterministic and means a
/// side never loses a write to an equally-old echo of itself.
#[must_use]
pub fn resolve(existing_updated_at: Option<i64>, incoming_updated_at: i64) -> MergeOutcome {
    match existing_updated_at {
        None => MergeOutcome::RemoteWins,
        Some(existing) if incoming_updated_at > existing => MergeOutcome::RemoteWins,
        Some(_) => MergeOutcome::LocalWins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_local_accepts_remote() {
        assert_eq!(resolve(None, 100), MergeOutcome::RemoteWins);
    }

    #[test]
    fn strictly_newer_remote_wins() {
        assert_eq!(resolve(Some(100), 150), MergeOutcome::RemoteWins);
    }

    #[test]
    fn tie_keeps_local() {
        assert_eq!(resolve(Some(200), 200), MergeOutcome::LocalWins);
    }

    #[test]
    fn older_remote_is_ignored() {
        assert_eq!(resolve(Some(200), 199), MergeOutcome::LocalWins);
    }

    #[test]
    fn outcome_predicate() {
        assert!(MergeOutcome::RemoteWins.is_remote_win());
        assert!(!MergeOutcome::LocalWins.is_remote_win());
    }

    proptest::proptest! {
        #[test]
        fn remote_wins_iff_strictly_newer(existing in -1000i64..1000, incoming in -1000i64..1000) {
            let outcome = resolve(Some(existing), incoming);
            proptest::prop_assert_eq!(outcome.is_remote_win(), incoming > existing);
        }
    }
}
