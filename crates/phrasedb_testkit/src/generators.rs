//! Property-based test generators using proptest.
//!
//! Strategies deliberately use a small alphabet and short phrases so that
//! prefix collisions and same-text conflicts happen often.

use phrasedb_sync_protocol::PhraseDelta;
use proptest::prelude::*;
use std::collections::HashSet;

/// Strategy for non-empty phrase texts over a small alphabet.
pub fn phrase_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[abc ]{1,8}").expect("valid regex")
}

/// Strategy for usage frequencies.
pub fn frequency_strategy() -> impl Strategy<Value = u64> {
    1u64..1000
}

/// Strategy for epoch-millisecond timestamps in a narrow band, so ties and
/// near-ties between generated records are common.
pub fn timestamp_strategy() -> impl Strategy<Value = i64> {
    0i64..500
}

/// Strategy for a single wire delta.
pub fn delta_strategy() -> impl Strategy<Value = PhraseDelta> {
    (phrase_strategy(), frequency_strategy(), timestamp_strategy())
        .prop_map(|(text, frequency, updated_at)| PhraseDelta::new(text, frequency, updated_at))
}

/// Strategy for a delta batch with unique phrase texts, as a well-formed
/// server response would carry.
pub fn delta_batch_strategy(max_len: usize) -> impl Strategy<Value = Vec<PhraseDelta>> {
    proptest::collection::vec(delta_strategy(), 0..max_len).prop_map(|deltas| {
        let mut seen = HashSet::new();
        deltas
            .into_iter()
            .filter(|delta| seen.insert(delta.text.clone()))
            .collect()
    })
}
