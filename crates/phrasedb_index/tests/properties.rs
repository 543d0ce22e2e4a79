//! Property-based tests for the ranked prefix index.

use phrasedb_index::PrefixIndex;
use proptest::prelude::*;
use std::collections::HashMap;

fn phrase_strategy() -> impl Strategy<Value = String> {
    // Short phrases over a small alphabet so prefixes collide often.
    proptest::string::string_regex("[ab ]{1,6}").unwrap()
}

proptest! {
    /// For any insertion sequence, `suggest(prefix)` returns exactly the
    /// inserted phrases starting with that prefix, each with its cumulative
    /// count.
    #[test]
    fn suggest_matches_naive_model(
        phrases in proptest::collection::vec(phrase_strategy(), 0..40),
        prefix in proptest::string::string_regex("[ab ]{0,3}").unwrap(),
    ) {
        let mut index = PrefixIndex::new();
        let mut model: HashMap<String, u64> = HashMap::new();

        for phrase in &phrases {
            index.insert_or_increment(phrase);
            *model.entry(phrase.clone()).or_insert(0) += 1;
        }

        let results = index.suggest(&prefix);

        let mut expected: Vec<(String, u64)> = model
            .iter()
            .filter(|(text, _)| text.starts_with(&prefix))
            .map(|(text, frequency)| (text.clone(), *frequency))
            .collect();
        expected.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let actual: Vec<(String, u64)> = results
            .into_iter()
            .map(|s| (s.text, s.frequency))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Rebuilding from the flat export reproduces identical suggestions for
    /// every prefix.
    #[test]
    fn rebuild_from_export_preserves_suggestions(
        phrases in proptest::collection::vec(phrase_strategy(), 0..40),
    ) {
        let mut index = PrefixIndex::new();
        for phrase in &phrases {
            index.insert_or_increment(phrase);
        }

        let mut rebuilt = PrefixIndex::new();
        rebuilt.rebuild_from(index.export_flat());

        for prefix in ["", "a", "b", "ab", "ba", " "] {
            prop_assert_eq!(index.suggest(prefix), rebuilt.suggest(prefix));
        }
    }

    /// `best_match` always equals the head of `suggest`.
    #[test]
    fn best_match_is_suggest_head(
        phrases in proptest::collection::vec(phrase_strategy(), 0..40),
        prefix in proptest::string::string_regex("[ab ]{0,3}").unwrap(),
    ) {
        let mut index = PrefixIndex::new();
        for phrase in &phrases {
            index.insert_or_increment(phrase);
        }

        prop_assert_eq!(
            index.best_match(&prefix),
            index.suggest(&prefix).into_iter().next()
        );
    }
}
