//! The ranked prefix index.

use crate::node::IndexNode;

/// A completion candidate returned by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The completed phrase.
    pub text: String,
    /// Confirmed-use count, the ranking key.
    pub frequency: u64,
}

impl Suggestion {
    /// Creates a suggestion.
    pub fn new(text: impl Into<String>, frequency: u64) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

/// An in-memory trie mapping character prefixes to ranked completions.
///
/// The index is mutated on two paths only: the write path increments a
/// phrase's frequency on each confirmed use, and the sync path overwrites
/// frequencies wholesale when a merge or rebuild applies authoritative
/// state. The two must not be mixed: loading persisted records through
/// [`PrefixIndex::insert_or_increment`] would double-count, which is why
/// [`PrefixIndex::restore`] and [`PrefixIndex::rebuild_from`] exist.
///
/// # Example
///
/// ```rust
/// use phrasedb_index::PrefixIndex;
///
/// let mut index = PrefixIndex::new();
/// index.insert_or_increment("good morning");
/// index.insert_or_increment("good morning");
/// index.insert_or_increment("good night");
///
/// let top = index.best_match("good").unwrap();
/// assert_eq!(top.text, "good morning");
/// assert_eq!(top.frequency, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    root: IndexNode,
    phrase_count: usize,
}

impl PrefixIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct phrases in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrase_count
    }

    /// Returns true if the index holds no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrase_count == 0
    }

    /// Removes every phrase, leaving an empty tree.
    pub fn clear(&mut self) {
        self.root = IndexNode::default();
        self.phrase_count = 0;
    }

    /// Records one confirmed use of `phrase`, returning its new frequency.
    ///
    /// Walks the tree creating one node per character, marks the final node
    /// terminal, and increments its cached frequency. Empty input is a no-op
    /// and returns `None`.
    pub fn insert_or_increment(&mut self, phrase: &str) -> Option<u64> {
        if phrase.is_empty() {
            return None;
        }

        let node = self.root.walk_or_create(phrase);
        let newly_terminal = !node.terminal;
        node.terminal = true;
        node.frequency += 1;
        node.phrase = Some(phrase.to_owned());
        let frequency = node.frequency;

        if newly_terminal {
            self.phrase_count += 1;
        }
        Some(frequency)
    }

    /// Sets `phrase` to exactly `frequency`, without implying a use event.
    ///
    /// Used when loading persisted records or applying a winning remote
    /// value during merge: the frequency is overwritten, not summed. Empty
    /// input is a no-op.
    pub fn restore(&mut self, phrase: &str, frequency: u64) {
        if phrase.is_empty() {
            return;
        }

        let node = self.root.walk_or_create(phrase);
        let newly_terminal = !node.terminal;
        node.terminal = true;
        node.frequency = frequency;
        node.phrase = Some(phrase.to_owned());

        if newly_terminal {
            self.phrase_count += 1;
        }
    }

    /// Returns every phrase starting with `prefix`, highest frequency first.
    ///
    /// An unknown prefix yields an empty vector; absence of matches is a
    /// normal outcome, not an error. The empty prefix matches the whole
    /// corpus. Equal frequencies order lexicographically.
    #[must_use]
    pub fn suggest(&self, prefix: &str) -> Vec<Suggestion> {
        let Some(node) = self.root.walk(prefix) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        Self::collect(node, &mut results);
        // Depth-first order over BTreeMap children is lexicographic, so the
        // stable sort leaves ties in lexicographic order.
        results.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        results
    }

    /// Returns the single highest-frequency phrase starting with `prefix`.
    ///
    /// Equivalent to `suggest(prefix).into_iter().next()` but computed in
    /// one traversal without materializing or sorting the candidate list.
    #[must_use]
    pub fn best_match(&self, prefix: &str) -> Option<Suggestion> {
        let node = self.root.walk(prefix)?;
        Self::best_in_subtree(node).map(|(text, frequency)| Suggestion {
            text: text.clone(),
            frequency,
        })
    }

    /// Returns the current frequency of `phrase`, if present.
    #[must_use]
    pub fn frequency(&self, phrase: &str) -> Option<u64> {
        let node = self.root.walk(phrase)?;
        node.terminal.then_some(node.frequency)
    }

    /// Resets the tree and restores every entry from `entries`.
    ///
    /// This is the load path: frequencies are set, not incremented, so
    /// rebuilding from [`PrefixIndex::export_flat`] output reproduces the
    /// index exactly.
    pub fn rebuild_from<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Suggestion>,
    {
        self.clear();
        for entry in entries {
            self.restore(&entry.text, entry.frequency);
        }
    }

    /// Returns every phrase in the index with its frequency.
    ///
    /// Entries come out in lexicographic order of phrase text.
    #[must_use]
    pub fn export_flat(&self) -> Vec<Suggestion> {
        let mut results = Vec::new();
        Self::collect(&self.root, &mut results);
        results
    }

    fn collect(node: &IndexNode, results: &mut Vec<Suggestion>) {
        if node.terminal {
            if let Some(phrase) = &node.phrase {
                results.push(Suggestion {
                    text: phrase.clone(),
                    frequency: node.frequency,
                });
            }
        }
        for child in node.children.values() {
            Self::collect(child, results);
        }
    }

    /// Finds the best candidate under `node` without building a list.
    ///
    /// Traversal visits a node before its children and children in
    /// lexicographic order, and replacement requires a strictly higher
    /// frequency, so ties keep the lexicographically smallest phrase,
    /// the same order `suggest` produces.
    fn best_in_subtree(node: &IndexNode) -> Option<(&String, u64)> {
        let mut best = match &node.phrase {
            Some(phrase) if node.terminal => Some((phrase, node.frequency)),
            _ => None,
        };

        for child in node.children.values() {
            if let Some((text, frequency)) = Self::best_in_subtree(child) {
                let replaces = match best {
                    Some((_, best_frequency)) => frequency > best_frequency,
                    None => true,
                };
                if replaces {
                    best = Some((text, frequency));
                }
            }
        }
        best
    }
}
