//! # PhraseDB Index
//!
//! The ranked prefix index: an in-memory trie mapping character sequences
//! to completion candidates, ordered by usage frequency.
//!
//! This crate provides:
//! - Insertion with frequency increment (`insert_or_increment`)
//! - Frequency restore for rebuilds from persisted state (`restore`)
//! - Ranked prefix lookup (`suggest`) and single-candidate lookup
//!   (`best_match`)
//! - Bulk rebuild from a flat record list (`rebuild_from`)
//! - Flat export for serialization (`export_flat`)
//!
//! The index is a derived view: the durable source of truth is the replica
//! store, and the tree must always be reconstructible from a full scan of a
//! user's records. Lookups are bounded by phrase length, not corpus size.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod index;
mod node;

pub use index::{PrefixIndex, Suggestion};
