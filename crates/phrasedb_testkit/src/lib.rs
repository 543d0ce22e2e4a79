//! # PhraseDB Testkit
//!
//! Test utilities for PhraseDB.
//!
//! This crate provides:
//! - Proptest strategies for phrases, timestamps, and deltas
//! - Fixtures for seeding replica stores with scripted records
//!
//! ## Usage
//!
//! ```rust
//! use phrasedb_testkit::prelude::*;
//!
//! let fixture = StoreBuilder::new("alice")
//!     .dirty("typed offline", 2, 100)
//!     .clean("acknowledged", 5, 90);
//! assert_eq!(fixture.store().len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
