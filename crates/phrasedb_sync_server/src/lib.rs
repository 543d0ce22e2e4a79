//! # PhraseDB Sync Server
//!
//! Reference implementation of the remote sync authority.
//!
//! This crate provides:
//! - [`ServerStore`], the per-user last-write-wins record table
//! - [`RequestHandler`], request validation and the push-then-pull exchange
//! - [`SyncServer`], the transport-agnostic facade
//!
//! # Protocol
//!
//! The server is the eventual arbiter of truth for conflicting updates. An
//! incoming change overwrites a stored item only when its `updatedAt` is
//! strictly greater than the stored one. Clients apply the same comparison
//! during smart merge, so both sides converge on identical state from the
//! same inputs.
//!
//! The facade is deliberately transport-agnostic: a deployment exposes HTTP
//! endpoints (or any other wire) that decode payloads and call
//! [`SyncServer::handle_sync`] / [`SyncServer::handle_full_download`].
//! Integration tests drive it in-process the same way.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod handler;
mod server;
mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use server::SyncServer;
pub use store::ServerStore;
