//! Core components of the `pskreporter` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`PskClient`] and its builder.
//! - The error types ([`PskError`], [`ValidationError`]).
//! - The HTTP [`Transport`] seam and the response [`CacheStore`]s.

/// Look-aside response cache: keys, freshness and stores.
pub mod cache;
/// The main client (`PskClient`), builder, and configuration.
pub mod client;
/// Error types for the crate.
pub mod error;
/// The HTTP collaborator abstraction and its `reqwest` implementation.
pub mod transport;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::PskClient`
pub use cache::{CacheStore, CachedBody, DiskStore, MemoryStore};
pub use client::{CacheMode, PskClient, PskClientBuilder};
pub use error::{PskError, ValidationError};
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
