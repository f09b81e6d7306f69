//! Centralized constants for the default endpoint and UA.

/// Identifies this library to the service operators.
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// PSK Reporter retrieval endpoint. Query parameters are appended.
pub(crate) const DEFAULT_BASE_URL: &str = "https://retrieve.pskreporter.info/query";
