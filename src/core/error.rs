use thiserror::Error;

use crate::core::transport::TransportError;

/// A query option was rejected before any I/O took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// More than one of `callsign`, `senderCallsign` or `receiverCallsign` was set.
    #[error("only one of callsign, senderCallsign, or receiverCallsign can be specified at a time")]
    ExclusivityViolation,

    /// `flowStartSeconds` must be zero or negative.
    #[error("flowStartSeconds must be negative (got {0})")]
    FlowStartPositive(i64),

    /// `flowStartSeconds` cannot reach further back than 24 hours.
    #[error("flowStartSeconds cannot be greater than 24 hours (got {0})")]
    FlowStartTooOld(i64),

    /// The lower bound of a frequency range was above the upper bound.
    #[error("lower frequency {lower} must not exceed upper frequency {upper}")]
    FrequencyRangeInverted {
        /// Lower bound in Hz.
        lower: u64,
        /// Upper bound in Hz.
        upper: u64,
    },
}

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum PskError {
    /// The query options were invalid.
    #[error("invalid query: {0}")]
    Validation(#[from] ValidationError),

    /// The HTTP exchange itself failed (connection refused, timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The server answered with something other than `200 OK`.
    #[error("unexpected http response {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The body could not be decoded as a reception report document.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The default HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
