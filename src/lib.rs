//! pskreporter-rs: a client for the PSK Reporter reception report service.
//!
//! Build a query with [`QueryBuilder`], fetch it through a [`PskClient`], and get back the
//! decoded [`QueryResponse`]. Responses can be cached on disk so that polling the same query
//! more often than the service refreshes does not hit the network.
//!
//! ```no_run
//! # async fn run() -> Result<(), pskreporter::PskError> {
//! use pskreporter::PskClient;
//!
//! let client = PskClient::builder().cache_dir("/tmp/pskreporter").build()?;
//! let resp = client
//!     .query()
//!     .sender_callsign("AG6K")
//!     .flow_start_seconds(-1800)
//!     .fetch()
//!     .await?;
//! println!("heard by {} stations", resp.reception_reports.len());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod query;

pub use crate::core::{
    CacheMode, CacheStore, DiskStore, HttpResponse, MemoryStore, PskClient, PskClientBuilder,
    PskError, ReqwestTransport, Transport, TransportError, ValidationError,
};
pub use query::{
    ActiveCallsign, ActiveReceiver, ParameterSet, QueryBuilder, QueryOption, QueryResponse,
    ReceptionReport, SenderSearch, query,
};
