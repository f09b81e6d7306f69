mod api;
mod model;
mod params;
mod wire;

pub use model::{ActiveCallsign, ActiveReceiver, QueryResponse, ReceptionReport, SenderSearch};
pub use params::{MAX_FLOW_START_AGE_SECS, ParameterSet, QueryOption};

use url::Url;

use crate::core::{CacheMode, PskClient, PskError, ValidationError};

/// Runs a query built from `options` in one call.
///
/// # Errors
///
/// Returns `PskError::Validation` if the options are inconsistent, and any error
/// [`QueryBuilder::fetch`] can return.
pub async fn query<I>(client: &PskClient, options: I) -> Result<QueryResponse, PskError>
where
    I: IntoIterator<Item = QueryOption>,
{
    QueryBuilder::new(client).options(options).fetch().await
}

/// A builder for a reception report query.
///
/// Setters record options in call order. Nothing is validated until the options are applied
/// by [`params`](Self::params), [`url`](Self::url) or [`fetch`](Self::fetch), at which point
/// the first invalid option aborts the query.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    client: PskClient,
    options: Vec<QueryOption>,
    cache_mode: CacheMode,
}

impl QueryBuilder {
    /// Creates an empty query against `client`.
    pub fn new(client: &PskClient) -> Self {
        Self {
            client: client.clone(),
            options: Vec::new(),
            cache_mode: CacheMode::Use,
        }
    }

    /// Sets the cache mode for this specific query.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Appends a raw option.
    #[must_use]
    pub fn option(mut self, opt: QueryOption) -> Self {
        self.options.push(opt);
        self
    }

    /// Appends several raw options, keeping their order.
    #[must_use]
    pub fn options(mut self, opts: impl IntoIterator<Item = QueryOption>) -> Self {
        self.options.extend(opts);
        self
    }

    /// Reports sent by `callsign`. Mutually exclusive with
    /// [`receiver_callsign`](Self::receiver_callsign) and [`callsign`](Self::callsign).
    #[must_use]
    pub fn sender_callsign(self, callsign: impl Into<String>) -> Self {
        self.option(QueryOption::SenderCallsign(callsign.into()))
    }

    /// Reports received by `callsign`. Mutually exclusive with
    /// [`sender_callsign`](Self::sender_callsign) and [`callsign`](Self::callsign).
    #[must_use]
    pub fn receiver_callsign(self, callsign: impl Into<String>) -> Self {
        self.option(QueryOption::ReceiverCallsign(callsign.into()))
    }

    /// Reports where `callsign` is either the sender or the receiver.
    #[must_use]
    pub fn callsign(self, callsign: impl Into<String>) -> Self {
        self.option(QueryOption::Callsign(callsign.into()))
    }

    /// Restricts reports to one mode, e.g. `"FT8"`.
    #[must_use]
    pub fn mode(self, mode: impl Into<String>) -> Self {
        self.option(QueryOption::Mode(mode.into()))
    }

    /// Limits the number of reports returned.
    #[must_use]
    pub fn report_limit(self, limit: u32) -> Self {
        self.option(QueryOption::ReportLimit(limit))
    }

    /// How far back to look, as a negative number of seconds. Must be within `-86400..=0`.
    #[must_use]
    pub fn flow_start_seconds(self, secs: i64) -> Self {
        self.option(QueryOption::FlowStartSeconds(secs))
    }

    /// Contact e-mail in case the service operators want to get in touch.
    #[must_use]
    pub fn app_contact(self, email: impl Into<String>) -> Self {
        self.option(QueryOption::AppContact(email.into()))
    }

    /// Restricts reports to `lower..=upper` Hz, e.g. `14_000_000, 14_100_000`.
    #[must_use]
    pub fn frequency_range(self, lower: u64, upper: u64) -> Self {
        self.option(QueryOption::FrequencyRange { lower, upper })
    }

    /// Only return reports after this cursor (from a previous [`QueryResponse::last_sequence_number`]).
    #[must_use]
    pub fn last_sequence_number(self, seqno: impl Into<String>) -> Self {
        self.option(QueryOption::LastSequenceNumber(seqno.into()))
    }

    #[must_use]
    pub fn no_active(self, yes: bool) -> Self {
        self.option(QueryOption::NoActive(yes))
    }

    #[must_use]
    pub fn no_locator(self, yes: bool) -> Self {
        self.option(QueryOption::NoLocator(yes))
    }

    #[must_use]
    pub fn reception_reports_only(self, yes: bool) -> Self {
        self.option(QueryOption::ReceptionReportsOnly(yes))
    }

    #[must_use]
    pub fn statistics(self, yes: bool) -> Self {
        self.option(QueryOption::Statistics(yes))
    }

    /// Applies the recorded options on top of the base URL's own query parameters.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` hit while applying options in order.
    pub fn params(&self) -> Result<ParameterSet, ValidationError> {
        ParameterSet::from_url(self.client.base_url()).with_options(&self.options)
    }

    /// The full request URL this query would be sent to.
    ///
    /// # Errors
    ///
    /// Returns `PskError::Validation` if the options are inconsistent.
    pub fn url(&self) -> Result<Url, PskError> {
        let params = self.params()?;
        Ok(api::request_url(&self.client, &params.encode()))
    }

    /// Executes the query, consulting the client's cache first when enabled.
    ///
    /// # Errors
    ///
    /// - `PskError::Validation` if the options are inconsistent (no I/O is attempted).
    /// - `PskError::Transport` if the HTTP exchange fails.
    /// - `PskError::Status` if the service answers with anything but `200 OK`.
    /// - `PskError::Malformed` if the body is not a reception report document.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(base = %self.client.base_url())))]
    pub async fn fetch(self) -> Result<QueryResponse, PskError> {
        let params = self.params()?;
        api::fetch_reports(&self.client, &params, self.cache_mode).await
    }
}
