//! The HTTP collaborator used by the fetcher.
//!
//! The fetcher only needs "GET this URL, hand back status and body". Anything that can do
//! that implements [`Transport`]; [`ReqwestTransport`] is the default used by
//! [`PskClient`](crate::PskClient).

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use url::Url;

/// Error produced by a [`Transport`]. Surfaced unchanged as [`PskError::Transport`](crate::PskError::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by [`Transport::get`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// Status code and fully-read body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The raw response body.
    pub body: Vec<u8>,
}

/// Issues a single HTTP GET request.
///
/// Implementations should return `Err` only for transport-level failures. A response with an
/// error status is still an `Ok(HttpResponse)`; the caller decides what a status means.
pub trait Transport: Send + Sync + Debug {
    /// Fetches `url` and returns its status and body.
    fn get<'a>(&'a self, url: &'a Url) -> TransportFuture<'a>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing `reqwest` client. Timeouts, proxies and TLS settings are taken from it.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn fetch(&self, url: &Url) -> Result<HttpResponse, reqwest::Error> {
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a Url) -> TransportFuture<'a> {
        Box::pin(async move {
            self.fetch(url)
                .await
                .map_err(|e| Box::new(e) as TransportError)
        })
    }
}
