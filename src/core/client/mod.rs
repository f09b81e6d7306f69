//! Public client surface + builder.
//! Constants (UA + default endpoint) live in `constants`.

mod constants;

use crate::core::PskError;
use crate::core::cache::{CacheStore, DEFAULT_CACHE_DURATION, DiskStore, is_fresh};
use crate::core::transport::{ReqwestTransport, Transport};
use crate::query::QueryBuilder;
use constants::{DEFAULT_BASE_URL, USER_AGENT};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use url::Url;

/// Defines how a single query interacts with the response cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Serve a fresh cached entry if present; otherwise fetch from the network and write the
    /// response to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, skipping any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and neither read from nor write to the cache.
    Bypass,
}

#[derive(Debug)]
struct ResponseCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

/// Client for the PSK Reporter retrieval service.
///
/// Cloning is cheap: the transport and the cache are shared.
#[derive(Debug, Clone)]
pub struct PskClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    cache: Option<Arc<ResponseCache>>,
}

impl Default for PskClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl PskClient {
    /// Create a new builder.
    pub fn builder() -> PskClientBuilder {
        PskClientBuilder::default()
    }

    /// Start a query against this client.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(self)
    }

    /// The endpoint queries are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Freshness window of the cache, if caching is enabled.
    pub fn cache_duration(&self) -> Option<Duration> {
        self.cache.as_ref().map(|c| c.ttl)
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Returns the cached body for `key` if one exists and is still fresh.
    /// Store errors count as a miss.
    pub(crate) fn cache_get(&self, key: &str) -> Option<Vec<u8>> {
        let cache = self.cache.as_ref()?;
        let entry = match cache.store.load(key) {
            Ok(entry) => entry?,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key, error = %_e, "cache read failed, treating as miss");
                return None;
            }
        };
        if is_fresh(entry.written, SystemTime::now(), cache.ttl) {
            Some(entry.body)
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(key, "cache entry expired");
            None
        }
    }

    /// Best-effort write; failures are logged and otherwise ignored.
    pub(crate) fn cache_put(&self, key: &str, body: &[u8]) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(_e) = cache.store.store(key, body) {
            #[cfg(feature = "tracing")]
            tracing::warn!(key, error = %_e, "failed to write cache entry");
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct PskClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    transport: Option<Arc<dyn Transport>>,
    http: Option<reqwest::Client>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,

    cache_dir: Option<PathBuf>,
    cache_store: Option<Arc<dyn CacheStore>>,
    cache_duration: Option<Duration>,
}

impl PskClientBuilder {
    /// Override the User-Agent of the default HTTP client.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the query endpoint (e.g., `https://retrieve.pskreporter.info/query`).
    ///
    /// Any query pairs already on the URL are kept and sent with every request.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Use a custom [`Transport`] for all requests.
    ///
    /// Takes precedence over [`http_client`](Self::http_client) and the timeout settings.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use an existing `reqwest` client instead of building one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable on-disk caching in `dir`.
    /// If neither this nor [`cache_store`](Self::cache_store) is set, caching is disabled.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Enable caching with a custom store. Takes precedence over [`cache_dir`](Self::cache_dir).
    pub fn cache_store(mut self, store: impl CacheStore + 'static) -> Self {
        self.cache_store = Some(Arc::new(store));
        self
    }

    /// How long a cached response is served before it is fetched again. Default: 280s.
    pub fn cache_duration(mut self, dur: Duration) -> Self {
        self.cache_duration = Some(dur);
        self
    }

    pub fn build(self) -> Result<PskClient, PskError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let transport: Arc<dyn Transport> = match (self.transport, self.http) {
            (Some(t), _) => t,
            (None, Some(http)) => Arc::new(ReqwestTransport::new(http)),
            (None, None) => {
                let mut httpb = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

                if let Some(t) = self.timeout {
                    httpb = httpb.timeout(t);
                }
                if let Some(ct) = self.connect_timeout {
                    httpb = httpb.connect_timeout(ct);
                }

                Arc::new(ReqwestTransport::new(httpb.build().map_err(PskError::Client)?))
            }
        };

        let store: Option<Arc<dyn CacheStore>> = self.cache_store.or_else(|| {
            self.cache_dir
                .map(|dir| Arc::new(DiskStore::new(dir)) as Arc<dyn CacheStore>)
        });

        Ok(PskClient {
            transport,
            base_url,
            cache: store.map(|store| {
                Arc::new(ResponseCache {
                    store,
                    ttl: self.cache_duration.unwrap_or(DEFAULT_CACHE_DURATION),
                })
            }),
        })
    }
}
