//! Resilient JSON fetch client.
//!
//! Provides async HTTP GET with:
//! - Connection pooling via reqwest
//! - Bounded retry with exponential backoff on 429, 403 and transport failures
//! - `Retry-After` awareness for rate-limited responses
//! - Memoization of successful responses for the lifetime of the client

mod cache;
mod retry;

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub use cache::ResponseCache;

use crate::config::{Config, api};
use crate::error::{FetchError, FetchResult, PortalResult};
use crate::models::ListPage;
use crate::request::FetchRequest;
use retry::{RetryState, parse_retry_after};

/// Research-portal API client.
///
/// Clones share the connection pool and the response cache.
#[derive(Clone)]
pub struct PortalClient {
    /// Pooled HTTP client.
    http: Client,

    /// Response cache.
    cache: ResponseCache,

    /// Base URL for relative request URLs, always ending in `/`.
    base_url: Url,

    /// Whether an API key is sent.
    has_api_key: bool,
}

/// Outcome of one attempt that may still lead to a retry.
enum Attempt {
    Success(Value),
    RateLimited(Option<Duration>),
    Forbidden,
    Transport(reqwest::Error),
}

impl PortalClient {
    /// Create a new client with the given configuration and an empty cache.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(ref key) = config.api_key {
            headers.insert(reqwest::header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        }

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let mut base_url = Url::parse(&config.base_url)
            .with_context(|| format!("invalid base URL: {}", config.base_url))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            cache: ResponseCache::with_capacity(config.cache_max_size),
            base_url,
            has_api_key: config.api_key.is_some(),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// The response cache shared by this client and its clones.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Key under which a successful response to `request` is cached.
    #[must_use]
    pub fn cache_key(&self, request: &FetchRequest) -> String {
        cache::cache_key("GET", &self.resolve(request.url()), request.headers())
    }

    /// Whether `request` would be answered from the cache.
    #[must_use]
    pub fn is_cached(&self, request: &FetchRequest) -> bool {
        self.cache.contains(&self.cache_key(request))
    }

    /// Fetch a JSON document, retrying transient failures.
    ///
    /// Cached responses are returned without network I/O. 429, 403 and
    /// transport failures are retried up to `request.retries()` times with a
    /// doubling backoff; every other non-2xx status fails immediately.
    pub async fn fetch_json(&self, request: &FetchRequest) -> FetchResult<Value> {
        let url = self.resolve(request.url());
        let key = cache::cache_key("GET", &url, request.headers());

        if let Some(cached) = self.cache.get(&key).await {
            debug!(url = %url, "cache hit");
            return Ok(cached);
        }

        let mut retry = RetryState::new(request);

        loop {
            let (wait, reason) = match self.attempt(&url, request.headers()).await? {
                Attempt::Success(value) => {
                    debug!(url = %url, attempts = retry.attempts(), "fetched");
                    self.cache.insert(key, value.clone()).await;
                    return Ok(value);
                }
                Attempt::RateLimited(retry_after) => {
                    let wait = retry.next_wait(retry_after).ok_or_else(|| {
                        FetchError::RateLimitExceeded { attempts: retry.attempts() }
                    })?;
                    (wait, "rate limited")
                }
                Attempt::Forbidden => {
                    self.cache.invalidate(&key).await;
                    let wait = retry.next_wait(None).ok_or_else(|| FetchError::AccessForbidden {
                        attempts: retry.attempts(),
                    })?;
                    (wait, "forbidden")
                }
                Attempt::Transport(cause) => match retry.next_wait(None) {
                    Some(wait) => {
                        debug!(error = %cause, "transport failure");
                        (wait, "transport failure")
                    }
                    None => return Err(FetchError::Network { cause }),
                },
            };

            warn!(
                url = %url,
                reason,
                attempt = retry.attempts(),
                wait_ms = wait.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Fetch and decode a JSON document.
    pub async fn fetch<T>(&self, request: &FetchRequest) -> PortalResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.fetch_json(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch one page of an OpenAlex-shaped list (`meta` + `results`).
    pub async fn fetch_list<T>(&self, request: &FetchRequest) -> PortalResult<ListPage<T>>
    where
        T: DeserializeOwned,
    {
        self.fetch(request).await
    }

    /// Issue one GET and classify the response.
    async fn attempt(&self, url: &str, headers: &BTreeMap<String, String>) -> FetchResult<Attempt> {
        let mut builder = self.http.get(url);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            // Malformed URL or header: retrying cannot help.
            Err(cause) if cause.is_builder() => return Err(FetchError::Network { cause }),
            Err(cause) => return Ok(Attempt::Transport(cause)),
        };

        let status = response.status();

        if status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(cause) => return Ok(Attempt::Transport(cause)),
            };
            return match serde_json::from_str::<Value>(&text) {
                Ok(value) => Ok(Attempt::Success(value)),
                Err(_) => Err(FetchError::http(status.as_u16(), text)),
            };
        }

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                Ok(Attempt::RateLimited(parse_retry_after(response.headers())))
            }
            StatusCode::FORBIDDEN => Ok(Attempt::Forbidden),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(FetchError::http(status.as_u16(), body))
            }
        }
    }

    /// Resolve a request URL against the base URL.
    ///
    /// Absolute URLs pass through. Relative ones, with or without a leading
    /// `/`, land under the base path. Anything unparseable is handed to
    /// reqwest unchanged and fails there.
    fn resolve(&self, url: &str) -> String {
        match Url::parse(url) {
            Ok(absolute) => absolute.into(),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base_url
                .join(url.trim_start_matches('/'))
                .map_or_else(|_| url.to_string(), Into::into),
            Err(_) => url.to_string(),
        }
    }
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.has_api_key)
            .finish()
    }
}
