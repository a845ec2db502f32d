//! Request description for [`PortalClient::fetch_json`](crate::PortalClient::fetch_json).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::api;

/// One logical HTTP GET against a JSON endpoint.
///
/// Header names are stored lower-cased so that `Accept` and `accept` are the
/// same header. The map is ordered, which keeps cache keys stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    headers: BTreeMap<String, String>,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl FetchRequest {
    /// Create a request with the default `Accept: application/json` header
    /// and the default retry policy.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());

        Self {
            url: url.into(),
            headers,
            max_retries: api::MAX_RETRIES,
            initial_backoff: api::INITIAL_BACKOFF,
            max_backoff: api::MAX_BACKOFF,
        }
    }

    /// Add or override a header.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Number of attempts allowed after the first one.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// First backoff delay. Zero is raised to one millisecond.
    #[must_use]
    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay.max(Duration::from_millis(1));
        self.max_backoff = self.max_backoff.max(self.initial_backoff);
        self
    }

    /// Backoff cap. Never lower than the initial backoff.
    #[must_use]
    pub fn max_backoff(mut self, delay: Duration) -> Self {
        self.max_backoff = delay.max(self.initial_backoff);
        self
    }

    /// Endpoint, absolute or relative to the client's base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers, lower-cased names.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub const fn initial_backoff_duration(&self) -> Duration {
        self.initial_backoff
    }

    #[must_use]
    pub const fn max_backoff_duration(&self) -> Duration {
        self.max_backoff
    }
}
