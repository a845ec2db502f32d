//! Configuration for the research-portal fetch client.

use std::time::Duration;

use crate::request::FetchRequest;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// OpenAlex scholarly graph API.
    pub const OPENALEX_API: &str = "https://api.openalex.org";

    /// DSpace institutional repository REST API.
    pub const DSPACE_API: &str = "https://repository.example.edu/server/api";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Additional attempts after the first one.
    pub const MAX_RETRIES: u32 = 3;

    /// First backoff delay.
    pub const INITIAL_BACKOFF: Duration = Duration::from_millis(300);

    /// Upper bound for any computed backoff delay.
    pub const MAX_BACKOFF: Duration = Duration::from_millis(60_000);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// User agent prefix sent with every request.
    pub const USER_AGENT: &str = concat!("scholar-portal/", env!("CARGO_PKG_VERSION"));
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent as a bearer token (optional).
    pub api_key: Option<String>,

    /// Contact address for the OpenAlex polite pool (optional).
    pub mailto: Option<String>,

    /// Base URL that relative request URLs are resolved against.
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Default retry budget for requests built with [`Config::default_request`].
    pub max_retries: u32,

    /// Default first backoff delay.
    pub initial_backoff: Duration,

    /// Default backoff cap.
    pub max_backoff: Duration,

    /// Maximum number of cached responses. `None` keeps every response.
    pub cache_max_size: Option<u64>,
}

impl Config {
    /// Create a configuration against the public OpenAlex API.
    #[must_use]
    pub fn new(api_key: Option<String>, mailto: Option<String>) -> Self {
        Self {
            api_key,
            mailto,
            base_url: api::OPENALEX_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            initial_backoff: api::INITIAL_BACKOFF,
            max_backoff: api::MAX_BACKOFF,
            cache_max_size: None,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            mailto: None,
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: api::MAX_RETRIES,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(8),
            cache_max_size: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PORTAL_API_BASE_URL`, `OPENALEX_API_KEY`, `OPENALEX_MAILTO`
    /// and `PORTAL_CACHE_MAX_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns error if `PORTAL_CACHE_MAX_SIZE` is not an integer.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENALEX_API_KEY").ok();
        let mailto = std::env::var("OPENALEX_MAILTO").ok();
        let mut config = Self::new(api_key, mailto);

        if let Ok(base_url) = std::env::var("PORTAL_API_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(size) = std::env::var("PORTAL_CACHE_MAX_SIZE") {
            let size: u64 = size.trim().parse().map_err(|e| {
                anyhow::anyhow!("PORTAL_CACHE_MAX_SIZE must be an integer: {e}")
            })?;
            config.cache_max_size = Some(size);
        }

        Ok(config)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// User agent string, including the polite-pool contact when present.
    #[must_use]
    pub fn user_agent(&self) -> String {
        match &self.mailto {
            Some(mailto) => format!("{} (mailto:{mailto})", api::USER_AGENT),
            None => api::USER_AGENT.to_string(),
        }
    }

    /// A request for `url` carrying this configuration's retry policy.
    #[must_use]
    pub fn default_request(&self, url: impl Into<String>) -> FetchRequest {
        FetchRequest::new(url)
            .max_retries(self.max_retries)
            .initial_backoff(self.initial_backoff)
            .max_backoff(self.max_backoff)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}
