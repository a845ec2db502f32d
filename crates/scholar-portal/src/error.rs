//! Error types for the research-portal fetch client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Terminal failures of a single `fetch_json` call.
///
/// Every variant ends the call; retries have already been spent where the
/// failure kind allows them.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Still rate limited (429) after the retry budget ran out.
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded {
        /// Total attempts made, including the first one
        attempts: u32,
    },

    /// Still forbidden (403) after the retry budget ran out.
    #[error(
        "Access forbidden after {attempts} attempts; check the API credentials and permissions"
    )]
    AccessForbidden {
        /// Total attempts made, including the first one
        attempts: u32,
    },

    /// Non-retryable HTTP status, or a success status whose body is not JSON.
    #[error("HTTP error ({status}): {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// Transport failure (DNS, connection refused, timeout, TLS, ...)
    #[error("Network error: {cause}")]
    Network {
        /// Underlying transport error
        #[source]
        cause: reqwest::Error,
    },
}

impl FetchError {
    /// Create an HTTP status error.
    #[must_use]
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http { status, body: body.into() }
    }

    /// Returns true if the server answered with a status that is retried
    /// before becoming terminal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. } | Self::AccessForbidden { .. })
    }

    /// HTTP status associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimitExceeded { .. } => Some(429),
            Self::AccessForbidden { .. } => Some(403),
            Self::Http { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }

    /// Convert to a message suitable for showing on a portal page.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::RateLimitExceeded { .. } => {
                "The data provider is rate limiting requests. Please try again in a minute."
                    .to_string()
            }
            Self::AccessForbidden { .. } => {
                "Access to the data provider was denied. Please check the API key and its permissions."
                    .to_string()
            }
            Self::Http { status: 404, .. } => "The requested record was not found.".to_string(),
            Self::Http { status, .. } => format!("The data provider returned an error ({status})."),
            Self::Network { .. } => {
                "Could not reach the data provider. Please check your connection and retry."
                    .to_string()
            }
        }
    }
}

/// Errors from typed access on top of `fetch_json`.
#[derive(thiserror::Error, Debug)]
pub enum PortalError {
    /// Error from the fetch layer
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// JSON body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for typed portal operations.
pub type PortalResult<T> = Result<T, PortalError>;
