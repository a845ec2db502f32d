//! Retry bookkeeping for one fetch chain.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::request::FetchRequest;

/// Per-call retry state. Lives only as long as one `fetch_json` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RetryState {
    attempts_remaining: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    attempts: u32,
}

impl RetryState {
    pub(crate) fn new(request: &FetchRequest) -> Self {
        Self {
            attempts_remaining: request.retries(),
            current_backoff: request.initial_backoff_duration(),
            max_backoff: request.max_backoff_duration(),
            attempts: 1,
        }
    }

    /// Consume one retry and return how long to wait before it.
    ///
    /// `server_hint` (a parsed `Retry-After`) replaces the computed delay for
    /// this wait only; the backoff still doubles. Returns `None` once the
    /// budget is spent.
    pub(crate) fn next_wait(&mut self, server_hint: Option<Duration>) -> Option<Duration> {
        if self.attempts_remaining == 0 {
            return None;
        }

        let wait = server_hint.unwrap_or(self.current_backoff);
        self.attempts_remaining -= 1;
        self.attempts += 1;
        self.current_backoff = self.current_backoff.saturating_mul(2).min(self.max_backoff);
        Some(wait)
    }

    /// Attempts made so far, the first one included.
    pub(crate) const fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Parse a numeric `Retry-After` header (seconds).
///
/// HTTP-date values are ignored and fall back to the computed backoff.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
