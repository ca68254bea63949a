//! Runtime configuration

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MESSAGE_TTL_SECS: u64 = 5;

/// Where the reservation API lives and how the client behaves
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL; `/rooms` and `/bookings` are appended to it
    pub api_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How long notices stay visible
    pub message_ttl: Duration,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(&api_url.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.message_ttl = ttl;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            message_ttl: Duration::from_secs(DEFAULT_MESSAGE_TTL_SECS),
        }
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
