//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without trailing slash. Endpoint paths are appended to it.
    pub base_url: String,
    pub poll_interval: Duration,
    pub timeouts: Timeouts,
    /// Where to persist the session. `None` keeps it in memory only.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// - `FESUP_BASE_URL`: default `http://127.0.0.1:8080/api`
    /// - `FESUP_POLL_INTERVAL_SECS`: default 5
    /// - `FESUP_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FESUP_CONNECT_TIMEOUT_SECS`: default 10
    /// - `FESUP_SESSION_FILE`: unset means an ephemeral session
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("FESUP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let poll_secs = env_parse("FESUP_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS).max(1);
        let session_file = std::env::var("FESUP_SESSION_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            base_url: normalize_base_url(&base_url),
            poll_interval: Duration::from_secs(poll_secs),
            timeouts: Timeouts {
                request_secs: env_parse("FESUP_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("FESUP_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            session_file,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }
}

#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
