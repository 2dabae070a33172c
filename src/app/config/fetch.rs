//! Outbound HTTP settings shared by every rate source.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Per-fetch limits and request identification headers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound for one fetch, including extraction.
    pub timeout_secs: u64,
    /// Upper bound for establishing a connection.
    pub connect_timeout_secs: u64,
    /// Sent as `User-Agent`; page sources reject anonymous clients.
    pub user_agent: String,
    /// Sent as `Accept-Language`.
    pub accept_language: String,
}

impl FetchConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.into(),
            accept_language: "en-US,en;q=0.9,ru;q=0.8".into(),
        }
    }
}
