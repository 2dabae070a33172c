//! Plain HTTP document fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client as HttpClient;
use tracing::debug;

use crate::app::config::FetchConfig;
use crate::error::{ConfigError, FetchError};
use crate::port::outbound::fetcher::Fetcher;

const ACCEPT_DOCUMENTS: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// [`Fetcher`] over a shared `reqwest` client.
///
/// Every request carries the configured browser-like identification
/// headers. The body is decoded using the charset the server declares, so
/// `windows-1251` feeds come back as proper UTF-8.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user_agent", &config.user_agent)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("accept_language", &config.accept_language)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_DOCUMENTS));

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "fetch",
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            timeout: config.timeout(),
        })
    }

    fn transport_error(&self, err: &reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

fn header_value(field: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "Fetching document");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {status} from {url}")));
        }

        response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))
    }
}
