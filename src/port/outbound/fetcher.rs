//! Document transport port.

use async_trait::async_trait;

use crate::error::FetchError;

/// Retrieves the body of a document by URL.
///
/// Implementations own their transport resources (HTTP connections, a
/// browser process) and release them before `fetch` returns or when the
/// future is dropped. Callers only see the body or a [`FetchError`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its decoded body.
    ///
    /// Non-success statuses and connection failures are
    /// [`FetchError::Transport`]; a transport-level timeout is
    /// [`FetchError::Timeout`].
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
