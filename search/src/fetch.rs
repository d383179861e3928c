//! Photo content retrieval.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

/// Fetch timeout per photo.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching photo content.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("fetch: HTTP {0}")]
    Status(u16),

    #[error("fetch: {0}")]
    Http(#[from] reqwest::Error),
}

/// Retrieves photo content by locator.
///
/// Matchers treat a fetch failure as "no match" for that candidate;
/// implementations just report it.
#[async_trait::async_trait]
pub trait PhotoFetcher: Send + Sync {
    /// Fetch the raw bytes behind `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// HTTP photo fetcher backed by a shared reqwest connection pool.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PhotoFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?)
    }
}
