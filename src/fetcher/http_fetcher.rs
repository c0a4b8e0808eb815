use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::app::{QuietError, Result};
use crate::fetcher::Fetcher;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("quiethn/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuietError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let network = |source| QuietError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;

        let status = response.status();
        if status != StatusCode::OK {
            // Dropping the response releases the connection without reading the body.
            return Err(QuietError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network)?.to_vec();
        Ok(body)
    }
}
