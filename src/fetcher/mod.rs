pub mod http_fetcher;
pub mod parallel;
pub mod resolver;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::app::{QuietError, Result};

#[async_trait]
pub trait Fetcher {
    /// Issue one GET for `url` and return the body of a 200 response.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetch `url` and decode the body as JSON.
pub async fn fetch_json<T, F>(fetcher: &F, url: &str) -> Result<T>
where
    T: DeserializeOwned,
    F: Fetcher + ?Sized,
{
    let body = fetcher.fetch(url).await?;
    serde_json::from_slice(&body).map_err(|source| QuietError::Decode {
        url: url.to_string(),
        source,
    })
}
