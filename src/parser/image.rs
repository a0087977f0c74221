//! Remote image retrieval for slide markup.

use crate::error::{Error, Result};
use std::time::Duration;

/// Source of remote image bytes.
///
/// The slide mapper only talks to this trait, so callers decide whether
/// images come from the network, a cache, or nowhere at all.
pub trait ImageFetcher: Send + Sync {
    /// Download the image at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetcher that refuses every request. Remote images are then omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl ImageFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(Error::ImageFetch(format!("remote images disabled: {}", url)))
    }
}

/// Blocking HTTP fetcher with a per-request timeout.
#[cfg(feature = "remote-images")]
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote-images")]
impl HttpImageFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "remote-images")]
impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Fetching image {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// The fetcher used when the caller does not supply one.
///
/// Performs real downloads when the `remote-images` feature is enabled and
/// falls back to [`OfflineFetcher`] otherwise.
pub fn default_fetcher(timeout: Duration) -> Box<dyn ImageFetcher> {
    #[cfg(feature = "remote-images")]
    {
        match HttpImageFetcher::new(timeout) {
            Ok(fetcher) => return Box::new(fetcher),
            Err(e) => log::warn!("HTTP client unavailable, remote images disabled: {}", e),
        }
    }
    #[cfg(not(feature = "remote-images"))]
    let _ = timeout;
    Box::new(OfflineFetcher)
}
