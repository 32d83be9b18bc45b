//! Image preloading for slides
//!
//! Before a slide is shown, every image it references is fetched so that
//! the entrance animation never reveals a half-loaded picture. A failed
//! image never blocks or fails the slide.

use crate::error::{Error, Result};
use crate::models::Item;
use async_trait::async_trait;
use bytes::Bytes;
use futures::future::join_all;
use moka::future::Cache as MokaCache;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default number of images kept in memory by [`HttpImageLoader`]
pub const DEFAULT_IMAGE_CACHE_CAPACITY: u64 = 256;

/// Default per-image request timeout
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 30;

/// Source of images for the preloader
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Fetches `url` so that a later display finds it warm
    async fn load(&self, url: &str) -> Result<()>;
}

/// Outcome of preloading one slide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Images requested (0 to 3)
    pub requested: usize,
    /// Images that failed to load
    pub failed: usize,
}

impl PreloadReport {
    pub fn loaded(&self) -> usize {
        self.requested - self.failed
    }
}

/// Waits for all images of a slide
#[derive(Clone)]
pub struct Preloader {
    loader: Arc<dyn ImageLoader>,
}

impl Preloader {
    pub fn new(loader: Arc<dyn ImageLoader>) -> Self {
        Self { loader }
    }

    /// Requests the primary, badge and QR images of `item` concurrently
    ///
    /// Resolves once every request has either succeeded or failed; there is
    /// no timeout at this level. An item without images resolves at once.
    pub async fn preload(&self, item: &Item) -> PreloadReport {
        let urls = item.image_urls();
        if urls.is_empty() {
            return PreloadReport::default();
        }

        let results = join_all(urls.iter().map(|url| self.loader.load(url))).await;

        let mut failed = 0;
        for (url, result) in urls.iter().zip(results) {
            if let Err(e) = result {
                debug!(url = %url, "Image preload failed: {}", e);
                failed += 1;
            }
        }

        PreloadReport {
            requested: urls.len(),
            failed,
        }
    }
}

/// [`ImageLoader`] fetching over HTTP and keeping bytes in memory
///
/// Images already held in memory are not requested again, so after the
/// first pass over a showcase preloading is immediate.
#[derive(Clone)]
pub struct HttpImageLoader {
    client: Client,
    timeout: Duration,
    images: MokaCache<String, Bytes>,
}

impl HttpImageLoader {
    pub fn new(client: Client) -> Self {
        Self::with_capacity(client, DEFAULT_IMAGE_CACHE_CAPACITY)
    }

    pub fn with_capacity(client: Client, max_capacity: u64) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DEFAULT_IMAGE_TIMEOUT_SECS),
            images: MokaCache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Per-request timeout; a request hitting it counts as a failed image
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bytes of a previously loaded image
    pub async fn cached(&self, url: &str) -> Option<Bytes> {
        self.images.get(url).await
    }

    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<()> {
        if self.images.contains_key(url) {
            return Ok(());
        }
        let bytes = self.fetch(url).await?;
        debug!(url = %url, size = bytes.len(), "Image preloaded");
        self.images.insert(url.to_string(), bytes).await;
        Ok(())
    }
}
