//! Showcase data source with a stale-while-revalidate disk cache
//!
//! - Cached snapshot present: it is returned at once and a background task
//!   fetches fresh data and overwrites the snapshot. The refreshed data is
//!   only seen by the next [`DataSource::load`].
//! - No snapshot (or an unreadable one): the network is queried and the
//!   caller waits; a successful answer is written to the cache first.
//!
//! Nothing here fails the caller: every error becomes "no data" plus a
//! warning in the log.

use crate::client::ShowcaseFetcher;
use crate::error::Result;
use crate::models::{ApiEnvelope, Showcase};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vitrinecache::DiskCache;

/// Where the returned data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Network,
}

/// Result of a successful [`DataSource::load`]
#[derive(Debug)]
pub struct Loaded {
    /// Display configuration and items; `None` when the snapshot carries no
    /// `response` or no `produtos`
    pub showcase: Option<Showcase>,
    pub origin: Origin,
    /// Background refresh started on a cache hit; resolves to `true` when
    /// the snapshot was overwritten
    pub refresh: Option<JoinHandle<bool>>,
}

/// Fetch-with-cache-fallback supplier of showcase data
#[derive(Clone)]
pub struct DataSource {
    fetcher: Arc<dyn ShowcaseFetcher>,
    cache: Arc<DiskCache>,
    namespace: String,
}

impl DataSource {
    pub fn new(
        fetcher: Arc<dyn ShowcaseFetcher>,
        cache: Arc<DiskCache>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            namespace: namespace.into(),
        }
    }

    /// Cache key of the snapshot for `video_id`: `{namespace}_{video_id}`
    pub fn cache_key(&self, video_id: &str) -> String {
        format!("{}_{}", self.namespace, video_id)
    }

    pub fn cache(&self) -> &DiskCache {
        &self.cache
    }

    /// Loads showcase data for `video_id`
    ///
    /// Must be called from within a tokio runtime: the cache-hit path
    /// spawns the background refresh. Returns `None` only when there is no
    /// usable snapshot and the network fetch failed.
    pub async fn load(&self, video_id: &str) -> Option<Loaded> {
        if let Some(envelope) = self.read_cached(video_id) {
            info!(video_id, "Using cached showcase, refreshing in background");
            let source = self.clone();
            let id = video_id.to_string();
            let refresh = tokio::spawn(async move { source.refresh(&id).await });

            return Some(Loaded {
                showcase: envelope.into_showcase(),
                origin: Origin::Cache,
                refresh: Some(refresh),
            });
        }

        let envelope = self.fetch(video_id).await?;
        if let Err(e) = self.store(video_id, &envelope) {
            warn!(video_id, "Failed to write showcase snapshot: {}", e);
        }
        info!(video_id, "Showcase loaded from network");
        Some(Loaded {
            showcase: envelope.into_showcase(),
            origin: Origin::Network,
            refresh: None,
        })
    }

    /// Fetches fresh data and overwrites the snapshot
    ///
    /// Returns `true` only when the snapshot on disk was replaced.
    pub async fn refresh(&self, video_id: &str) -> bool {
        let Some(envelope) = self.fetch(video_id).await else {
            return false;
        };
        match self.store(video_id, &envelope) {
            Ok(()) => true,
            Err(e) => {
                warn!(video_id, "Failed to write showcase snapshot: {}", e);
                false
            }
        }
    }

    async fn fetch(&self, video_id: &str) -> Option<ApiEnvelope> {
        match self.fetcher.fetch(video_id).await {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                warn!(video_id, "Showcase fetch failed: {}", e);
                None
            }
        }
    }

    fn store(&self, video_id: &str, envelope: &ApiEnvelope) -> Result<()> {
        let key = self.cache_key(video_id);
        self.cache.save(&key, envelope)?;
        debug!(key = %key, "Showcase snapshot written");
        Ok(())
    }

    /// Reads the snapshot; unreadable or corrupt entries count as absent
    fn read_cached(&self, video_id: &str) -> Option<ApiEnvelope> {
        let key = self.cache_key(video_id);
        match self.cache.load::<ApiEnvelope>(&key) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(key = %key, "Ignoring unreadable showcase snapshot: {}", e);
                None
            }
        }
    }
}
