//! Disk cache for Vitrine JSON snapshots
//!
//! One file per key under the cache directory, holding the JSON document
//! exactly as it was saved. There is no TTL and no versioning: the last
//! write for a key wins.
//!
//! ```rust,no_run
//! use vitrinecache::DiskCache;
//!
//! let cache = DiskCache::new(".vitrine/cache")?;
//! cache.save("horizontal_data_42", &serde_json::json!({"response": null}))?;
//! let snapshot: Option<serde_json::Value> = cache.load("horizontal_data_42")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Disk cache for JSON documents, keyed by string
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    /// Opens (and creates if needed) a cache rooted at `cache_dir`
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();

        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)?;
            info!("Created cache directory: {}", cache_dir.display());
        }

        Ok(Self { cache_dir })
    }

    /// Cache root directory
    pub fn directory(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the file backing `key`
    ///
    /// Format: `{cache_dir}/{key}.json`, with the key percent-encoded so
    /// that distinct keys never share a file and never leave the cache
    /// directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name = urlencoding::encode(key);
        self.cache_dir.join(format!("{}.json", file_name))
    }

    /// Serializes `data` under `key`, replacing any previous entry
    ///
    /// The document is written to a sibling temp file then renamed, so a
    /// reader never observes a half-written snapshot.
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec(data)?;

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!("Saved cache to {}", path.display());

        Ok(())
    }

    /// Reads the raw document stored under `key`
    pub fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Cache file does not exist: {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads and deserializes the document stored under `key`
    ///
    /// Returns `Ok(None)` when nothing is cached, and an error when the
    /// file exists but does not parse as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(json) = self.load_raw(key)? else {
            return Ok(None);
        };
        let data: T = serde_json::from_str(&json)?;
        debug!("Loaded cache for key {}", key);
        Ok(Some(data))
    }

    /// Whether an entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Removes the entry for `key`, if any
    pub fn invalidate(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);

        if path.exists() {
            fs::remove_file(&path)?;
            debug!("Invalidated cache: {}", path.display());
        }

        Ok(())
    }

    /// Number of cached documents
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;

        for entry in fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            if entry.path().extension().and_then(|s| s.to_str()) == Some("json") {
                count += 1;
            }
        }

        Ok(count)
    }
}
