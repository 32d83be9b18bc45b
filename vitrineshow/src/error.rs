//! Error types for the showcase engine

/// Result type alias for showcase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, caching or preloading showcase data
///
/// None of these ever escape [`crate::DataSource::load`] or
/// [`crate::Preloader::preload`]: those boundaries turn them into "no data"
/// or a failed-image count.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API returned status {0}")]
    Status(u16),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Snapshot store error
    #[error("Cache error: {0}")]
    Cache(#[from] anyhow::Error),
}
