//! HTTP client for the showcase API
//!
//! One endpoint, parameterised by the video identifier:
//! `GET {base_url}?video_id={id}` answering an [`ApiEnvelope`].
//!
//! # Example
//!
//! ```no_run
//! use vitrineshow::ShowcaseClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ShowcaseClient::new().await?;
//!     let envelope = client.fetch_showcase("1763501352257x910439018930896900").await?;
//!     if let Some(showcase) = envelope.into_showcase() {
//!         println!("{} products", showcase.items.len());
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::ApiEnvelope;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default showcase endpoint
pub const DEFAULT_BASE_URL: &str =
    "https://bluemdia.bubbleapps.io/version-test/api/1.1/wf/get_video_data";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "Vitrine/0.1.0 (vitrineshow)";

/// Query parameter carrying the video identifier
pub const VIDEO_ID_PARAM: &str = "video_id";

/// Source of showcase data for a video identifier
#[async_trait]
pub trait ShowcaseFetcher: Send + Sync {
    /// Fetches the current showcase; any transport, status or parse failure
    /// is an error
    async fn fetch(&self, video_id: &str) -> Result<ApiEnvelope>;
}

/// Showcase API HTTP client
///
/// Stateless: caching is the job of [`crate::DataSource`].
#[derive(Debug, Clone)]
pub struct ShowcaseClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ShowcaseClient {
    /// Create a new client with default settings
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Full endpoint URL for `video_id`
    pub fn endpoint(&self, video_id: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.base_url,
            &[(VIDEO_ID_PARAM, video_id)],
        )?)
    }

    /// Fetches and parses the showcase for `video_id`
    pub async fn fetch_showcase(&self, video_id: &str) -> Result<ApiEnvelope> {
        let url = self.endpoint(video_id)?;
        debug!(url = %url, "Fetching showcase");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ShowcaseFetcher for ShowcaseClient {
    async fn fetch(&self, video_id: &str) -> Result<ApiEnvelope> {
        self.fetch_showcase(video_id).await
    }
}

/// Builder for configuring a ShowcaseClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the endpoint URL (without query string)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<ShowcaseClient> {
        // Reject a malformed endpoint up front rather than on every fetch
        Url::parse(&self.base_url)?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        Ok(ShowcaseClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}
