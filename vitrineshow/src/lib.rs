//! Product showcase slideshow engine for Vitrine
//!
//! This crate drives a looping, animated product slideshow from data
//! served by the showcase API and cached on disk.
//!
//! # Features
//!
//! - **Data source**: stale-while-revalidate loading; a cached snapshot is
//!   shown at once while fresh data is fetched for the next start
//! - **Preloading**: the images of a slide are fetched before it enters,
//!   broken images never hold the slideshow back
//! - **Rotation engine**: preload, content swap, entrance, hold and exit
//!   for each product, in order, forever
//! - **Slide styles**: per-element motion presets (`horizontal`, `vertical`)
//! - **Configuration extension**: typed `vitrine.*` settings on
//!   [`vitrineconfig::Config`]
//!
//! The display surface is abstracted by the [`Renderer`] trait.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vitrinecache::DiskCache;
//! use vitrineshow::{
//!     DataSource, HttpImageLoader, Preloader, Renderer, RotationEngine, RotationTiming,
//!     ShowcaseClient, SlideStyle,
//! };
//!
//! async fn show<R: Renderer>(renderer: R) -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ShowcaseClient::new().await?;
//!     let images = HttpImageLoader::new(client.http_client().clone());
//!     let cache = Arc::new(DiskCache::new(".vitrine/cache")?);
//!     let style = SlideStyle::horizontal();
//!
//!     let source = DataSource::new(Arc::new(client), cache, style.cache_namespace());
//!     if let Some(showcase) = source.load("42").await.and_then(|l| l.showcase) {
//!         let preloader = Preloader::new(Arc::new(images));
//!         let mut engine =
//!             RotationEngine::new(preloader, renderer, style, RotationTiming::default());
//!         engine.run(&showcase).await;
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config_ext;
pub mod error;
pub mod format;
pub mod models;
pub mod params;
pub mod preload;
pub mod render;
pub mod rotation;
pub mod source;
pub mod style;

// Re-exports
pub use client::{ClientBuilder, ShowcaseClient, ShowcaseFetcher};
pub use config_ext::VitrineConfigExt;
pub use error::{Error, Result};
pub use format::format_url;
pub use models::{ApiEnvelope, ClientConfig, Item, Showcase, ShowcaseData, TemplateConfig};
pub use params::StartupParams;
pub use preload::{HttpImageLoader, ImageLoader, PreloadReport, Preloader};
pub use render::{Element, Renderer, SlideContent, Transition, VisualState};
pub use rotation::{RotationEngine, RotationTiming};
pub use source::{DataSource, Loaded, Origin};
pub use style::{ElementMotion, SlideStyle};
