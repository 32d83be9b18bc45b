mod renderer;

use anyhow::Result;
use renderer::TracingRenderer;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vitrinecache::DiskCache;
use vitrineconfig::Config;
use vitrineshow::{
    DataSource, HttpImageLoader, Loaded, Origin, Preloader, RotationEngine, ShowcaseClient,
    StartupParams, VitrineConfigExt,
};

/// `RUST_LOG` wins over `host.logger.min_level`
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config
            .get_log_min_level()
            .unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(level.to_lowercase())
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Lets a running background refresh write its snapshot before exiting
async fn finish_refresh(refresh: Option<JoinHandle<bool>>) {
    if let Some(handle) = refresh {
        match handle.await {
            Ok(true) => info!("💾 Snapshot refreshed for next start"),
            Ok(false) => warn!("⚠️ Background refresh failed, snapshot kept"),
            Err(e) => warn!("⚠️ Background refresh aborted: {}", e),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ========== PHASE 1 : Configuration ==========
    let config = Arc::new(Config::load_config("")?);
    init_logging(&config);
    info!("📂 Configuration loaded from {}", config.directory().display());

    let arg = std::env::args().nth(1);
    let params = StartupParams::from_arg(arg.as_deref(), &config.get_default_video_id()?);
    info!("🎬 Video: {} (default: {})", params.video_id, params.is_default);

    let style = config.get_slide_style()?;
    let timing = config.get_rotation_timing()?;
    let timeout = config.get_api_timeout()?;

    // ========== PHASE 2 : Sources ==========
    let client = ShowcaseClient::builder()
        .base_url(config.get_api_base_url()?)
        .timeout(timeout)
        .build()
        .await?;
    info!("🌐 API endpoint: {}", client.base_url());
    let images = HttpImageLoader::new(client.http_client().clone()).timeout(timeout);

    let cache = Arc::new(DiskCache::new(config.get_cache_dir()?)?);
    let source = DataSource::new(Arc::new(client), cache, config.get_cache_namespace()?);

    let Some(Loaded {
        showcase,
        origin,
        refresh,
    }) = source.load(&params.video_id).await
    else {
        warn!("⚠️ No cached snapshot and the API is unreachable, nothing to display");
        return Ok(());
    };

    match origin {
        Origin::Cache => info!("⚡ Showing cached snapshot"),
        Origin::Network => info!("🌐 Showing fresh data"),
    }

    let Some(showcase) = showcase else {
        warn!("⚠️ API answer carries no product list");
        finish_refresh(refresh).await;
        return Ok(());
    };

    // ========== PHASE 3 : Rotation ==========
    info!(
        "🔁 {} product(s), style {}",
        showcase.items.len(),
        style.name
    );
    let preloader = Preloader::new(Arc::new(images));
    let mut engine = RotationEngine::new(preloader, TracingRenderer::new(), style, timing);

    tokio::select! {
        _ = engine.run(&showcase) => {
            finish_refresh(refresh).await;
        }
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("🛑 Interrupted after {} slide(s)", engine.renderer().slides());
        }
    }

    Ok(())
}
