//! Vitrine settings on top of vitrineconfig
//!
//! The [`VitrineConfigExt`] trait adds typed accessors for the `vitrine.*`
//! section of the configuration. Getters persist their default when the
//! key is missing or invalid, so `config.yaml` always shows the values in
//! use.
//!
//! ```no_run
//! use vitrineconfig::Config;
//! use vitrineshow::VitrineConfigExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load_config("")?;
//! let timing = config.get_rotation_timing()?;
//! println!("one pass takes {:?}", timing.slot_budget);
//! # Ok(())
//! # }
//! ```

use crate::client::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::rotation::{
    RotationTiming, DEFAULT_ENTER_MS, DEFAULT_EXIT_MS, DEFAULT_MIN_HOLD_MS,
    DEFAULT_SLOT_BUDGET_MS,
};
use crate::style::SlideStyle;
use anyhow::Result;
use serde_yaml::{Number, Value};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use vitrineconfig::Config;

/// Video identifier used when none is given at startup (local testing)
pub const DEFAULT_VIDEO_ID: &str = "1763501352257x910439018930896900";

/// Default snapshot directory, relative to the config directory
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Typed accessors for the `vitrine.*` configuration section
pub trait VitrineConfigExt {
    // ========================================================================
    // API
    // ========================================================================

    /// Showcase endpoint, without query string
    fn get_api_base_url(&self) -> Result<String>;

    /// HTTP timeout for API and image requests
    fn get_api_timeout(&self) -> Result<Duration>;

    /// Identifier used when the startup parameter is absent
    fn get_default_video_id(&self) -> Result<String>;

    // ========================================================================
    // Cache
    // ========================================================================

    /// Snapshot directory (created if needed)
    fn get_cache_dir(&self) -> Result<PathBuf>;

    /// Cache key prefix; derived from the slide style unless configured
    fn get_cache_namespace(&self) -> Result<String>;

    // ========================================================================
    // Display
    // ========================================================================

    /// Slide style preset; an unknown name falls back to `horizontal`
    fn get_slide_style(&self) -> Result<SlideStyle>;
    fn set_slide_style(&self, name: &str) -> Result<()>;

    /// Rotation timing budget
    fn get_rotation_timing(&self) -> Result<RotationTiming>;
}

fn get_string_or_default(config: &Config, path: &[&str], default: &str) -> Result<String> {
    match config.get_value(path) {
        Ok(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => {
            config.set_value(path, Value::String(default.to_string()))?;
            Ok(default.to_string())
        }
    }
}

fn get_u64_or_default(config: &Config, path: &[&str], default: u64) -> Result<u64> {
    if let Ok(Value::Number(n)) = config.get_value(path) {
        if let Some(value) = n.as_u64() {
            return Ok(value);
        }
    }
    config.set_value(path, Value::Number(Number::from(default)))?;
    Ok(default)
}

impl VitrineConfigExt for Config {
    fn get_api_base_url(&self) -> Result<String> {
        get_string_or_default(self, &["vitrine", "api", "base_url"], DEFAULT_BASE_URL)
    }

    fn get_api_timeout(&self) -> Result<Duration> {
        let secs = get_u64_or_default(
            self,
            &["vitrine", "api", "timeout_secs"],
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        Ok(Duration::from_secs(secs))
    }

    fn get_default_video_id(&self) -> Result<String> {
        get_string_or_default(
            self,
            &["vitrine", "api", "default_video_id"],
            DEFAULT_VIDEO_ID,
        )
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.get_managed_dir(&["vitrine", "cache", "directory"], DEFAULT_CACHE_DIR)
    }

    fn get_cache_namespace(&self) -> Result<String> {
        match self.get_value(&["vitrine", "cache", "namespace"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(self.get_slide_style()?.cache_namespace()),
        }
    }

    fn get_slide_style(&self) -> Result<SlideStyle> {
        let name = get_string_or_default(
            self,
            &["vitrine", "display", "style"],
            SlideStyle::HORIZONTAL,
        )?;
        match SlideStyle::from_name(&name) {
            Some(style) => Ok(style),
            None => {
                warn!(style = %name, "Unknown slide style, using horizontal");
                Ok(SlideStyle::horizontal())
            }
        }
    }

    fn set_slide_style(&self, name: &str) -> Result<()> {
        self.set_value(
            &["vitrine", "display", "style"],
            Value::String(name.to_string()),
        )
    }

    fn get_rotation_timing(&self) -> Result<RotationTiming> {
        let ms = |key: &str, default: u64| -> Result<Duration> {
            get_u64_or_default(self, &["vitrine", "rotation", key], default)
                .map(Duration::from_millis)
        };
        Ok(RotationTiming {
            slot_budget: ms("slot_budget_ms", DEFAULT_SLOT_BUDGET_MS)?,
            min_hold: ms("min_hold_ms", DEFAULT_MIN_HOLD_MS)?,
            enter: ms("enter_ms", DEFAULT_ENTER_MS)?,
            exit: ms("exit_ms", DEFAULT_EXIT_MS)?,
        })
    }
}
