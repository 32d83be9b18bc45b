//! Startup parameters
//!
//! The display page is opened as `https://host/page?video_id=...`. The
//! binary receives that URL, or just its query string, as its argument.

use crate::client::VIDEO_ID_PARAM;
use tracing::info;
use url::{form_urlencoded, Url};

/// Parameters the slideshow is started with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupParams {
    pub video_id: String,
    /// `true` when `video_id` came from the fallback default
    pub is_default: bool,
}

impl StartupParams {
    /// Parses `arg` and falls back to `default_video_id`
    ///
    /// `arg` may be a full URL, a query string with or without its leading
    /// `?`, or absent. An empty `video_id` counts as absent.
    pub fn from_arg(arg: Option<&str>, default_video_id: &str) -> Self {
        match arg.and_then(video_id_from) {
            Some(video_id) => Self {
                video_id,
                is_default: false,
            },
            None => {
                info!("No video_id given, using default test identifier");
                Self {
                    video_id: default_video_id.to_string(),
                    is_default: true,
                }
            }
        }
    }
}

fn video_id_from(arg: &str) -> Option<String> {
    let arg = arg.trim();
    let query = match Url::parse(arg) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => arg.trim_start_matches('?').to_string(),
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == VIDEO_ID_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
