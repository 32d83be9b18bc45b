//! URL normalisation for image sources

/// Normalises an image URL coming from the API
///
/// - empty input gives an empty string
/// - `http://` and `https://` URLs are returned unchanged
/// - anything else (typically protocol-relative `//cdn/x.png`) is prefixed
///   with `https:`
pub fn format_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!("https:{}", url)
}

/// [`format_url`] for optional fields; empty results become `None`
pub fn format_optional(url: Option<&str>) -> Option<String> {
    url.map(format_url).filter(|u| !u.is_empty())
}
