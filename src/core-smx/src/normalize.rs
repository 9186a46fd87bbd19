//! Rewrites entries into their absolute-URL form.

use crate::entry::{Image, Link, UrlEntry};
use crate::errors::{Result, SitemapError};
use crate::url_utils::resolve_url;

/// Produces a copy of `entry` where the primary URL and every nested image and
/// alternate-link URL is absolute with respect to `hostname`.
///
/// The caller's entry is never modified. Without a hostname, URLs pass through as-is.
///
/// # Errors
///
/// Returns `InvalidEntry` if the entry has no URL.
pub fn normalize_entry(entry: &UrlEntry, hostname: Option<&str>) -> Result<UrlEntry> {
    if entry.url.trim().is_empty() {
        return Err(SitemapError::InvalidEntry("entry has no url".to_string()));
    }

    Ok(UrlEntry {
        url: resolve_url(&entry.url, hostname),
        images: entry
            .images
            .iter()
            .map(|image| Image {
                url: resolve_url(&image.url, hostname),
                ..image.clone()
            })
            .collect(),
        links: entry
            .links
            .iter()
            .map(|link| Link {
                url: resolve_url(&link.url, hostname),
                ..link.clone()
            })
            .collect(),
        ..entry.clone()
    })
}
