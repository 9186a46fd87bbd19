//! URL classification and hostname joining utilities.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::errors::{Result, SitemapError};

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("absolute URL pattern is valid"));

/// Checks if a URL already carries an http(s) scheme.
///
/// # Examples
///
/// ```
/// # use core_smx::is_absolute_url;
/// assert!(is_absolute_url("https://example.com/page"));
/// assert!(is_absolute_url("HTTP://example.com"));
/// assert!(!is_absolute_url("/page"));
/// assert!(!is_absolute_url("ftp://example.com/file"));
/// ```
pub fn is_absolute_url(url: &str) -> bool {
    ABSOLUTE_URL.is_match(url)
}

/// Validates that a hostname is an absolute http(s) URL which relative paths can be joined onto.
pub fn validate_hostname(hostname: &str) -> Result<()> {
    let parsed = Url::parse(hostname)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(SitemapError::UnsupportedHostnameScheme(hostname.to_string())),
    }
}

/// Joins a hostname and a path with exactly one separating slash.
///
/// Leading slashes on the path and trailing slashes on the hostname are collapsed,
/// repeated slashes inside the path are squeezed, and any query or fragment is kept as-is.
///
/// # Examples
///
/// ```
/// # use core_smx::join_url;
/// assert_eq!(join_url("https://example.com/", "/docs//intro"), "https://example.com/docs/intro");
/// assert_eq!(join_url("https://example.com", "search?q=a//b"), "https://example.com/search?q=a//b");
/// ```
pub fn join_url(hostname: &str, path: &str) -> String {
    let base = hostname.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('?') || path.starts_with('#') {
        return format!("{}{}", base, path);
    }

    let split_at = path.find(['?', '#']).unwrap_or(path.len());
    let (path_part, suffix) = path.split_at(split_at);

    let mut squeezed = String::with_capacity(path_part.len());
    let mut prev_slash = false;
    for ch in path_part.trim_start_matches('/').chars() {
        if ch == '/' {
            if !prev_slash {
                squeezed.push(ch);
            }
            prev_slash = true;
        } else {
            squeezed.push(ch);
            prev_slash = false;
        }
    }

    format!("{}/{}{}", base, squeezed, suffix)
}

/// Resolves a URL against an optional hostname.
///
/// Absolute URLs, and every URL when no hostname is configured, pass through unchanged.
pub fn resolve_url(url: &str, hostname: Option<&str>) -> String {
    match hostname {
        Some(host) if !is_absolute_url(url) => join_url(host, url),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("http://example.com"));
        assert!(is_absolute_url("https://example.com/a"));
        assert!(is_absolute_url("HtTpS://example.com/a"));
        assert!(!is_absolute_url("example.com/a"));
        assert!(!is_absolute_url("/a"));
        assert!(!is_absolute_url("//example.com/a"));
        assert!(!is_absolute_url("android-app://com.example/page"));
    }

    #[test]
    fn test_join_url_single_separator() {
        assert_eq!(join_url("https://example.com", "page1"), "https://example.com/page1");
        assert_eq!(join_url("https://example.com/", "page1"), "https://example.com/page1");
        assert_eq!(join_url("https://example.com//", "//page1"), "https://example.com/page1");
        assert_eq!(join_url("https://example.com", "a//b///c"), "https://example.com/a/b/c");
        assert_eq!(join_url("https://example.com/blog/", "/post"), "https://example.com/blog/post");
    }

    #[test]
    fn test_join_url_keeps_query_and_fragment() {
        assert_eq!(
            join_url("https://example.com", "/list?page=2#top"),
            "https://example.com/list?page=2#top"
        );
        assert_eq!(join_url("https://example.com/", "?q=1"), "https://example.com?q=1");
        assert_eq!(join_url("https://example.com", "#frag"), "https://example.com#frag");
    }

    #[test]
    fn test_join_url_root_and_empty() {
        assert_eq!(join_url("https://example.com", "/"), "https://example.com/");
        assert_eq!(join_url("https://example.com/", ""), "https://example.com");
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(resolve_url("/a", Some("https://example.com")), "https://example.com/a");
        assert_eq!(
            resolve_url("https://other.org/a", Some("https://example.com")),
            "https://other.org/a"
        );
        assert_eq!(resolve_url("/a", None), "/a");
    }

    #[test]
    fn test_validate_hostname() {
        assert!(validate_hostname("https://example.com").is_ok());
        assert!(validate_hostname("HTTP://example.com/base/").is_ok());
        assert!(matches!(validate_hostname("example.com"), Err(SitemapError::InvalidHostname(_))));
    }

    #[test]
    fn test_validate_hostname_rejects_other_schemes() {
        for hostname in ["mailto:x", "ftp://h", "file:///var/www"] {
            assert!(
                matches!(validate_hostname(hostname), Err(SitemapError::UnsupportedHostnameScheme(ref h)) if h == hostname),
                "{} should be rejected",
                hostname
            );
        }
    }
}
