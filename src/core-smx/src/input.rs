//! Parsing of URL lists supplied as text.

use crate::entry::{RawEntry, UrlEntry};
use crate::errors::Result;

/// Parses a URL list.
///
/// Content whose first non-blank character is `[` is read as a JSON array of entries,
/// each either a URL string or a record. Anything else is one URL per line, skipping
/// blank lines and `#` comments.
pub fn parse_entries(content: &str) -> Result<Vec<UrlEntry>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let raw: Vec<RawEntry> = serde_json::from_str(trimmed)?;
        return Ok(raw.into_iter().map(UrlEntry::from).collect());
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(UrlEntry::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SitemapError;

    #[test]
    fn test_line_list() {
        let entries = parse_entries("# pages\n/a\n\n  https://e.com/b  \n").unwrap();
        let urls: Vec<_> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/a", "https://e.com/b"]);
    }

    #[test]
    fn test_json_mixed_entries() {
        let content = r#"
            ["/a", {"url": "/b", "priority": 0.8, "img": "/b.png"}]
        "#;
        let entries = parse_entries(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "/a");
        assert_eq!(entries[1].priority, Some(0.8));
        assert_eq!(entries[1].images[0].url, "/b.png");
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(parse_entries("[\"/a\","), Err(SitemapError::Json(_))));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_entries("").unwrap().is_empty());
    }
}
