//! XML namespace declarations for `<urlset>` and `<sitemapindex>` roots.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::SitemapError;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";
pub const MOBILE_NS: &str = "http://www.google.com/schemas/sitemap-mobile/1.0";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w:.\-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("namespace declaration pattern is valid")
});

/// Ordered set of `name="value"` attribute declarations placed on a root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces(Vec<(String, String)>);

impl Namespaces {
    /// Declarations for `<urlset>`: core, news, xhtml, mobile, image and video.
    pub fn urlset_default() -> Self {
        Self::from_pairs(&[
            ("xmlns", SITEMAP_NS),
            ("xmlns:news", NEWS_NS),
            ("xmlns:xhtml", XHTML_NS),
            ("xmlns:mobile", MOBILE_NS),
            ("xmlns:image", IMAGE_NS),
            ("xmlns:video", VIDEO_NS),
        ])
    }

    /// Declarations for `<sitemapindex>`: core, mobile, image and video.
    pub fn index_default() -> Self {
        Self::from_pairs(&[
            ("xmlns", SITEMAP_NS),
            ("xmlns:mobile", MOBILE_NS),
            ("xmlns:image", IMAGE_NS),
            ("xmlns:video", VIDEO_NS),
        ])
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses a raw declaration string such as `xmlns="a" xmlns:x='b' foo=c`.
impl FromStr for Namespaces {
    type Err = SitemapError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();
        let mut consumed = 0;

        for caps in DECLARATION.captures_iter(raw) {
            let whole = caps.get(0).expect("group 0 always matches");
            let gap = &raw[consumed..whole.start()];
            if !gap.trim().is_empty() {
                return Err(SitemapError::InvalidNamespaces(format!("unexpected text '{}'", gap.trim())));
            }
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            pairs.push((caps[1].to_string(), value.to_string()));
            consumed = whole.end();
        }

        let trailing = &raw[consumed..];
        if !trailing.trim().is_empty() {
            return Err(SitemapError::InvalidNamespaces(format!("unexpected text '{}'", trailing.trim())));
        }
        if pairs.is_empty() {
            return Err(SitemapError::InvalidNamespaces("no declarations found".to_string()));
        }

        Ok(Self(pairs))
    }
}
