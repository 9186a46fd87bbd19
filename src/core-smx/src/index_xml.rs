//! Rendering of the `<sitemapindex>` manifest.

use chrono::{DateTime, Utc};

use crate::config::IndexXmlOptions;
use crate::errors::Result;
use crate::namespaces::Namespaces;
use crate::xml_builder::XmlBuilder;

/// Builds the index manifest, resolving a realtime last-modified value against the current time.
pub fn build_sitemap_index(options: &IndexXmlOptions) -> Result<String> {
    build_sitemap_index_at(options, Utc::now())
}

/// Builds the index manifest as of `now`.
///
/// One `<sitemap>` block is emitted per URL, in order, each carrying `<loc>` and, when a
/// last-modified value resolves, `<lastmod>`.
///
/// # Examples
///
/// ```
/// # use core_smx::{build_sitemap_index_at, IndexXmlOptions};
/// let options = IndexXmlOptions::builder()
///     .url("https://example.com/sitemap-0.xml")
///     .lastmod_iso("2024-01-01")
///     .build();
/// let xml = build_sitemap_index_at(&options, chrono::Utc::now()).unwrap();
/// assert!(xml.contains("<sitemap><loc>https://example.com/sitemap-0.xml</loc><lastmod>2024-01-01</lastmod></sitemap>"));
/// ```
pub fn build_sitemap_index_at(options: &IndexXmlOptions, now: DateTime<Utc>) -> Result<String> {
    let lastmod = options.resolve_lastmod(now);
    let namespaces = options.xml_ns.clone().unwrap_or_else(Namespaces::index_default);

    let mut builder = XmlBuilder::new();
    builder.declaration()?;
    if let Some(xsl_url) = &options.xsl_url {
        builder.stylesheet(xsl_url)?;
    }
    builder.open_root("sitemapindex", &namespaces)?;
    for url in &options.urls {
        builder.open("sitemap", &[])?;
        builder.text_element("loc", url)?;
        if let Some(lastmod) = &lastmod {
            builder.text_element("lastmod", lastmod)?;
        }
        builder.close("sitemap")?;
    }
    builder.close("sitemapindex")?;
    builder.finish()
}
