//! A single sitemap document: an ordered list of entries rendered as `<urlset>`.

use crate::MAX_URLS_PER_SITEMAP;
use crate::cache::RenderCache;
use crate::compression::compress_string;
use crate::config::SitemapOptions;
use crate::entry::UrlEntry;
use crate::errors::{Result, SitemapError};
use crate::namespaces::Namespaces;
use crate::normalize::normalize_entry;
use crate::serialize::write_url_entry;
use crate::url_utils::validate_hostname;
use crate::xml_builder::XmlBuilder;

/// Ordered collection of entries plus the cache of their last rendering.
///
/// Entries keep insertion order, which is also output order. Any mutation drops the cache.
#[derive(Debug, Clone)]
pub struct Sitemap {
    hostname: Option<String>,
    entries: Vec<UrlEntry>,
    cache: RenderCache,
    xsl_url: Option<String>,
    namespaces: Namespaces,
}

impl Sitemap {
    /// Creates a document over the initial entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHostname` or `UnsupportedHostnameScheme` if a hostname is configured but
    /// is not an absolute http(s) URL.
    pub fn new<I, E>(entries: I, options: SitemapOptions) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<UrlEntry>,
    {
        if let Some(hostname) = &options.hostname {
            validate_hostname(hostname)?;
        }
        Ok(Self {
            hostname: options.hostname,
            entries: entries.into_iter().map(Into::into).collect(),
            cache: RenderCache::new(options.cache_time),
            xsl_url: options.xsl_url,
            namespaces: options.xml_ns.unwrap_or_else(Namespaces::urlset_default),
        })
    }

    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry (no de-duplication) and returns the new entry count.
    pub fn add(&mut self, entry: impl Into<UrlEntry>) -> usize {
        self.entries.push(entry.into());
        self.cache.clear();
        self.entries.len()
    }

    /// Removes every entry whose URL equals `url`, returning how many were removed.
    pub fn remove(&mut self, url: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.url != url);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.cache.clear();
        }
        removed
    }

    /// Removes every entry with the same URL as `entry`.
    pub fn remove_entry(&mut self, entry: &UrlEntry) -> usize {
        self.remove(&entry.url)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn is_cache_fresh(&self) -> bool {
        self.cache.is_fresh()
    }

    /// Renders the document, reusing the cached output while it is fresh.
    ///
    /// # Errors
    ///
    /// Fails if the document holds more entries than one sitemap file may carry, or
    /// if any entry is invalid. A failed render leaves the cache untouched.
    pub fn render(&mut self) -> Result<String> {
        if let Some(cached) = self.cache.get() {
            tracing::debug!("Serving cached sitemap ({} entries)", self.entries.len());
            return Ok(cached.to_string());
        }

        let xml = self.render_uncached()?;
        self.cache.store(&xml);
        Ok(xml)
    }

    fn render_uncached(&self) -> Result<String> {
        if self.entries.len() > MAX_URLS_PER_SITEMAP {
            return Err(SitemapError::TooManyEntries {
                count: self.entries.len(),
                limit: MAX_URLS_PER_SITEMAP,
            });
        }

        let mut builder = XmlBuilder::new();
        builder.declaration()?;
        if let Some(xsl_url) = &self.xsl_url {
            builder.stylesheet(xsl_url)?;
        }
        builder.open_root("urlset", &self.namespaces)?;
        for entry in &self.entries {
            let normalized = normalize_entry(entry, self.hostname.as_deref())?;
            write_url_entry(&mut builder, &normalized)?;
        }
        builder.close("urlset")?;
        builder.finish()
    }

    /// Renders on the next scheduler tick. Failures surface through the returned `Result`.
    pub async fn render_async(&mut self) -> Result<String> {
        tokio::task::yield_now().await;
        self.render()
    }

    /// Renders and gzips the document.
    pub fn render_gzip(&mut self) -> Result<Vec<u8>> {
        let xml = self.render()?;
        compress_string(&xml)
    }

    /// Renders and gzips the document on the next scheduler tick.
    pub async fn render_gzip_async(&mut self) -> Result<Vec<u8>> {
        tokio::task::yield_now().await;
        self.render_gzip()
    }
}
