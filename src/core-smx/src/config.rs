//! Configuration options for sitemap documents, partitioned sitemap sets and index manifests.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::MAX_URLS_PER_SITEMAP;
use crate::namespaces::Namespaces;

/// Default filename prefix for partitioned sitemaps.
pub const DEFAULT_SITEMAP_NAME: &str = "sitemap";

/// Default number of concurrent chunk writes.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration options for a single sitemap document.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptions {
    /// Base URL that relative entry URLs are joined onto
    pub hostname: Option<String>,
    /// How long a rendered document is reused (zero disables caching)
    pub cache_time: Duration,
    /// Stylesheet referenced by an `<?xml-stylesheet?>` instruction
    pub xsl_url: Option<String>,
    /// Replaces the default `<urlset>` namespace declarations
    pub xml_ns: Option<Namespaces>,
}

impl SitemapOptions {
    /// Creates a new builder for SitemapOptions.
    pub fn builder() -> SitemapOptionsBuilder {
        SitemapOptionsBuilder::default()
    }
}

/// Builder for SitemapOptions.
#[derive(Debug, Clone, Default)]
pub struct SitemapOptionsBuilder {
    hostname: Option<String>,
    cache_time: Option<Duration>,
    xsl_url: Option<String>,
    xml_ns: Option<Namespaces>,
}

impl SitemapOptionsBuilder {
    /// Sets the base URL for relative entries.
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Sets how long rendered output is cached.
    pub fn cache_time(mut self, cache_time: Duration) -> Self {
        self.cache_time = Some(cache_time);
        self
    }

    /// Sets the stylesheet URL.
    pub fn xsl_url(mut self, xsl_url: impl Into<String>) -> Self {
        self.xsl_url = Some(xsl_url.into());
        self
    }

    /// Overrides the root namespace declarations.
    pub fn xml_ns(mut self, xml_ns: Namespaces) -> Self {
        self.xml_ns = Some(xml_ns);
        self
    }

    /// Builds the SitemapOptions.
    pub fn build(self) -> SitemapOptions {
        SitemapOptions {
            hostname: self.hostname,
            cache_time: self.cache_time.unwrap_or(Duration::ZERO),
            xsl_url: self.xsl_url,
            xml_ns: self.xml_ns,
        }
    }
}

/// Configuration options for writing a partitioned set of sitemaps plus their index.
#[derive(Debug, Clone)]
pub struct SitemapIndexOptions {
    /// Base URL for relative entries and for the index's links to each chunk file
    pub hostname: Option<String>,
    /// Existing directory that receives every generated file
    pub target_folder: PathBuf,
    /// Filename prefix: `<name>-0.xml`, ..., `<name>-index.xml`
    pub sitemap_name: String,
    /// Maximum number of entries per chunk file
    pub sitemap_size: usize,
    /// Gzip chunk files (`.xml.gz`)
    pub gzip: bool,
    /// Stylesheet referenced by every chunk and by the index
    pub xsl_url: Option<String>,
    /// Replaces the default `<urlset>` namespace declarations of every chunk
    pub xml_ns: Option<Namespaces>,
    /// Maximum number of chunk files rendered and written at once
    pub concurrency: usize,
}

impl Default for SitemapIndexOptions {
    fn default() -> Self {
        Self {
            hostname: None,
            target_folder: PathBuf::from("."),
            sitemap_name: DEFAULT_SITEMAP_NAME.to_string(),
            sitemap_size: MAX_URLS_PER_SITEMAP,
            gzip: false,
            xsl_url: None,
            xml_ns: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl SitemapIndexOptions {
    /// Creates a new builder for SitemapIndexOptions.
    pub fn builder() -> SitemapIndexOptionsBuilder {
        SitemapIndexOptionsBuilder::default()
    }

    /// Options applied to the document rendered for each chunk.
    pub fn chunk_options(&self) -> SitemapOptions {
        SitemapOptions {
            hostname: self.hostname.clone(),
            cache_time: Duration::ZERO,
            xsl_url: self.xsl_url.clone(),
            xml_ns: self.xml_ns.clone(),
        }
    }
}

/// Builder for SitemapIndexOptions.
#[derive(Debug, Clone, Default)]
pub struct SitemapIndexOptionsBuilder {
    hostname: Option<String>,
    target_folder: Option<PathBuf>,
    sitemap_name: Option<String>,
    sitemap_size: Option<usize>,
    gzip: bool,
    xsl_url: Option<String>,
    xml_ns: Option<Namespaces>,
    concurrency: Option<usize>,
}

impl SitemapIndexOptionsBuilder {
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn target_folder(mut self, target_folder: impl Into<PathBuf>) -> Self {
        self.target_folder = Some(target_folder.into());
        self
    }

    pub fn sitemap_name(mut self, sitemap_name: impl Into<String>) -> Self {
        self.sitemap_name = Some(sitemap_name.into());
        self
    }

    pub fn sitemap_size(mut self, sitemap_size: usize) -> Self {
        self.sitemap_size = Some(sitemap_size);
        self
    }

    pub fn gzip(mut self, gzip: bool) -> Self {
        self.gzip = gzip;
        self
    }

    pub fn xsl_url(mut self, xsl_url: impl Into<String>) -> Self {
        self.xsl_url = Some(xsl_url.into());
        self
    }

    pub fn xml_ns(mut self, xml_ns: Namespaces) -> Self {
        self.xml_ns = Some(xml_ns);
        self
    }

    /// Sets the number of chunk files processed simultaneously.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Builds the SitemapIndexOptions.
    pub fn build(self) -> SitemapIndexOptions {
        let defaults = SitemapIndexOptions::default();
        SitemapIndexOptions {
            hostname: self.hostname,
            target_folder: self.target_folder.unwrap_or(defaults.target_folder),
            sitemap_name: self.sitemap_name.unwrap_or(defaults.sitemap_name),
            sitemap_size: self.sitemap_size.unwrap_or(defaults.sitemap_size),
            gzip: self.gzip,
            xsl_url: self.xsl_url,
            xml_ns: self.xml_ns,
            concurrency: self.concurrency.unwrap_or(defaults.concurrency).max(1),
        }
    }
}

/// Configuration options for an index manifest (`<sitemapindex>`).
///
/// At most one last-modified value is emitted. When several are configured the first
/// present wins, in this order: `lastmod_iso`, `lastmod_realtime`, `lastmod`.
#[derive(Debug, Clone, Default)]
pub struct IndexXmlOptions {
    /// Absolute URLs of every sitemap file, in output order
    pub urls: Vec<String>,
    pub xsl_url: Option<String>,
    /// Replaces the default `<sitemapindex>` namespace declarations
    pub xml_ns: Option<Namespaces>,
    /// Emitted verbatim
    pub lastmod_iso: Option<String>,
    /// Use the render time
    pub lastmod_realtime: bool,
    /// Formatted as an ISO-8601 string
    pub lastmod: Option<DateTime<Utc>>,
}

impl IndexXmlOptions {
    pub fn builder() -> IndexXmlOptionsBuilder {
        IndexXmlOptionsBuilder::default()
    }

    /// Resolves the last-modified value given the current time.
    pub fn resolve_lastmod(&self, now: DateTime<Utc>) -> Option<String> {
        if let Some(iso) = &self.lastmod_iso {
            return Some(iso.clone());
        }
        if self.lastmod_realtime {
            return Some(to_iso_string(now));
        }
        self.lastmod.map(to_iso_string)
    }
}

/// `2024-01-02T03:04:05.678Z`
pub fn to_iso_string(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builder for IndexXmlOptions.
#[derive(Debug, Clone, Default)]
pub struct IndexXmlOptionsBuilder {
    options: IndexXmlOptions,
}

impl IndexXmlOptionsBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.options.urls.push(url.into());
        self
    }

    pub fn urls(mut self, urls: Vec<String>) -> Self {
        self.options.urls.extend(urls);
        self
    }

    pub fn xsl_url(mut self, xsl_url: impl Into<String>) -> Self {
        self.options.xsl_url = Some(xsl_url.into());
        self
    }

    pub fn xml_ns(mut self, xml_ns: Namespaces) -> Self {
        self.options.xml_ns = Some(xml_ns);
        self
    }

    pub fn lastmod_iso(mut self, lastmod: impl Into<String>) -> Self {
        self.options.lastmod_iso = Some(lastmod.into());
        self
    }

    pub fn lastmod_realtime(mut self, realtime: bool) -> Self {
        self.options.lastmod_realtime = realtime;
        self
    }

    pub fn lastmod(mut self, lastmod: DateTime<Utc>) -> Self {
        self.options.lastmod = Some(lastmod);
        self
    }

    pub fn build(self) -> IndexXmlOptions {
        self.options
    }
}
