//! # Sitemap Generation Library
//!
//! Renders sitemap documents following the sitemaps.org protocol and splits large URL
//! collections across several sitemap files plus a `<sitemapindex>` manifest.
//!
//! ## Features
//!
//! - Normalize relative entry URLs (and nested image/link URLs) against a hostname
//! - Render `<urlset>` documents with image, video, news, alternate-link and mobile extensions
//! - Cache rendered output for a configurable time-to-live
//! - Gzip rendered documents
//! - Partition any number of URLs into files of at most 50,000 entries, written concurrently
//! - Build `<sitemapindex>` manifests with an optional last-modified value
//!
//! ## Examples
//!
//! ### Single document
//!
//! ```
//! use core_smx::{Sitemap, SitemapOptions};
//!
//! let options = SitemapOptions::builder().hostname("https://example.com").build();
//! let mut sitemap = Sitemap::new(["page1"], options).unwrap();
//! sitemap.add("page2");
//!
//! let xml = sitemap.render().unwrap();
//! assert!(xml.contains("<loc>https://example.com/page2</loc>"));
//! ```
//!
//! ### Partitioned set
//!
//! ```no_run
//! use core_smx::{SitemapIndex, SitemapIndexOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = SitemapIndexOptions::builder()
//!         .hostname("https://example.com")
//!         .target_folder("/var/www/sitemaps")
//!         .gzip(true)
//!         .build();
//!
//!     let urls = (0..120_000).map(|i| format!("/item/{}", i));
//!     let written = SitemapIndex::new(urls, options)?
//!         .on_complete(|outcome| println!("done: {:?}", outcome.is_ok()))
//!         .write()
//!         .await?;
//!     println!("index at {}", written.index.display());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod batch;
mod cache;
mod compression;
mod config;
mod entry;
mod errors;
mod index_xml;
mod input;
mod logging;
pub mod namespaces;
mod normalize;
mod partition;
mod pending;
mod serialize;
mod sitemap;
mod url_utils;
pub mod xml_builder;

/// Protocol limit on the number of `<url>` entries in one sitemap file.
pub const MAX_URLS_PER_SITEMAP: usize = 50_000;

// Public API re-exports
pub use config::{
    DEFAULT_CONCURRENCY, DEFAULT_SITEMAP_NAME, IndexXmlOptions, IndexXmlOptionsBuilder, SitemapIndexOptions,
    SitemapIndexOptionsBuilder, SitemapOptions, SitemapOptionsBuilder, to_iso_string,
};
pub use entry::{ChangeFreq, Image, Link, News, NewsAccess, RawEntry, UrlEntry, Video};
pub use errors::{Result, SitemapError};
pub use index_xml::{build_sitemap_index, build_sitemap_index_at};
pub use input::parse_entries;
pub use namespaces::Namespaces;
pub use partition::{SitemapIndex, WrittenSitemaps, chunk_filename, index_filename};
pub use sitemap::Sitemap;

// Additional exports for advanced usage
pub use cache::RenderCache;
pub use compression::{compress, compress_string, decompress_to_string};
pub use logging::{setup_logging, try_setup_logging};
pub use normalize::normalize_entry;
pub use pending::{CompletionHook, PendingWrites};
pub use serialize::{format_priority, write_url_entry};
pub use url_utils::{is_absolute_url, join_url, resolve_url, validate_hostname};
