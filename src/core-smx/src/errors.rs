//! Error types for sitemap rendering and partitioning.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for sitemap operations.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Target folder for partitioned sitemaps is missing or not a directory
    #[error("Target folder must exist and be a directory: {}", .0.display())]
    InvalidTargetDirectory(PathBuf),

    /// Entry cannot be serialized, e.g. it has no URL
    #[error("Invalid sitemap entry: {0}")]
    InvalidEntry(String),

    /// Configured hostname is not an absolute URL
    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] url::ParseError),

    /// Configured hostname is a URL, but not an http(s) one
    #[error("Hostname must use http or https, got: {0}")]
    UnsupportedHostnameScheme(String),

    /// Priority must be within 0.0 and 1.0
    #[error("Priority must be between 0.0 and 1.0, got: {0}")]
    InvalidPriority(f32),

    /// Video block is missing required fields or carries out-of-range values
    #[error("Invalid video: {0}")]
    InvalidVideo(String),

    /// News block is missing required fields
    #[error("Invalid news: {0}")]
    InvalidNews(String),

    /// Namespace override string could not be parsed
    #[error("Invalid XML namespace declarations: {0}")]
    InvalidNamespaces(String),

    /// Partition size must be between 1 and the protocol limit
    #[error("Sitemap size must be between 1 and {limit}, got: {0}", limit = crate::MAX_URLS_PER_SITEMAP)]
    InvalidPartitionSize(usize),

    /// A single document exceeds the protocol's per-file limit
    #[error("Sitemap holds {count} entries, the limit for one file is {limit}")]
    TooManyEntries { count: usize, limit: usize },

    /// URL list input could not be parsed as a JSON array of entries
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// Document builder failure
    #[error("XML writing failed: {0}")]
    Xml(String),

    /// Compression or other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a chunk or index file failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A spawned write task panicked or was cancelled
    #[error("Write task failed: {0}")]
    TaskFailed(String),
}

/// Type alias for Result with SitemapError
pub type Result<T> = std::result::Result<T, SitemapError>;
