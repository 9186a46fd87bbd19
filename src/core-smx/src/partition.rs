//! Splits a large URL collection across multiple sitemap files plus an index manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::MAX_URLS_PER_SITEMAP;
use crate::batch::process_in_batches;
use crate::config::{IndexXmlOptions, SitemapIndexOptions, SitemapOptions};
use crate::entry::UrlEntry;
use crate::errors::{Result, SitemapError};
use crate::index_xml::build_sitemap_index;
use crate::pending::{CompletionHook, PendingWrites};
use crate::sitemap::Sitemap;
use crate::url_utils::{join_url, validate_hostname};

/// `<name>-<id>.xml`, or `<name>-<id>.xml.gz` when gzipped.
pub fn chunk_filename(sitemap_name: &str, id: usize, gzip: bool) -> String {
    if gzip {
        format!("{}-{}.xml.gz", sitemap_name, id)
    } else {
        format!("{}-{}.xml", sitemap_name, id)
    }
}

/// `<name>-index.xml`
pub fn index_filename(sitemap_name: &str) -> String {
    format!("{}-index.xml", sitemap_name)
}

/// Moves entries into contiguous chunks of at most `size` (> 0) entries, keeping input order.
fn partition_entries(entries: impl Iterator<Item = UrlEntry>, size: usize) -> Vec<Vec<UrlEntry>> {
    let mut chunks: Vec<Vec<UrlEntry>> = Vec::new();
    for entry in entries {
        match chunks.last_mut() {
            Some(chunk) if chunk.len() < size => chunk.push(entry),
            _ => {
                let mut chunk = Vec::with_capacity(size.min(1024));
                chunk.push(entry);
                chunks.push(chunk);
            }
        }
    }
    chunks
}

/// Paths of every file produced by a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSitemaps {
    /// Chunk files, in chunk order
    pub sitemaps: Vec<PathBuf>,
    pub index: PathBuf,
}

enum WriteJob {
    Chunk { entries: Vec<UrlEntry>, path: PathBuf },
    Index { options: IndexXmlOptions, path: PathBuf },
}

/// A URL collection partitioned into chunk files of at most `sitemap_size` entries each.
///
/// Chunk boundaries and filenames are fixed at construction; writes may then complete
/// in any order without affecting numbering.
pub struct SitemapIndex {
    options: SitemapIndexOptions,
    chunks: Vec<Vec<UrlEntry>>,
    filenames: Vec<String>,
    on_complete: Option<CompletionHook>,
}

impl std::fmt::Debug for SitemapIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SitemapIndex")
            .field("options", &self.options)
            .field("chunks", &self.chunks.len())
            .field("filenames", &self.filenames)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl SitemapIndex {
    /// Validates the options and partitions `urls`.
    ///
    /// # Errors
    ///
    /// - `InvalidTargetDirectory` if the target folder is missing or not a directory
    /// - `InvalidPartitionSize` if `sitemap_size` is 0 or above the protocol limit
    /// - `InvalidHostname` or `UnsupportedHostnameScheme` if a hostname is configured but is
    ///   not an absolute http(s) URL
    pub fn new<I, E>(urls: I, options: SitemapIndexOptions) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<UrlEntry>,
    {
        if !options.target_folder.is_dir() {
            return Err(SitemapError::InvalidTargetDirectory(options.target_folder.clone()));
        }
        if options.sitemap_size == 0 || options.sitemap_size > MAX_URLS_PER_SITEMAP {
            return Err(SitemapError::InvalidPartitionSize(options.sitemap_size));
        }
        if let Some(hostname) = &options.hostname {
            validate_hostname(hostname)?;
        }

        let chunks = partition_entries(urls.into_iter().map(Into::into), options.sitemap_size);
        let filenames = (0..chunks.len())
            .map(|id| chunk_filename(&options.sitemap_name, id, options.gzip))
            .collect();

        tracing::debug!(
            "Partitioned {} entries into {} chunks of at most {}",
            chunks.iter().map(Vec::len).sum::<usize>(),
            chunks.len(),
            options.sitemap_size
        );

        Ok(Self {
            options,
            chunks,
            filenames,
            on_complete: None,
        })
    }

    /// Registers a hook invoked exactly once, after every chunk and index write has reported.
    pub fn on_complete<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&Result<()>) + Send + 'static,
    {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn chunks(&self) -> &[Vec<UrlEntry>] {
        &self.chunks
    }

    /// Chunk filenames, one per chunk, in chunk order.
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn index_filename(&self) -> String {
        index_filename(&self.options.sitemap_name)
    }

    /// The URL the index uses to reference each chunk file.
    pub fn sitemap_urls(&self) -> Vec<String> {
        self.filenames
            .iter()
            .map(|filename| match &self.options.hostname {
                Some(hostname) => join_url(hostname, filename),
                None => filename.clone(),
            })
            .collect()
    }

    fn index_options(&self) -> IndexXmlOptions {
        IndexXmlOptions {
            urls: self.sitemap_urls(),
            xsl_url: self.options.xsl_url.clone(),
            ..Default::default()
        }
    }

    /// Renders the index manifest without writing anything.
    pub fn render_index(&self) -> Result<String> {
        build_sitemap_index(&self.index_options())
    }

    /// Renders and writes every chunk file and the index file.
    ///
    /// All writes run to completion even if some fail; the first failure in chunk order
    /// (the index counting last) is returned and handed to the completion hook.
    pub async fn write(mut self) -> Result<WrittenSitemaps> {
        let folder = self.options.target_folder.clone();
        let written = WrittenSitemaps {
            sitemaps: self.filenames.iter().map(|name| folder.join(name)).collect(),
            index: folder.join(self.index_filename()),
        };

        let index_job = WriteJob::Index {
            options: self.index_options(),
            path: written.index.clone(),
        };
        let mut jobs: Vec<WriteJob> = std::mem::take(&mut self.chunks)
            .into_iter()
            .zip(written.sitemaps.iter().cloned())
            .map(|(entries, path)| WriteJob::Chunk { entries, path })
            .collect();
        jobs.push(index_job);

        let pending = Arc::new(PendingWrites::new(jobs.len(), self.on_complete.take()));
        let chunk_options = self.options.chunk_options();
        let gzip = self.options.gzip;

        let reports = process_in_batches(
            jobs,
            |job, order| {
                let pending = pending.clone();
                let chunk_options = chunk_options.clone();
                async move {
                    let outcome = run_job(job, chunk_options, gzip).await;
                    pending.complete(order, outcome)
                }
            },
            self.options.concurrency,
        )
        .await;

        let overall = reports
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_else(|| Err(SitemapError::TaskFailed("completion was never reported".to_string())));

        overall.map(|_| {
            tracing::info!(
                "Wrote {} sitemap files and {}",
                written.sitemaps.len(),
                written.index.display()
            );
            written
        })
    }

    /// Blocking form of [`SitemapIndex::write`]. Must not be called from within an async runtime.
    pub fn write_blocking(self) -> Result<WrittenSitemaps> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.write())
    }
}

async fn run_job(job: WriteJob, chunk_options: SitemapOptions, gzip: bool) -> Result<()> {
    match job {
        WriteJob::Chunk { entries, path } => {
            let count = entries.len();
            let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
                let mut sitemap = Sitemap::new(entries, chunk_options)?;
                if gzip {
                    sitemap.render_gzip()
                } else {
                    sitemap.render().map(String::into_bytes)
                }
            })
            .await
            .map_err(|e| SitemapError::TaskFailed(e.to_string()))??;
            write_file(&path, bytes).await?;
            tracing::debug!("Wrote {} entries to {}", count, path.display());
            Ok(())
        }
        WriteJob::Index { options, path } => {
            let xml = build_sitemap_index(&options)?;
            write_file(&path, xml.into_bytes()).await?;
            tracing::debug!("Wrote index of {} sitemaps to {}", options.urls.len(), path.display());
            Ok(())
        }
    }
}

async fn write_file(path: &Path, bytes: Vec<u8>) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| SitemapError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/page-{}", i)).collect()
    }

    fn options(dir: &Path, size: usize) -> SitemapIndexOptions {
        SitemapIndexOptions::builder()
            .hostname("https://example.com")
            .target_folder(dir)
            .sitemap_size(size)
            .build()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(chunk_filename("sitemap", 0, false), "sitemap-0.xml");
        assert_eq!(chunk_filename("blog", 12, true), "blog-12.xml.gz");
        assert_eq!(index_filename("blog"), "blog-index.xml");
    }

    #[test]
    fn test_missing_target_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = SitemapIndex::new(urls(3), options(&missing, 2));
        assert!(matches!(result, Err(SitemapError::InvalidTargetDirectory(path)) if path == missing));
    }

    #[test]
    fn test_target_folder_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = SitemapIndex::new(urls(3), options(file.path(), 2));
        assert!(matches!(result, Err(SitemapError::InvalidTargetDirectory(_))));
    }

    #[test]
    fn test_invalid_partition_size() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SitemapIndex::new(urls(3), options(dir.path(), 0)),
            Err(SitemapError::InvalidPartitionSize(0))
        ));
        assert!(matches!(
            SitemapIndex::new(urls(3), options(dir.path(), MAX_URLS_PER_SITEMAP + 1)),
            Err(SitemapError::InvalidPartitionSize(_))
        ));
    }

    #[test]
    fn test_non_http_hostname() {
        let dir = tempfile::tempdir().unwrap();
        let options = SitemapIndexOptions::builder()
            .hostname("ftp://files.example.com")
            .target_folder(dir.path())
            .build();
        assert!(matches!(
            SitemapIndex::new(urls(3), options),
            Err(SitemapError::UnsupportedHostnameScheme(_))
        ));
    }

    #[test]
    fn test_chunk_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let index = SitemapIndex::new(urls(7), options(dir.path(), 3)).unwrap();
        let sizes: Vec<_> = index.chunks().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(index.filenames(), &["sitemap-0.xml", "sitemap-1.xml", "sitemap-2.xml"]);

        let flattened: Vec<String> = index.chunks().iter().flatten().map(|e| e.url.clone()).collect();
        assert_eq!(flattened, urls(7));
    }

    #[test]
    fn test_partition_entries_moves_into_chunks() {
        let entries = urls(5).into_iter().map(UrlEntry::from);
        let chunks = partition_entries(entries, 2);
        let sizes: Vec<_> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(chunks[2][0].url, "/page-4");

        let exact = partition_entries(urls(4).into_iter().map(UrlEntry::from), 2);
        assert_eq!(exact.len(), 2);
        assert!(partition_entries(std::iter::empty(), 3).is_empty());
    }

    #[test]
    fn test_empty_input_has_no_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let index = SitemapIndex::new(Vec::<String>::new(), options(dir.path(), 3)).unwrap();
        assert!(index.chunks().is_empty());
        assert!(index.filenames().is_empty());
    }

    #[test]
    fn test_sitemap_urls() {
        let dir = tempfile::tempdir().unwrap();
        let index = SitemapIndex::new(urls(4), options(dir.path(), 2)).unwrap();
        assert_eq!(
            index.sitemap_urls(),
            vec!["https://example.com/sitemap-0.xml", "https://example.com/sitemap-1.xml"]
        );
        assert!(index.render_index().unwrap().contains("<loc>https://example.com/sitemap-1.xml</loc>"));
    }
}
