//! Integration tests for writing partitioned sitemap sets
//!
//! Covers:
//! - chunk count, sizes and filenames
//! - index manifest contents
//! - completion hook delivery (success and failure)
//! - gzip output
//! - blocking entry point

use std::path::Path;
use std::sync::{Arc, Mutex};

use core_smx::{SitemapError, SitemapIndex, SitemapIndexOptions, decompress_to_string};

/// Records every outcome delivered to a completion hook.
#[derive(Clone, Default)]
struct HookLog(Arc<Mutex<Vec<Result<(), String>>>>);

impl HookLog {
    fn record(&self) -> impl FnOnce(&core_smx::Result<()>) + Send + 'static {
        let log = self.0.clone();
        move |outcome: &core_smx::Result<()>| {
            log.lock()
                .unwrap()
                .push(outcome.as_ref().map(|_| ()).map_err(|e| e.to_string()));
        }
    }

    fn calls(&self) -> Vec<Result<(), String>> {
        self.0.lock().unwrap().clone()
    }
}

fn urls(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("/page/{}", i)).collect()
}

fn options(dir: &Path, size: usize) -> SitemapIndexOptions {
    SitemapIndexOptions::builder()
        .hostname("https://example.com")
        .target_folder(dir)
        .sitemap_size(size)
        .build()
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

#[tokio::test]
async fn test_protocol_sized_partitioning() {
    let dir = tempfile::tempdir().unwrap();
    let hook = HookLog::default();

    let written = SitemapIndex::new(urls(120_000), options(dir.path(), 50_000))
        .unwrap()
        .on_complete(hook.record())
        .write()
        .await
        .unwrap();

    assert_eq!(
        written.sitemaps,
        vec![
            dir.path().join("sitemap-0.xml"),
            dir.path().join("sitemap-1.xml"),
            dir.path().join("sitemap-2.xml"),
        ]
    );
    assert_eq!(written.index, dir.path().join("sitemap-index.xml"));

    let counts: Vec<usize> = ["sitemap-0.xml", "sitemap-1.xml", "sitemap-2.xml"]
        .iter()
        .map(|name| read(dir.path(), name).matches("<url>").count())
        .collect();
    assert_eq!(counts, vec![50_000, 50_000, 20_000]);

    let index = read(dir.path(), "sitemap-index.xml");
    assert_eq!(index.matches("<sitemap>").count(), 3);
    for id in 0..3 {
        assert!(index.contains(&format!("<loc>https://example.com/sitemap-{}.xml</loc>", id)));
    }

    assert_eq!(hook.calls(), vec![Ok(())]);
}

#[tokio::test]
async fn test_chunks_preserve_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let written = SitemapIndex::new(urls(25), options(dir.path(), 10))
        .unwrap()
        .write()
        .await
        .unwrap();
    assert_eq!(written.sitemaps.len(), 3);

    let mut locs = Vec::new();
    for path in &written.sitemaps {
        let xml = std::fs::read_to_string(path).unwrap();
        for piece in xml.split("<loc>").skip(1) {
            let end = piece.find("</loc>").unwrap();
            locs.push(piece[..end].to_string());
        }
    }

    let expected: Vec<String> = urls(25)
        .iter()
        .map(|path| format!("https://example.com{}", path))
        .collect();
    assert_eq!(locs, expected);
}

#[tokio::test]
async fn test_gzip_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let options = SitemapIndexOptions::builder()
        .hostname("https://example.com")
        .target_folder(dir.path())
        .sitemap_name("blog")
        .sitemap_size(2)
        .gzip(true)
        .build();

    let written = SitemapIndex::new(urls(3), options).unwrap().write().await.unwrap();
    assert_eq!(written.sitemaps[1], dir.path().join("blog-1.xml.gz"));

    let bytes = std::fs::read(dir.path().join("blog-0.xml.gz")).unwrap();
    let xml = decompress_to_string(&bytes).unwrap();
    assert!(xml.contains("<loc>https://example.com/page/0</loc>"));
    assert!(xml.contains("<loc>https://example.com/page/1</loc>"));

    // The index itself stays uncompressed.
    let index = read(dir.path(), "blog-index.xml");
    assert!(index.contains("<loc>https://example.com/blog-1.xml.gz</loc>"));
}

#[tokio::test]
async fn test_empty_input_writes_only_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let hook = HookLog::default();

    let written = SitemapIndex::new(Vec::<String>::new(), options(dir.path(), 10))
        .unwrap()
        .on_complete(hook.record())
        .write()
        .await
        .unwrap();

    assert!(written.sitemaps.is_empty());
    let index = read(dir.path(), "sitemap-index.xml");
    assert!(!index.contains("<sitemap>"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(hook.calls(), vec![Ok(())]);
}

#[tokio::test]
async fn test_write_failure_reaches_hook_and_caller() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on a chunk filename makes that write fail.
    std::fs::create_dir(dir.path().join("sitemap-1.xml")).unwrap();
    let hook = HookLog::default();

    let result = SitemapIndex::new(urls(5), options(dir.path(), 2))
        .unwrap()
        .on_complete(hook.record())
        .write()
        .await;

    match result {
        Err(SitemapError::WriteFailed { path, .. }) => assert_eq!(path, dir.path().join("sitemap-1.xml")),
        other => panic!("expected a write failure, got {:?}", other),
    }

    let calls = hook.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].as_ref().unwrap_err().contains("sitemap-1.xml"));

    // Every other write still ran to completion.
    assert!(dir.path().join("sitemap-0.xml").is_file());
    assert!(dir.path().join("sitemap-2.xml").is_file());
    assert!(dir.path().join("sitemap-index.xml").is_file());
}

#[test]
fn test_invalid_target_folder_fails_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let result = SitemapIndex::new(urls(3), options(&missing, 2));
    assert!(matches!(result, Err(SitemapError::InvalidTargetDirectory(_))));
    assert!(!missing.exists());
}

#[test]
fn test_write_blocking() {
    let dir = tempfile::tempdir().unwrap();
    let hook = HookLog::default();
    let options = SitemapIndexOptions::builder()
        .hostname("https://example.com")
        .target_folder(dir.path())
        .sitemap_size(4)
        .concurrency(1)
        .xsl_url("https://example.com/sitemap.xsl")
        .build();

    let written = SitemapIndex::new(urls(9), options)
        .unwrap()
        .on_complete(hook.record())
        .write_blocking()
        .unwrap();

    assert_eq!(written.sitemaps.len(), 3);
    assert_eq!(hook.calls(), vec![Ok(())]);
    let chunk = read(dir.path(), "sitemap-2.xml");
    assert!(chunk.contains(r#"<?xml-stylesheet type="text/xsl" href="https://example.com/sitemap.xsl"?>"#));
    assert_eq!(chunk.matches("<url>").count(), 1);
    assert!(read(dir.path(), "sitemap-index.xml").contains("xml-stylesheet"));
}
