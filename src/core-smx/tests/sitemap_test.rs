//! Integration tests for rendering single sitemap documents from parsed URL lists

use core_smx::{Sitemap, SitemapError, SitemapOptions, parse_entries};

fn host_options() -> SitemapOptions {
    SitemapOptions::builder().hostname("https://example.com/").build()
}

#[test]
fn test_json_entries_render_every_extension() {
    let entries = parse_entries(
        r#"[
            {
                "url": "/articles/rust?ref=home",
                "lastmod": "2024-03-01",
                "changefreq": "weekly",
                "priority": 1,
                "img": ["/a.png", {"url": "https://cdn.example.com/b.png", "caption": "Fish & chips"}],
                "links": [{"lang": "de", "url": "/de/articles/rust"}],
                "mobile": true,
                "news": {
                    "publication_name": "The Daily",
                    "publication_language": "en",
                    "publication_date": "2024-03-01",
                    "title": "Rust ships"
                }
            }
        ]"#,
    )
    .unwrap();

    let mut sitemap = Sitemap::new(entries, host_options()).unwrap();
    let xml = sitemap.render().unwrap();

    assert!(xml.contains(
        "<url><loc>https://example.com/articles/rust?ref=home</loc><lastmod>2024-03-01</lastmod>\
         <changefreq>weekly</changefreq><priority>1.0</priority>"
    ));
    assert!(xml.contains("<image:loc>https://example.com/a.png</image:loc>"));
    assert!(xml.contains("<image:loc>https://cdn.example.com/b.png</image:loc>"));
    assert!(xml.contains("<image:caption>Fish &amp; chips</image:caption>"));
    assert!(xml.contains(r#"<xhtml:link rel="alternate" hreflang="de" href="https://example.com/de/articles/rust"/>"#));
    assert!(xml.contains("<mobile:mobile/>"));
    assert!(xml.contains("<news:publication><news:name>The Daily</news:name>"));
}

#[test]
fn test_locs_are_absolute_without_double_slashes() {
    let entries = parse_entries("/a\n//b\nc/d\nhttps://other.org//keep\n").unwrap();
    let mut sitemap = Sitemap::new(entries, host_options()).unwrap();
    let xml = sitemap.render().unwrap();

    let locs: Vec<&str> = xml
        .split("<loc>")
        .skip(1)
        .map(|piece| &piece[..piece.find("</loc>").unwrap()])
        .collect();
    assert_eq!(
        locs,
        vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/c/d",
            "https://other.org//keep",
        ]
    );
}

#[test]
fn test_input_entries_are_not_mutated_by_rendering() {
    let entries = parse_entries(r#"[{"url": "/a", "img": "/a.png"}]"#).unwrap();
    let mut sitemap = Sitemap::new(entries.clone(), host_options()).unwrap();
    sitemap.render().unwrap();
    assert_eq!(sitemap.entries(), entries.as_slice());
    assert_eq!(sitemap.entries()[0].images[0].url, "/a.png");
}

#[test]
fn test_video_without_description_is_rejected() {
    let missing = parse_entries(r#"[{"url": "/v", "video": {"thumbnail_loc": "/t.png", "title": "T"}}]"#);
    assert!(matches!(missing, Err(SitemapError::Json(_))));

    let blank =
        parse_entries(r#"[{"url": "/v", "video": {"thumbnail_loc": "/t.png", "title": "T", "description": " "}}]"#)
            .unwrap();
    let mut sitemap = Sitemap::new(blank, host_options()).unwrap();
    assert!(matches!(sitemap.render(), Err(SitemapError::InvalidVideo(_))));
}
