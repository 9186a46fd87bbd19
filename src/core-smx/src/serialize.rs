//! Serialization of a single entry into a `<url>` block.

use crate::entry::{Image, News, UrlEntry, Video};
use crate::errors::{Result, SitemapError};
use crate::xml_builder::XmlBuilder;

/// Longest video duration the protocol accepts, in seconds.
const MAX_VIDEO_DURATION: u32 = 28_800;

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Priorities always carry a fractional part: `1.0`, `0.5`, `0.25`.
pub fn format_priority(priority: f32) -> String {
    let plain = format!("{}", priority);
    if plain.contains('.') {
        plain
    } else {
        format!("{:.1}", priority)
    }
}

/// Writes one `<url>` block for an already normalized entry.
///
/// # Errors
///
/// Returns an error if the entry has no URL, its priority is out of range, or one of
/// its video/news blocks is incomplete.
pub fn write_url_entry(builder: &mut XmlBuilder, entry: &UrlEntry) -> Result<()> {
    if entry.url.trim().is_empty() {
        return Err(SitemapError::InvalidEntry("entry has no url".to_string()));
    }

    builder.open("url", &[])?;

    if entry.cdata {
        builder.cdata_element("loc", &entry.url)?;
    } else {
        builder.text_element("loc", &entry.url)?;
    }

    if let Some(lastmod) = &entry.lastmod {
        builder.text_element("lastmod", lastmod)?;
    }
    if let Some(changefreq) = &entry.changefreq {
        builder.text_element("changefreq", changefreq.as_str())?;
    }
    if let Some(priority) = entry.priority {
        if !(0.0..=1.0).contains(&priority) {
            return Err(SitemapError::InvalidPriority(priority));
        }
        builder.text_element("priority", &format_priority(priority))?;
    }

    for image in &entry.images {
        write_image(builder, image)?;
    }
    for video in &entry.videos {
        write_video(builder, video)?;
    }
    for link in &entry.links {
        builder.empty(
            "xhtml:link",
            &[("rel", "alternate"), ("hreflang", link.lang.as_str()), ("href", link.url.as_str())],
        )?;
    }
    if let Some(amp) = &entry.amp_link {
        builder.empty("xhtml:link", &[("rel", "amphtml"), ("href", amp.as_str())])?;
    }
    if let Some(android) = &entry.android_link {
        builder.empty("xhtml:link", &[("rel", "alternate"), ("href", android.as_str())])?;
    }
    if entry.mobile {
        builder.empty("mobile:mobile", &[])?;
    }
    if let Some(news) = &entry.news {
        write_news(builder, news)?;
    }
    if let Some(expires) = &entry.expires {
        builder.text_element("expires", expires)?;
    }

    builder.close("url")
}

fn write_image(builder: &mut XmlBuilder, image: &Image) -> Result<()> {
    builder.open("image:image", &[])?;
    builder.text_element("image:loc", &image.url)?;
    if let Some(caption) = &image.caption {
        builder.text_element("image:caption", caption)?;
    }
    if let Some(geo) = &image.geo_location {
        builder.text_element("image:geo_location", geo)?;
    }
    if let Some(title) = &image.title {
        builder.text_element("image:title", title)?;
    }
    if let Some(license) = &image.license {
        builder.text_element("image:license", license)?;
    }
    builder.close("image:image")
}

fn validate_video(video: &Video) -> Result<()> {
    for (name, value) in [
        ("thumbnail_loc", &video.thumbnail_loc),
        ("title", &video.title),
        ("description", &video.description),
    ] {
        if value.trim().is_empty() {
            return Err(SitemapError::InvalidVideo(format!("missing required field '{}'", name)));
        }
    }
    if let Some(rating) = video.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(SitemapError::InvalidVideo(format!("rating must be between 0 and 5, got {}", rating)));
        }
    }
    if let Some(duration) = video.duration {
        if duration > MAX_VIDEO_DURATION {
            return Err(SitemapError::InvalidVideo(format!(
                "duration must be at most {} seconds, got {}",
                MAX_VIDEO_DURATION, duration
            )));
        }
    }
    Ok(())
}

fn write_video(builder: &mut XmlBuilder, video: &Video) -> Result<()> {
    validate_video(video)?;

    builder.open("video:video", &[])?;
    builder.text_element("video:thumbnail_loc", &video.thumbnail_loc)?;
    builder.text_element("video:title", &video.title)?;
    builder.text_element("video:description", &video.description)?;

    if let Some(content_loc) = &video.content_loc {
        builder.text_element("video:content_loc", content_loc)?;
    }
    if let Some(player_loc) = &video.player_loc {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(allow_embed) = video.player_loc_allow_embed {
            attrs.push(("allow_embed", yes_no(allow_embed)));
        }
        if let Some(autoplay) = &video.player_loc_autoplay {
            attrs.push(("autoplay", autoplay.as_str()));
        }
        builder.text_element_with("video:player_loc", &attrs, player_loc)?;
    }
    if let Some(duration) = video.duration {
        builder.text_element("video:duration", &duration.to_string())?;
    }
    if let Some(expiration) = &video.expiration_date {
        builder.text_element("video:expiration_date", expiration)?;
    }
    if let Some(rating) = video.rating {
        builder.text_element("video:rating", &rating.to_string())?;
    }
    if let Some(views) = video.view_count {
        builder.text_element("video:view_count", &views.to_string())?;
    }
    if let Some(published) = &video.publication_date {
        builder.text_element("video:publication_date", published)?;
    }
    if let Some(family_friendly) = video.family_friendly {
        builder.text_element("video:family_friendly", yes_no(family_friendly))?;
    }
    if let Some(restriction) = &video.restriction {
        let relationship = video.restriction_relationship.as_deref().unwrap_or("allow");
        builder.text_element_with("video:restriction", &[("relationship", relationship)], restriction)?;
    }
    if let Some(platform) = &video.platform {
        let relationship = video.platform_relationship.as_deref().unwrap_or("allow");
        builder.text_element_with("video:platform", &[("relationship", relationship)], platform)?;
    }
    if let Some(price) = &video.price {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(currency) = &video.price_currency {
            attrs.push(("currency", currency.as_str()));
        }
        if let Some(price_type) = &video.price_type {
            attrs.push(("type", price_type.as_str()));
        }
        if let Some(resolution) = &video.price_resolution {
            attrs.push(("resolution", resolution.as_str()));
        }
        builder.text_element_with("video:price", &attrs, price)?;
    }
    if let Some(requires) = video.requires_subscription {
        builder.text_element("video:requires_subscription", yes_no(requires))?;
    }
    if let Some(uploader) = &video.uploader {
        match &video.uploader_info {
            Some(info) => builder.text_element_with("video:uploader", &[("info", info.as_str())], uploader)?,
            None => builder.text_element("video:uploader", uploader)?,
        }
    }
    if let Some(live) = video.live {
        builder.text_element("video:live", yes_no(live))?;
    }
    for tag in &video.tags {
        builder.text_element("video:tag", tag)?;
    }
    if let Some(category) = &video.category {
        builder.text_element("video:category", category)?;
    }
    if let Some(gallery) = &video.gallery_loc {
        match &video.gallery_loc_title {
            Some(title) => builder.text_element_with("video:gallery_loc", &[("title", title.as_str())], gallery)?,
            None => builder.text_element("video:gallery_loc", gallery)?,
        }
    }
    if let Some(id) = &video.id {
        builder.text_element("video:id", id)?;
    }

    builder.close("video:video")
}

fn write_news(builder: &mut XmlBuilder, news: &News) -> Result<()> {
    for (name, value) in [
        ("publication_name", &news.publication_name),
        ("publication_language", &news.publication_language),
        ("publication_date", &news.publication_date),
        ("title", &news.title),
    ] {
        if value.trim().is_empty() {
            return Err(SitemapError::InvalidNews(format!("missing required field '{}'", name)));
        }
    }

    builder.open("news:news", &[])?;
    builder.open("news:publication", &[])?;
    builder.text_element("news:name", &news.publication_name)?;
    builder.text_element("news:language", &news.publication_language)?;
    builder.close("news:publication")?;
    if let Some(access) = &news.access {
        builder.text_element("news:access", access.as_str())?;
    }
    if let Some(genres) = &news.genres {
        builder.text_element("news:genres", genres)?;
    }
    builder.text_element("news:publication_date", &news.publication_date)?;
    builder.text_element("news:title", &news.title)?;
    if let Some(keywords) = &news.keywords {
        builder.text_element("news:keywords", keywords)?;
    }
    if let Some(tickers) = &news.stock_tickers {
        builder.text_element("news:stock_tickers", tickers)?;
    }
    builder.close("news:news")
}
