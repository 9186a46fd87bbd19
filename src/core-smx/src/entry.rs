//! Sitemap entry data model.
//!
//! Entries arrive either as bare URL strings or as structured records. Loosely shaped
//! fields (`images` may be a string, a single object or a list) are folded into their
//! canonical list form during deserialization so that rendering never inspects shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// How frequently the page is likely to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl std::fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangeFreq {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "always" => Ok(ChangeFreq::Always),
            "hourly" => Ok(ChangeFreq::Hourly),
            "daily" => Ok(ChangeFreq::Daily),
            "weekly" => Ok(ChangeFreq::Weekly),
            "monthly" => Ok(ChangeFreq::Monthly),
            "yearly" => Ok(ChangeFreq::Yearly),
            "never" => Ok(ChangeFreq::Never),
            _ => Err(format!("Invalid change frequency: {}", input)),
        }
    }
}

/// An image attached to a page (`<image:image>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// An alternate-language version of a page (`<xhtml:link rel="alternate" hreflang=..>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub lang: String,
    pub url: String,
}

impl Link {
    pub fn new(lang: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            url: url.into(),
        }
    }
}

/// Access restriction of a news article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsAccess {
    Registration,
    Subscription,
}

impl NewsAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsAccess::Registration => "Registration",
            NewsAccess::Subscription => "Subscription",
        }
    }
}

/// A Google News block (`<news:news>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct News {
    pub publication_name: String,
    pub publication_language: String,
    pub publication_date: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<NewsAccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_tickers: Option<String>,
}

/// A video embedded on a page (`<video:video>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_loc_allow_embed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_loc_autoplay: Option<String>,
    /// Seconds, between 0 and 28800.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// Between 0.0 and 5.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_friendly: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction_relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_loc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_loc_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_subscription: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One URL plus its optional protocol metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlEntry {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(default, alias = "img", skip_serializing_if = "Vec::is_empty", deserialize_with = "images")]
    pub images: Vec<Image>,
    #[serde(default, alias = "video", skip_serializing_if = "Vec::is_empty", deserialize_with = "one_or_many")]
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amp_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub android_link: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mobile: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news: Option<News>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    /// Wrap `<loc>` in a CDATA section instead of escaping it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cdata: bool,
}

impl UrlEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = Some(lastmod.into());
        self
    }

    pub fn changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    pub fn video(mut self, video: Video) -> Self {
        self.videos.push(video);
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn news(mut self, news: News) -> Self {
        self.news = Some(news);
        self
    }
}

impl From<&str> for UrlEntry {
    fn from(url: &str) -> Self {
        UrlEntry::new(url)
    }
}

impl From<String> for UrlEntry {
    fn from(url: String) -> Self {
        UrlEntry::new(url)
    }
}

/// Entry as supplied by callers: a bare URL or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Url(String),
    Record(UrlEntry),
}

impl From<RawEntry> for UrlEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Url(url) => UrlEntry::new(url),
            RawEntry::Record(entry) => entry,
        }
    }
}

impl From<&str> for RawEntry {
    fn from(url: &str) -> Self {
        RawEntry::Url(url.to_string())
    }
}

impl From<UrlEntry> for RawEntry {
    fn from(entry: UrlEntry) -> Self {
        RawEntry::Record(entry)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    OneOrMany::<T>::deserialize(deserializer).map(Vec::from)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageShape {
    Url(String),
    Record(Image),
}

/// `images` accepts a URL string, a single image record, or a list mixing both.
fn images<'de, D>(deserializer: D) -> Result<Vec<Image>, D::Error>
where
    D: Deserializer<'de>,
{
    let shapes: Vec<ImageShape> = one_or_many(deserializer)?;
    Ok(shapes
        .into_iter()
        .map(|shape| match shape {
            ImageShape::Url(url) => Image::new(url),
            ImageShape::Record(image) => image,
        })
        .collect())
}
