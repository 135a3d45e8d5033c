//! ShareChat pages expose Open Graph preview tags, and the upload date only
//! inside a JSON-LD `VideoObject` block.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use scraper::{Html, Selector};
use serde_json::Value as Json;
use tracing::debug;

use crate::core::{Extractor, Platform, Record};
use crate::download::Fetch;
use crate::error::Result;

const NOT_AVAILABLE: &str = "N/A";

static LD_JSON: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector")
});

/// Preview metadata scraped from one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub url: Option<String>,
    pub upload_date: Option<String>,
}

fn og_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}

/// First `uploadDate` of a `VideoObject`, accepting an object or an array of objects
fn video_upload_date(block: &Json) -> Option<String> {
    let candidates: Vec<&Json> = match block {
        Json::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    candidates
        .into_iter()
        .filter(|c| c.get("@type").and_then(Json::as_str) == Some("VideoObject"))
        .find_map(|c| c.get("uploadDate").and_then(Json::as_str))
        .map(str::to_string)
}

pub fn parse_page(html: &str) -> PageMeta {
    let document = Html::parse_document(html);

    let upload_date = document.select(&LD_JSON).find_map(|script| {
        let text = script.text().collect::<String>();
        if text.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Json>(&text) {
            Ok(block) => video_upload_date(&block),
            Err(e) => {
                debug!(error = %e, "skipping malformed ld+json block");
                None
            }
        }
    });

    PageMeta {
        title: og_content(&document, "og:title"),
        description: og_content(&document, "og:description"),
        image: og_content(&document, "og:image"),
        video: og_content(&document, "og:video"),
        url: og_content(&document, "og:url"),
        upload_date,
    }
}

/// ShareChat extractor implementing the Extractor trait
pub struct SharechatExtractor {
    fetcher: Arc<dyn Fetch>,
}

impl SharechatExtractor {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Extractor for SharechatExtractor {
    fn platform(&self) -> Platform {
        Platform::Sharechat
    }

    async fn fetch(&self, url: &str) -> Result<Record> {
        let page = self
            .fetcher
            .get(url, HeaderMap::new(), None)
            .await?
            .ensure_success()?;
        let meta = parse_page(&page.body);
        let or_na = |v: Option<String>| v.unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Ok(Record::new(Platform::Sharechat, url)
            .with("Title", or_na(meta.title))
            .with("Description", or_na(meta.description))
            .with("Thumbnail", or_na(meta.image))
            .with("Video Link", or_na(meta.video))
            .with("Page URL", or_na(meta.url))
            .with("Upload Date", or_na(meta.upload_date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ERROR_COLUMN, Value};
    use crate::download::testing::FakeFetcher;

    const PAGE: &str = r#"<html><head>
        <meta property="og:title" content="Festival dance">
        <meta property="og:description" content="Watch now">
        <meta property="og:image" content="https://cdn.sharechat.com/thumb.jpg">
        <meta property="og:video" content="https://cdn.sharechat.com/v.mp4">
        <meta property="og:url" content="https://sharechat.com/video/abc">
        <script type="application/ld+json">{not json</script>
        <script type="application/ld+json">{"@type":"Organization","name":"ShareChat"}</script>
        <script type="application/ld+json">[{"@type":"BreadcrumbList"},{"@type":"VideoObject","uploadDate":"2024-03-01T10:00:00Z"}]</script>
    </head><body></body></html>"#;

    #[test]
    fn test_parse_page() {
        let meta = parse_page(PAGE);
        assert_eq!(meta.title.as_deref(), Some("Festival dance"));
        assert_eq!(meta.video.as_deref(), Some("https://cdn.sharechat.com/v.mp4"));
        assert_eq!(meta.url.as_deref(), Some("https://sharechat.com/video/abc"));
        assert_eq!(meta.upload_date.as_deref(), Some("2024-03-01T10:00:00Z"));
    }

    #[test]
    fn test_parse_page_single_object_block() {
        let html = r#"<script type="application/ld+json">{"@type":"VideoObject","uploadDate":"2023-01-02"}</script>"#;
        assert_eq!(parse_page(html).upload_date.as_deref(), Some("2023-01-02"));
    }

    #[tokio::test]
    async fn test_extract_defaults_to_sentinel() {
        let url = "https://sharechat.com/video/bare";
        let fetcher = FakeFetcher::default().with_page(url, 200, "<html><head></head></html>");
        let extractor = SharechatExtractor::new(Arc::new(fetcher));

        let record = extractor.extract(url).await;
        assert!(!record.is_error());
        assert_eq!(record.get("Title"), Some(&Value::from("N/A")));
        assert_eq!(record.get("Upload Date"), Some(&Value::from("N/A")));
    }

    #[tokio::test]
    async fn test_extract_http_error() {
        let url = "https://sharechat.com/video/gone";
        let fetcher = FakeFetcher::default().with_page(url, 404, "not found");
        let extractor = SharechatExtractor::new(Arc::new(fetcher));

        let record = extractor.extract(url).await;
        assert_eq!(record.get(ERROR_COLUMN), Some(&Value::from("HTTP Error: 404")));
        assert_eq!(record.len(), 2);
    }

    #[tokio::test]
    async fn test_extract_no_content_is_error() {
        let url = "https://sharechat.com/video/empty";
        let fetcher = FakeFetcher::default().with_page(url, 204, "");
        let extractor = SharechatExtractor::new(Arc::new(fetcher));

        let record = extractor.extract(url).await;
        assert!(record.is_error());
        assert_eq!(record.get(ERROR_COLUMN), Some(&Value::from("HTTP Error: 204")));
        assert_eq!(record.get("Title"), None);
    }
}
