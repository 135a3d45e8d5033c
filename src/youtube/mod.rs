use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Extractor, Platform, Record};
use crate::error::Result;
use crate::utils::format_compact_date;

pub mod types;
pub mod ytdlp;

pub use types::{FormatInfo, Thumbnail, VideoInfo};
pub use ytdlp::YtDlp;

/// Anything able to produce a yt-dlp style info dictionary for a URL
#[async_trait]
pub trait VideoInfoResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<VideoInfo>;
}

/// YouTube extractor implementing the Extractor trait
pub struct YoutubeExtractor {
    resolver: Arc<dyn VideoInfoResolver>,
}

impl YoutubeExtractor {
    pub fn new(resolver: Arc<dyn VideoInfoResolver>) -> Self {
        Self { resolver }
    }
}

fn join(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flatten an info dictionary into a record row
pub fn info_record(url: &str, info: &VideoInfo) -> Record {
    let upload_date = info
        .upload_date
        .as_deref()
        .map_or_else(|| "N/A".to_string(), format_compact_date);

    Record::new(Platform::Youtube, url)
        .with("ID", info.id.clone())
        .with("Title", info.title.clone())
        .with("Description", info.description.clone())
        .with("Uploader", info.uploader.clone())
        .with("Upload Date", upload_date)
        .with("Duration (s)", info.duration.as_ref())
        .with("View Count", info.view_count)
        .with("Like Count", info.like_count)
        .with("Dislike Count", info.dislike_count)
        .with("Average Rating", info.average_rating)
        .with("Categories", join(info.categories.iter().flatten()))
        .with("Tags", join(info.tags.iter().flatten()))
        .with(
            "Formats",
            join(info.formats.iter().filter_map(|f| f.format.as_deref())),
        )
        .with(
            "Thumbnails",
            join(info.thumbnails.iter().filter_map(|t| t.url.as_deref())),
        )
}

#[async_trait]
impl Extractor for YoutubeExtractor {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    /// yt-dlp understands far more than YouTube, so any web URL is accepted
    fn matches(&self, url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://") || self.platform().matches(url)
    }

    async fn fetch(&self, url: &str) -> Result<Record> {
        let info = self.resolver.resolve(url).await?;
        Ok(info_record(url, &info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ERROR_COLUMN, Value};
    use crate::error::MetaError;

    struct FakeInfo(Option<&'static str>);

    #[async_trait]
    impl VideoInfoResolver for FakeInfo {
        async fn resolve(&self, _url: &str) -> Result<VideoInfo> {
            match self.0 {
                Some(json) => Ok(serde_json::from_str(json)?),
                None => Err(MetaError::CommandError(
                    "ERROR: [youtube] x: Video unavailable".to_string(),
                )),
            }
        }
    }

    const INFO: &str = r#"{
        "id": "dQw4w9WgXcQ",
        "title": "Never",
        "description": "desc",
        "uploader": "Rick",
        "upload_date": "20091025",
        "duration": 212,
        "view_count": 1000,
        "like_count": 10,
        "average_rating": null,
        "categories": ["Music"],
        "tags": ["a", "b"],
        "formats": [{"format_id": "18", "format": "18 - 640x360"}, {"format_id": "sb0"}],
        "thumbnails": [{"url": "https://i.ytimg.com/1.jpg"}, {"id": "x"}]
    }"#;

    #[tokio::test]
    async fn test_extract_info() {
        let extractor = YoutubeExtractor::new(Arc::new(FakeInfo(Some(INFO))));
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

        let record = extractor.extract(url).await;
        assert_eq!(record.get("Video URL"), Some(&Value::from(url)));
        assert_eq!(record.get("Upload Date"), Some(&Value::from("2009-10-25")));
        assert_eq!(record.get("Duration (s)"), Some(&Value::Int(212)));
        assert_eq!(record.get("Dislike Count"), Some(&Value::Null));
        assert_eq!(record.get("Categories"), Some(&Value::from("Music")));
        assert_eq!(record.get("Tags"), Some(&Value::from("a, b")));
        assert_eq!(record.get("Formats"), Some(&Value::from("18 - 640x360")));
        assert_eq!(
            record.get("Thumbnails"),
            Some(&Value::from("https://i.ytimg.com/1.jpg"))
        );
    }

    #[test]
    fn test_matches_any_web_url() {
        let extractor = YoutubeExtractor::new(Arc::new(FakeInfo(None)));
        assert!(extractor.matches("https://youtu.be/dQw4w9WgXcQ"));
        assert!(extractor.matches("https://vimeo.com/123"));
        assert!(extractor.matches("www.youtube.com/watch?v=x"));
        assert!(!extractor.matches("ftp://example.com/video"));
    }

    #[test]
    fn test_upload_date_passthrough_and_missing() {
        let info = VideoInfo {
            upload_date: Some("2009-10".to_string()),
            ..VideoInfo::default()
        };
        let record = info_record("u", &info);
        assert_eq!(record.get("Upload Date"), Some(&Value::from("2009-10")));
        assert_eq!(record.get("Categories"), Some(&Value::from("")));

        let record = info_record("u", &VideoInfo::default());
        assert_eq!(record.get("Upload Date"), Some(&Value::from("N/A")));
    }

    #[tokio::test]
    async fn test_resolver_error_text_kept() {
        let extractor = YoutubeExtractor::new(Arc::new(FakeInfo(None)));
        let record = extractor.extract("https://youtu.be/x").await;
        assert_eq!(
            record.get(ERROR_COLUMN),
            Some(&Value::from(
                "External command failed: ERROR: [youtube] x: Video unavailable"
            ))
        );
    }
}
