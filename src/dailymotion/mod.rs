use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::core::{Extractor, Platform, Record, Value};
use crate::download::Fetch;
use crate::error::{MetaError, Result};
use crate::utils::format_epoch_local;

pub mod types;
pub mod utils;

pub use types::VideoResponse;
pub use utils::{is_dailymotion_short_url, parse_id};

/// Field allowlist requested from the public video endpoint
pub const FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "created_time",
    "modified_time",
    "duration",
    "views_total",
    "likes_total",
    "comments_total",
    "owner.username",
    "owner.id",
    "tags",
    "country",
    "explicit",
    "channel.name",
    "allow_embed",
    "aspect_ratio",
    "language",
    "thumbnail_720_url",
    "url",
    "status",
    "private",
    "rating",
    "ratings_total",
    "geoblocking",
    "custom_classification",
    "is_created_for_kids",
    "embed_url",
    "available_formats",
];

const NOT_AVAILABLE: &str = "N/A";

pub fn api_url(base: &str, video_id: &str) -> String {
    format!(
        "{}/video/{}?fields={}",
        base.trim_end_matches('/'),
        video_id,
        FIELDS.join(",")
    )
}

/// Dailymotion extractor backed by the public REST API
pub struct DailymotionExtractor {
    fetcher: Arc<dyn Fetch>,
    api_base: String,
}

impl DailymotionExtractor {
    pub fn new(fetcher: Arc<dyn Fetch>, api_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_base: api_base.into(),
        }
    }
}

fn text_or_na(value: &Option<String>) -> Value {
    Value::from(value.as_deref().unwrap_or(NOT_AVAILABLE))
}

fn joined(items: &Option<Vec<String>>) -> Value {
    items.as_ref().map(|v| v.join(", ")).into()
}

/// Missing counts read as zero; other shapes keep their JSON value
fn count(value: &Option<serde_json::Value>) -> Value {
    match value {
        None | Some(serde_json::Value::Null) => Value::Int(0),
        Some(other) => Value::from_json(other),
    }
}

fn number(value: &Option<serde_json::Value>) -> Value {
    value.as_ref().map_or(Value::Null, Value::from_json)
}

/// Epoch seconds given as an integer, a float or a numeric string
fn epoch(value: &Option<serde_json::Value>) -> Option<String> {
    let value = value.as_ref()?;
    let secs = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))?;
    format_epoch_local(secs)
}

/// Arrays of strings are comma-joined; other shapes keep their JSON form
fn joined_json(value: &Option<serde_json::Value>) -> Value {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
            .into(),
        Some(other) => Value::from_json(other),
        None => Value::Null,
    }
}

/// Flatten an API response into a record row
pub fn video_record(url: &str, video_id: &str, data: &VideoResponse) -> Record {
    let mut record = Record::new(Platform::Dailymotion, url);
    record.insert("Video ID", data.id.as_deref().unwrap_or(video_id));
    record.insert("Page URL", text_or_na(&data.url));
    record.insert("Title", text_or_na(&data.title));
    record.insert("Description", text_or_na(&data.description));
    record.insert("Created Time", epoch(&data.created_time));
    record.insert("Modified Time", epoch(&data.modified_time));
    record.insert("Duration", count(&data.duration));
    record.insert("Views", count(&data.views_total));
    record.insert("Likes", count(&data.likes_total));
    record.insert("Comments", count(&data.comments_total));
    record.insert("Owner Username", text_or_na(&data.owner_username));
    record.insert("Owner ID", text_or_na(&data.owner_id));
    record.insert("Tags", joined(&data.tags));
    record.insert("Country", text_or_na(&data.country));
    record.insert("Explicit", data.explicit);
    record.insert("Channel", text_or_na(&data.channel_name));
    record.insert("Allow Embed", data.allow_embed);
    record.insert("Aspect Ratio", number(&data.aspect_ratio));
    record.insert("Language", text_or_na(&data.language));
    record.insert("Thumbnail", text_or_na(&data.thumbnail_720_url));
    record.insert("Status", text_or_na(&data.status));
    record.insert("Private", data.private);
    record.insert("Rating", number(&data.rating));
    record.insert("Ratings Total", number(&data.ratings_total));
    record.insert("Geoblocking", joined_json(&data.geoblocking));
    record.insert("Classification", joined_json(&data.custom_classification));
    record.insert("Kids Content", data.is_created_for_kids);
    record.insert("Embed URL", text_or_na(&data.embed_url));
    record.insert("Available Formats", joined(&data.available_formats));
    record
}

#[async_trait]
impl Extractor for DailymotionExtractor {
    fn platform(&self) -> Platform {
        Platform::Dailymotion
    }

    async fn fetch(&self, url: &str) -> Result<Record> {
        let video_id = parse_id(url)?;
        debug!(
            url,
            video_id = %video_id,
            short_link = is_dailymotion_short_url(url),
            "resolved dailymotion id"
        );

        let page = self
            .fetcher
            .get(&api_url(&self.api_base, &video_id), HeaderMap::new(), None)
            .await?;
        if !page.is_success() {
            return Err(MetaError::ApiError(page.body));
        }

        let data: VideoResponse = page.json()?;
        Ok(video_record(url, &video_id, &data))
    }
}
