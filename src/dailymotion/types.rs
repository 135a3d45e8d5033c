use serde::Deserialize;
use serde_json::Value as Json;

/// Response of `GET /video/{id}` restricted to [`FIELDS`](super::FIELDS).
///
/// Numeric fields stay as raw JSON so one oddly typed value only affects its own cell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoResponse {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_time: Option<Json>,
    pub modified_time: Option<Json>,
    pub duration: Option<Json>,
    pub views_total: Option<Json>,
    pub likes_total: Option<Json>,
    pub comments_total: Option<Json>,
    #[serde(rename = "owner.username")]
    pub owner_username: Option<String>,
    #[serde(rename = "owner.id")]
    pub owner_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub country: Option<String>,
    pub explicit: Option<bool>,
    #[serde(rename = "channel.name")]
    pub channel_name: Option<String>,
    pub allow_embed: Option<bool>,
    pub aspect_ratio: Option<Json>,
    pub language: Option<String>,
    pub thumbnail_720_url: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub private: Option<bool>,
    pub rating: Option<Json>,
    pub ratings_total: Option<Json>,
    pub geoblocking: Option<Json>,
    pub custom_classification: Option<Json>,
    pub is_created_for_kids: Option<bool>,
    pub embed_url: Option<String>,
    pub available_formats: Option<Vec<String>>,
}
