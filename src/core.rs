use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
pub use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

use crate::error::Result;

/// Column carrying the failure description of an error record
pub const ERROR_COLUMN: &str = "Error";

/// Supported platforms
#[derive(
    EnumIter, EnumString, Display, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Instagram,
    Youtube,
    Dailymotion,
    Sharechat,
}

impl Platform {
    /// Column that echoes the requested URL in every record of this platform
    pub fn url_column(&self) -> &'static str {
        match self {
            Platform::Tiktok | Platform::Instagram => "URL",
            Platform::Youtube | Platform::Dailymotion | Platform::Sharechat => "Video URL",
        }
    }

    pub fn export_filename(&self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok_metadata.csv",
            Platform::Instagram => "reel_metadata.csv",
            Platform::Youtube => "youtube_metadata.csv",
            Platform::Dailymotion => "dailymotion_metadata.csv",
            Platform::Sharechat => "sharechat_metadata.csv",
        }
    }

    /// TikTok pages are fetched one at a time; everything else fans out.
    pub fn default_workers(&self) -> usize {
        match self {
            Platform::Tiktok => 1,
            _ => 10,
        }
    }

    /// Guess the platform from a URL's domain
    pub fn detect(url: &str) -> Option<Platform> {
        Platform::iter().find(|p| p.matches(url))
    }

    pub fn matches(&self, url: &str) -> bool {
        let Some(host) = host_of(url) else {
            return false;
        };
        let on = |domain: &str| host == domain || host.ends_with(&format!(".{domain}"));
        match self {
            Platform::Tiktok => on("tiktok.com"),
            Platform::Instagram => on("instagram.com"),
            Platform::Youtube => on("youtube.com") || on("youtu.be"),
            Platform::Dailymotion => on("dailymotion.com") || on("dai.ly"),
            Platform::Sharechat => on("sharechat.com"),
        }
    }
}

fn host_of(url: &str) -> Option<String> {
    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    url::Url::parse(&normalized)
        .ok()?
        .host_str()
        .map(|h| h.to_ascii_lowercase())
}

/// A single metadata cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lossy conversion from an arbitrary JSON value; containers become their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.into(),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&serde_json::Number> for Value {
    fn from(n: &serde_json::Number) -> Self {
        match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Flat result of one extraction attempt for one URL
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub platform: Platform,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create a record seeded with the platform's URL column
    pub fn new(platform: Platform, url: &str) -> Self {
        Self {
            platform,
            fields: vec![(platform.url_column().to_string(), Value::from(url))],
        }
    }

    /// Create an error record carrying only the URL and the failure description
    pub fn error(platform: Platform, url: &str, message: impl Into<String>) -> Self {
        Self::new(platform, url).with(ERROR_COLUMN, Value::Text(message.into()))
    }

    /// Set a field, replacing any previous value under the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn url(&self) -> Option<&str> {
        self.get(self.platform.url_column()).and_then(Value::as_str)
    }

    pub fn is_error(&self) -> bool {
        self.get(ERROR_COLUMN).is_some_and(|v| !v.is_null())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Trait for pulling metadata for a single URL from one platform
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Get platform identifier
    fn platform(&self) -> Platform;

    /// Check if the URL is supported by this extractor
    fn matches(&self, url: &str) -> bool {
        self.platform().matches(url)
    }

    /// Resolve one URL, surfacing any failure as an error
    async fn fetch(&self, url: &str) -> Result<Record>;

    /// Resolve one URL; failures become error records and never escape
    async fn extract(&self, url: &str) -> Record {
        match self.fetch(url).await {
            Ok(record) => record,
            Err(e) => {
                warn!(platform = %self.platform(), url, error = %e, "extraction failed");
                Record::error(self.platform(), url, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_platform_detect() {
        assert_eq!(
            Platform::detect("https://www.tiktok.com/@user/video/123"),
            Some(Platform::Tiktok)
        );
        assert_eq!(Platform::detect("https://dai.ly/x1abcde"), Some(Platform::Dailymotion));
        assert_eq!(Platform::detect("youtu.be/dQw4w9WgXcQ"), Some(Platform::Youtube));
        assert_eq!(
            Platform::detect("https://www.instagram.com/reel/Cabc123/"),
            Some(Platform::Instagram)
        );
        assert_eq!(Platform::detect("https://example.com/video"), None);
        assert_eq!(Platform::detect("https://nottiktok.com/x"), None);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!(Platform::from_str("sharechat").unwrap(), Platform::Sharechat);
        assert_eq!(Platform::from_str("YouTube").unwrap(), Platform::Youtube);
        assert!(Platform::from_str("vimeo").is_err());
        assert_eq!(Platform::Dailymotion.to_string(), "dailymotion");
    }

    #[test]
    fn test_record_insert_replaces_in_place() {
        let mut record = Record::new(Platform::Youtube, "https://youtu.be/x");
        record.insert("Title", "a");
        record.insert("Views", 3i64);
        record.insert("Title", "b");
        let keys: Vec<_> = record.keys().collect();
        assert_eq!(keys, vec!["Video URL", "Title", "Views"]);
        assert_eq!(record.get("Title"), Some(&Value::from("b")));
        assert!(!record.is_error());
    }

    #[test]
    fn test_error_record() {
        let record = Record::error(Platform::Sharechat, "https://sharechat.com/v", "HTTP Error: 404");
        assert!(record.is_error());
        assert_eq!(record.url(), Some("https://sharechat.com/v"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::Float(4.5).to_string(), "4.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from_json(&serde_json::json!(12)), Value::Int(12));
        assert_eq!(Value::from_json(&serde_json::json!(["a"])), Value::from(r#"["a"]"#));
    }

    struct Static(Platform);

    #[async_trait]
    impl Extractor for Static {
        fn platform(&self) -> Platform {
            self.0
        }

        async fn fetch(&self, url: &str) -> Result<Record> {
            Ok(Record::new(self.0, url))
        }
    }

    #[test]
    fn test_extractor_matches_platform_domain() {
        let extractor = Static(Platform::Sharechat);
        assert!(extractor.matches("https://sharechat.com/video/abc"));
        assert!(extractor.matches("sharechat.com/video/abc"));
        assert!(!extractor.matches("https://www.tiktok.com/@u/video/1"));
        assert!(!extractor.matches("https://notsharechat.com/video/abc"));
    }
}
