use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use crate::core::{ERROR_COLUMN, Extractor, Platform, Record, Value};
use crate::download::Fetch;
use crate::error::{MetaError, Result};
use crate::utils::format_epoch_ist;

pub const PLAY_COUNT: &str = "Play Count";
pub const CREATE_TIME: &str = "Create Time (IST)";

static PLAY_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""playCount":(\d+),"#).expect("static regex"));
static CREATE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""createTime":"?(\d+)"?,"#).expect("static regex"));

/// Fields scraped out of the inline JSON of a TikTok video page
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageStats {
    pub play_count: Option<String>,
    pub create_time: Option<i64>,
}

/// Locate play count and creation time in raw page HTML
pub fn parse_page(html: &str) -> PageStats {
    let play_count = PLAY_COUNT_RE
        .captures(html)
        .map(|c| c[1].to_string());
    let create_time = CREATE_TIME_RE
        .captures(html)
        .and_then(|c| c[1].parse::<i64>().ok());
    PageStats {
        play_count,
        create_time,
    }
}

/// TikTok extractor: regex over the video page HTML
pub struct TiktokExtractor {
    fetcher: Arc<dyn Fetch>,
    timeout: Option<Duration>,
}

impl TiktokExtractor {
    pub fn new(fetcher: Arc<dyn Fetch>, timeout: Option<Duration>) -> Self {
        Self { fetcher, timeout }
    }

    /// Record with both data columns present but empty
    fn blank(url: &str) -> Record {
        Record::new(Platform::Tiktok, url)
            .with(PLAY_COUNT, Value::Null)
            .with(CREATE_TIME, Value::Null)
    }
}

#[async_trait]
impl Extractor for TiktokExtractor {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    async fn fetch(&self, url: &str) -> Result<Record> {
        let page = self
            .fetcher
            .get(url, HeaderMap::new(), self.timeout)
            .await?
            .ensure_success()?;

        let stats = parse_page(&page.body);
        debug!(url, ?stats, "parsed tiktok page");
        if stats.play_count.is_none() && stats.create_time.is_none() {
            return Err(MetaError::MetadataNotFound);
        }

        Ok(Self::blank(url)
            .with(PLAY_COUNT, stats.play_count)
            .with(CREATE_TIME, stats.create_time.and_then(format_epoch_ist)))
    }

    /// Failures keep the two data columns so TikTok tables stay rectangular
    async fn extract(&self, url: &str) -> Record {
        match self.fetch(url).await {
            Ok(record) => record,
            Err(e) => {
                warn!(url, error = %e, "tiktok extraction failed");
                Self::blank(url).with(ERROR_COLUMN, e.to_string())
            }
        }
    }
}
