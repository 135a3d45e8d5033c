use std::path::PathBuf;
use std::time::Duration;

use crate::core::Platform;
use crate::download::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_USER_AGENT};

pub const DEFAULT_DAILYMOTION_API: &str = "https://api.dailymotion.com";
pub const DEFAULT_TIKTOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime settings shared by every extractor of a batch
#[derive(Debug, Clone)]
pub struct Config {
    /// Concurrent workers; `None` uses the platform default
    pub workers: Option<usize>,
    /// Per-request ceiling for TikTok page fetches
    pub tiktok_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub dailymotion_api: String,
    /// yt-dlp executable, looked up on PATH by default
    pub ytdlp_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: None,
            tiktok_timeout: Some(DEFAULT_TIKTOK_TIMEOUT),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dailymotion_api: DEFAULT_DAILYMOTION_API.to_string(),
            ytdlp_path: PathBuf::from("yt-dlp"),
        }
    }
}

impl Config {
    pub fn workers_for(&self, platform: Platform) -> usize {
        self.workers.unwrap_or_else(|| platform.default_workers()).max(1)
    }
}
