use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MetaError, Result};
use crate::youtube::VideoInfoResolver;
use crate::youtube::types::VideoInfo;

/// Runs the `yt-dlp` program in metadata-only mode
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
}

impl YtDlp {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args([
            "--dump-single-json",
            "--skip-download",
            "--no-warnings",
            "--no-playlist",
            "--quiet",
        ])
        .arg(url)
        .kill_on_drop(true);
        cmd
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl VideoInfoResolver for YtDlp {
    async fn resolve(&self, url: &str) -> Result<VideoInfo> {
        let output = self.command(url).output().await.map_err(|e| {
            MetaError::CommandError(format!("{}: {e}", self.binary.display()))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MetaError::CommandError(stderr.trim().to_string()));
        }

        debug!(url, bytes = output.stdout.len(), "yt-dlp returned info json");
        serde_json::from_slice(&output.stdout).map_err(MetaError::from)
    }
}
