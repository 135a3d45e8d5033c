pub mod config;
pub mod core;
pub mod dailymotion;
pub mod dispatch;
pub mod download;
pub mod error;
pub mod export;
pub mod instagram;
pub mod sharechat;
pub mod tiktok;
pub mod utils;
pub mod youtube;

use std::sync::Arc;

pub use config::Config;
pub use crate::core::{Extractor, Platform, Record, Value};
pub use dailymotion::DailymotionExtractor;
pub use dispatch::run_batch;
pub use download::{Fetch, HttpFetcher, Page};
use error::Result;
pub use export::ExportTable;
pub use instagram::InstagramExtractor;
pub use sharechat::SharechatExtractor;
pub use tiktok::TiktokExtractor;
pub use utils::parse_batch;
pub use youtube::YoutubeExtractor;

/// Build the extractor for a platform on top of a shared fetcher
pub fn build_extractor(
    platform: Platform,
    config: &Config,
    fetcher: Arc<dyn Fetch>,
) -> Box<dyn Extractor> {
    match platform {
        Platform::Tiktok => Box::new(TiktokExtractor::new(fetcher, config.tiktok_timeout)),
        Platform::Instagram => Box::new(InstagramExtractor::new(Arc::new(
            instagram::GraphQlResolver::new(fetcher),
        ))),
        Platform::Youtube => Box::new(YoutubeExtractor::new(Arc::new(youtube::YtDlp::new(
            config.ytdlp_path.clone(),
        )))),
        Platform::Dailymotion => Box::new(DailymotionExtractor::new(
            fetcher,
            config.dailymotion_api.clone(),
        )),
        Platform::Sharechat => Box::new(SharechatExtractor::new(fetcher)),
    }
}

/// Resolve every URL of a batch for one platform, in input order
pub async fn process_with_progress<F>(
    platform: Platform,
    urls: &[String],
    config: &Config,
    on_progress: F,
) -> Result<Vec<Record>>
where
    F: FnMut(usize, usize),
{
    let fetcher = Arc::new(HttpFetcher::new(&config.user_agent, config.connect_timeout)?);
    let extractor = build_extractor(platform, config, fetcher);
    let records = run_batch(
        urls,
        extractor.as_ref(),
        config.workers_for(platform),
        on_progress,
    )
    .await;
    Ok(records)
}

pub async fn process(platform: Platform, urls: &[String], config: &Config) -> Result<Vec<Record>> {
    process_with_progress(platform, urls, config, |_, _| {}).await
}
