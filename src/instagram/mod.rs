use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Extractor, Platform, Record};
use crate::error::Result;
use crate::utils::format_epoch_utc;

pub mod api;
pub mod types;
pub mod utils;

pub use api::GraphQlResolver;
pub use types::{Location, Post, TaggedUser};
pub use utils::{caption_hashtags, caption_mentions, parse_shortcode};

pub const NOT_A_VIDEO: &str = "Not a video";
pub const NO_LOCATION: &str = "No location";

/// Anything able to look up a post by shortcode
#[async_trait]
pub trait PostResolver: Send + Sync {
    async fn resolve(&self, shortcode: &str) -> Result<Post>;
}

/// Instagram reel/post extractor implementing the Extractor trait
pub struct InstagramExtractor {
    resolver: Arc<dyn PostResolver>,
}

impl InstagramExtractor {
    pub fn new(resolver: Arc<dyn PostResolver>) -> Self {
        Self { resolver }
    }
}

/// Flatten a resolved post into a record row
pub fn post_record(url: &str, post: &Post) -> Record {
    let caption = post.caption.clone().unwrap_or_default();
    let tagged: Vec<&str> = post.tagged_users.iter().map(TaggedUser::username).collect();

    Record::new(Platform::Instagram, url)
        .with("Owner Username", post.owner_username.as_str())
        .with(
            "Profile URL",
            format!("https://www.instagram.com/{}/", post.owner_username),
        )
        .with("Caption", caption.as_str())
        .with("Hashtags", caption_hashtags(&caption).join(", "))
        .with("Mentions", caption_mentions(&caption).join(", "))
        .with(
            "Timestamp (UTC)",
            post.timestamp.and_then(|t| format_epoch_utc(t.timestamp())),
        )
        .with("Views", post.video_view_count)
        .with("Likes", post.likes)
        .with("Comments", post.comments)
        .with("Tagged Users", tagged.join(", "))
        .with(
            "Video URL",
            match (&post.video_url, post.is_video) {
                (Some(link), true) => link.as_str(),
                _ => NOT_A_VIDEO,
            },
        )
        .with("Post Type", post.typename.as_str())
        .with(
            "Location",
            post.location
                .as_ref()
                .map_or(NO_LOCATION, |l| l.name.as_str()),
        )
}

#[async_trait]
impl Extractor for InstagramExtractor {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn fetch(&self, url: &str) -> Result<Record> {
        let shortcode = parse_shortcode(url)?;
        let post = self.resolver.resolve(&shortcode).await?;
        Ok(post_record(url, &post))
    }
}
