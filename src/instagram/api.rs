use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use tracing::debug;

use crate::download::Fetch;
use crate::error::{MetaError, Result};
use crate::instagram::PostResolver;
use crate::instagram::types::{GraphQlResponse, Post};

const GRAPHQL_URL: &str = "https://www.instagram.com/graphql/query";
const SHORTCODE_DOC_ID: &str = "8845758582119845";
const WEB_APP_ID: &str = "936619743392459";

/// Resolves posts through the public web GraphQL endpoint
pub struct GraphQlResolver {
    fetcher: Arc<dyn Fetch>,
}

impl GraphQlResolver {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self { fetcher }
    }
}

/// Decode a GraphQL body into a post
pub fn parse_post(body: &str) -> Result<Post> {
    let response: GraphQlResponse = serde_json::from_str(body)?;
    let media = response
        .data
        .and_then(|d| d.xdt_shortcode_media)
        .ok_or(MetaError::VideoNotFound)?;
    Ok(media.into())
}

#[async_trait]
impl PostResolver for GraphQlResolver {
    async fn resolve(&self, shortcode: &str) -> Result<Post> {
        let variables = serde_json::json!({
            "shortcode": shortcode,
            "fetch_tagged_user_count": null,
            "hoisted_comment_id": null,
            "hoisted_reply_id": null,
        })
        .to_string();
        let form = [
            ("variables", variables.as_str()),
            ("doc_id", SHORTCODE_DOC_ID),
        ];

        let mut headers = HeaderMap::new();
        headers.insert("X-IG-App-ID", HeaderValue::from_static(WEB_APP_ID));
        headers.insert(
            REFERER,
            HeaderValue::from_str(&format!("https://www.instagram.com/p/{shortcode}/"))?,
        );

        let page = self
            .fetcher
            .post_form(GRAPHQL_URL, &form, headers)
            .await?
            .ensure_success()?;
        debug!(shortcode, "instagram graphql response received");
        parse_post(&page.body)
    }
}
