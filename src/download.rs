use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::debug;

use crate::error::{MetaError, Result};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// A fetched HTTP response. Error statuses are returned as data, not errors.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub final_url: String,
    pub body: String,
}

impl Page {
    /// Only `200 OK` carries usable metadata; other 2xx codes count as failures
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Turn a non-200 page into `HttpError`
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(MetaError::HttpError {
                status: self.status,
                url: self.final_url,
            })
        }
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(MetaError::from)
    }
}

/// Outbound HTTP used by every extractor
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET a URL; `timeout` bounds the whole request when set
    async fn get(&self, url: &str, headers: HeaderMap, timeout: Option<Duration>) -> Result<Page>;

    /// POST an urlencoded form
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<Page>;
}

/// reqwest-backed fetcher sending a desktop browser user agent
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: HeaderValue,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            user_agent: HeaderValue::from_str(user_agent)?,
        })
    }

    /// Merge caller headers over the defaults
    fn headers(&self, additional: HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.extend(additional);
        headers
    }

    async fn execute(&self, url: &str, request: reqwest::RequestBuilder) -> Result<Page> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MetaError::RequestTimeout(url.to_string())
            } else {
                MetaError::NetworkError(e)
            }
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                MetaError::RequestTimeout(url.to_string())
            } else {
                MetaError::NetworkError(e)
            }
        })?;
        debug!(url, status, bytes = body.len(), "fetched");

        Ok(Page {
            status,
            final_url,
            body,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str, headers: HeaderMap, timeout: Option<Duration>) -> Result<Page> {
        let mut request = self.client.get(url).headers(self.headers(headers));
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        self.execute(url, request).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<Page> {
        let request = self.client.post(url).headers(self.headers(headers)).form(form);
        self.execute(url, request).await
    }
}
