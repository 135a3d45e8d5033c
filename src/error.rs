use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetaError {
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timeout for URL: {0}")]
    RequestTimeout(String),

    #[error("HTTP Error: {status}")]
    HttpError { status: u16, url: String },

    #[error("API Error: {0}")]
    ApiError(String),

    #[error("Invalid {0} URL format")]
    InvalidUrl(String),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Metadata not found in page")]
    MetadataNotFound,

    #[error("Video not found or unavailable")]
    VideoNotFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("External command failed: {0}")]
    CommandError(String),

    #[error("Invalid header value: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    #[error("CSV export failed: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MetaError>;
