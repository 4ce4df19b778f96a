use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid API base URL {url}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid endpoint {path}: {source}")]
    Endpoint {
        path: String,
        source: url::ParseError,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
