use thiserror::Error;

/// Connection-level failure: the request never reached the server or no
/// response was obtainable. Always a retry candidate.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("request failed after {retries} retries: {source}")]
    RetriesExhausted {
        retries: u32,
        #[source]
        source: TransportError,
    },

    #[error("API error: {code} - {message} (HTTP {status})")]
    ApiError {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("failed to parse response body: {0}")]
    MalformedResponse(String),

    #[error("unknown filter size: {0}")]
    UnknownFilterSize(String),

    #[error("unexpected field type: {0}")]
    TypeMismatch(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}
