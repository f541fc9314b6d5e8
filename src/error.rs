use thiserror::Error;

/// Errors raised while talking to the backend.
///
/// None of these reach the conversation log as-is: the controllers log them
/// and show the fixed fallback message instead.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not a JSON object")]
    NotAnObject { url: String },

    #[error("response from {url} carried neither a reply nor an error")]
    MissingReply { url: String },

    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
