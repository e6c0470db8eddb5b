use reqwest::StatusCode;
use shared::error::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server error or invalid input: {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Connection-level failures, as opposed to a reachable server sending
    /// something unusable.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}
