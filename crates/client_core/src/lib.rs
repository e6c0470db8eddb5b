use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::ConversionInput,
    protocol::{
        history_from_json, ConversionReply, HistoryEntry, CONVERT_PATH, HISTORY_PATH,
        INPUT_QUERY_PARAM,
    },
};
use tracing::debug;
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use controller::{RegionSink, UiAction, UiController};
pub use error::ClientError;
pub use view::{HistoryLine, HistoryRegion, RegionUpdate, ResultRegion, ViewState};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Remote side of the converter: one call per endpoint.
#[async_trait]
pub trait ConversionService: Send + Sync {
    async fn convert(&self, input: &ConversionInput) -> Result<ConversionReply, ClientError>;
    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ConverterClient {
    http: Client,
    server_url: String,
}

impl ConverterClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(
        http: Client,
        server_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let raw = server_url.into();
        let trimmed = raw.trim().trim_end_matches('/').to_string();
        Url::parse(&trimmed).map_err(|source| ClientError::InvalidServerUrl {
            url: raw.clone(),
            source,
        })?;
        Ok(Self {
            http,
            server_url: trimmed,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn convert_url(&self, input: &ConversionInput) -> String {
        format!(
            "{}{CONVERT_PATH}?{INPUT_QUERY_PARAM}={}",
            self.server_url,
            urlencoding::encode(input.as_str())
        )
    }

    pub fn history_url(&self) -> String {
        format!("{}{HISTORY_PATH}", self.server_url)
    }

    async fn get_json(&self, url: String) -> Result<Value, ClientError> {
        debug!(%url, "sending request");
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(ClientError::Transport { url, source }),
        };
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(ClientError::Transport { url, source }),
        };
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode { url, source })
    }
}

#[async_trait]
impl ConversionService for ConverterClient {
    async fn convert(&self, input: &ConversionInput) -> Result<ConversionReply, ClientError> {
        let body = self.get_json(self.convert_url(input)).await?;
        Ok(ConversionReply::from_json(&body)?)
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let body = self.get_json(self.history_url()).await?;
        Ok(history_from_json(&body)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
