use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::types::{ChatReply, ChatRequest};
use crate::constants::{CHAT_ENDPOINT_PATH, CHAT_VERSION_PATH, HEALTH_CHECK_TIMEOUT_SECS};

/// Why a chat request produced no usable reply
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Could not reach chat backend: {0}")]
    Transport(String),

    #[error("Chat backend returned HTTP {0}")]
    Status(u16),

    #[error("Chat backend sent an unreadable body: {0}")]
    Decode(String),

    #[error("Chat request task failed: {0}")]
    Task(String),
}

/// Anything that can answer a [`ChatRequest`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and wait for its outcome. Implementations must not retry.
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;

    /// Human-readable location of the backend, for status output
    fn endpoint(&self) -> String;
}

/// Chat backend reached over HTTP at `{api_base}/api/v1/chat`
#[derive(Clone)]
pub struct HttpChatBackend {
    client: Client,
    api_base: String,
}

impl HttpChatBackend {
    pub fn new(api_base: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the backend which handler version it runs. `None` when unreachable.
    pub async fn version(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct VersionResponse {
            version: String,
        }

        let url = format!("{}{}", self.api_base, CHAT_VERSION_PATH);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        response.json::<VersionResponse>().await.ok().map(|v| v.version)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let url = format!("{}{}", self.api_base, CHAT_ENDPOINT_PATH);
        debug!(
            "POST {} (history={}, top_k={})",
            url,
            request.messages.len(),
            request.top_k
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))?;
        Ok(ChatReply::from_value(&body))
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.api_base, CHAT_ENDPOINT_PATH)
    }
}
