use super::{ItemsMoveClient, UpstreamReply};
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const API_KEY_HEADER: &str = "x-goodday-api-key";

pub struct GoodDayClient {
    client: reqwest::Client,
    move_url: String,
}

impl GoodDayClient {
    pub fn new(move_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            move_url: move_url.to_string(),
        })
    }

    pub fn move_url(&self) -> &str {
        &self.move_url
    }
}

#[async_trait]
impl ItemsMoveClient for GoodDayClient {
    async fn move_items(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply> {
        tracing::debug!(url = %self.move_url, "sending items move request");

        let response = self
            .client
            .put(&self.move_url)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Failed to read response: {}", e)))?;

        tracing::debug!(status, bytes = body.len(), "items move response received");

        Ok(UpstreamReply { status, body })
    }
}
