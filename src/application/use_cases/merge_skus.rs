use std::sync::Arc;

use crate::domain::error::{AppError, Result};
use crate::domain::moves::MoveBatch;
use crate::infrastructure::response::pretty_body;
use crate::infrastructure::task_api::ItemsMoveClient;

/// Send a move batch upstream and report the answer.
pub struct MergeSkusUseCase {
    client: Arc<dyn ItemsMoveClient>,
}

impl MergeSkusUseCase {
    pub fn new(client: Arc<dyn ItemsMoveClient>) -> Self {
        Self { client }
    }

    /// Returns the upstream response, pretty-printed when it is JSON.
    pub async fn execute(&self, api_key: &str, batch: &MoveBatch) -> Result<String> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter your API key before merging SKUs.".to_string(),
            ));
        }
        if batch.is_empty() {
            return Err(AppError::ValidationError(
                "No moves to send. Please provide a CSV file first.".to_string(),
            ));
        }

        let payload = serde_json::to_value(batch)
            .map_err(|e| AppError::ParseError(format!("Failed to serialize moves: {}", e)))?;

        tracing::info!(moves = batch.len(), force = batch.force, "merging SKUs");
        let reply = self.client.move_items(api_key, &payload).await?;

        if !reply.is_success() {
            tracing::error!(status = reply.status, "items move rejected");
            return Err(AppError::UpstreamError(format!(
                "API Error {}: {}",
                reply.status, reply.body
            )));
        }

        tracing::info!(status = reply.status, "SKUs merged");
        Ok(pretty_body(&reply.body))
    }
}
