pub mod goodday;

use crate::domain::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use goodday::GoodDayClient;

/// Raw outcome of an upstream call that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything able to deliver a move payload to the task-management API.
///
/// Transport failures are errors; every HTTP status, including 4xx/5xx,
/// comes back as an [`UpstreamReply`].
#[async_trait]
pub trait ItemsMoveClient: Send + Sync {
    async fn move_items(&self, api_key: &str, payload: &Value) -> Result<UpstreamReply>;
}
