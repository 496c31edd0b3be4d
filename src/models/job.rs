use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success body for the reminder jobs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobRunResponse {
    pub success: bool,
    pub message: String,
    pub notifications_created: i64,
    /// RFC 3339 invocation timestamp.
    pub timestamp: String,
}

impl JobRunResponse {
    pub fn new(message: impl Into<String>, notifications_created: i64) -> Self {
        Self {
            success: true,
            message: message.into(),
            notifications_created,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Success body for the retention sweep.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub success: bool,
    pub message: String,
    pub deleted_count: u64,
    pub timestamp: String,
}

impl CleanupResponse {
    pub fn new(message: impl Into<String>, deleted_count: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            deleted_count,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
