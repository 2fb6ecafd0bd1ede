use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tryon_core::StatusCheck;
use tryon_pipeline::MetricsSnapshot;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description.
    #[schema(example = "person upload not found: 3f2a")]
    pub error: String,
    /// Stable error kind.
    #[schema(example = "not_found")]
    pub kind: String,
}

/// Service banner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Virtual Try-On API is running")]
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
    /// Current pipeline metrics snapshot.
    pub metrics: MetricsSnapshot,
}

/// Body of a status check ping.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheckRequest {
    #[serde(alias = "client_name")]
    pub client_name: String,
}

/// A recorded status check.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheckResponse {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl From<StatusCheck> for StatusCheckResponse {
    fn from(check: StatusCheck) -> Self {
        Self {
            id: check.id,
            client_name: check.client_name,
            timestamp: check.timestamp,
        }
    }
}
