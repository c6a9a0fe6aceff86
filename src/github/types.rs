use serde::{Deserialize, Serialize};
use crate::models::AlertPage;

/// Standard GraphQL response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    /// GitHub-specific error class, e.g. `NOT_FOUND` or `RATE_LIMITED`.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryData {
    pub repository: Option<RepositoryAlerts>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAlerts {
    pub name: String,
    pub vulnerability_alerts: AlertPage,
}
