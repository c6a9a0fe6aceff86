use serde::{Deserialize, Serialize};
use super::alert::Alert;

/// Relay-style pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of the `vulnerabilityAlerts` connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPage {
    pub page_info: PageInfo,
    /// Unfiltered total across all pages.
    pub total_count: u64,
    pub nodes: Vec<Alert>,
}
