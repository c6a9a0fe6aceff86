use async_trait::async_trait;
use crate::errors::ReportError;
use crate::models::AlertPage;

/// Anything that can hand back one page of a repository's vulnerability alerts.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch a single page. `cursor` is `None` for the first page and otherwise
    /// the `endCursor` of the previous page.
    async fn fetch_page(
        &self,
        org: &str,
        repo: &str,
        cursor: Option<&str>,
    ) -> Result<AlertPage, ReportError>;

    /// Source name for logging
    fn source_name(&self) -> &str;
}
