use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, info};
use crate::errors::ReportError;
use crate::models::AlertPage;
use super::query::{variables, VULNERABILITY_ALERTS_QUERY};
use super::source::AlertSource;
use super::types::{GraphQlError, GraphQlResponse, RepositoryData};

pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("dependabot-csv/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    client: Client,
    token: String,
    api_url: String,
}

impl GitHubClient {
    /// `api_url` is `DEFAULT_API_URL` or a GitHub Enterprise Server GraphQL endpoint.
    pub fn with_api_url(token: &str, api_url: &str) -> Result<Self, ReportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ReportError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            token: token.to_string(),
            api_url: api_url.to_string(),
        })
    }
}

#[async_trait]
impl AlertSource for GitHubClient {
    async fn fetch_page(
        &self,
        org: &str,
        repo: &str,
        cursor: Option<&str>,
    ) -> Result<AlertPage, ReportError> {
        info!(cursor = cursor.unwrap_or("null"), "Fetching vulnerability alerts page");

        let body = json!({
            "query": VULNERABILITY_ALERTS_QUERY,
            "variables": variables(org, repo, cursor),
        });

        let resp = self.client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReportError::Network(format!("GitHub request failed: {}", e)))?;

        let status = resp.status();
        if let Some(err) = map_status(status, resp.headers()) {
            let text = resp.text().await.unwrap_or_default();
            debug!(status = %status, body = %text.trim(), "GitHub error response");
            return Err(err);
        }

        let envelope: GraphQlResponse<RepositoryData> = resp.json().await
            .map_err(|e| ReportError::Api(format!("Failed to parse GitHub response: {}", e)))?;

        let page = decode_response(envelope, org, repo)?;
        debug!(
            nodes = page.nodes.len(),
            total = page.total_count,
            has_next_page = page.page_info.has_next_page,
            "Received alerts page"
        );
        Ok(page)
    }

    fn source_name(&self) -> &str { "github-graphql" }
}

/// Map a non-2xx HTTP status to an error. A 403 only counts as rate limiting
/// when `x-ratelimit-remaining` is `0`.
pub fn map_status(status: StatusCode, headers: &HeaderMap) -> Option<ReportError> {
    if status.is_success() {
        return None;
    }
    let rate_limit_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.trim() == "0");

    let err = match status {
        StatusCode::UNAUTHORIZED => {
            ReportError::Authentication("Bad credentials for GitHub API".into())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            ReportError::RateLimit("GitHub API rate limit exceeded".into())
        }
        StatusCode::FORBIDDEN if rate_limit_exhausted => {
            ReportError::RateLimit("GitHub API rate limit exceeded".into())
        }
        _ => ReportError::Api(format!("HTTP {}", status)),
    };
    Some(err)
}

/// Unwrap the GraphQL envelope into a page, mapping GitHub's error classes.
pub fn decode_response(
    envelope: GraphQlResponse<RepositoryData>,
    org: &str,
    repo: &str,
) -> Result<AlertPage, ReportError> {
    if !envelope.errors.is_empty() {
        return Err(map_graphql_errors(&envelope.errors, org, repo));
    }

    envelope
        .data
        .and_then(|d| d.repository)
        .map(|r| r.vulnerability_alerts)
        .ok_or_else(|| ReportError::NotFound(format!("{}/{}", org, repo)))
}

fn map_graphql_errors(errors: &[GraphQlError], org: &str, repo: &str) -> ReportError {
    let has_type = |t: &str| errors.iter().any(|e| e.error_type.as_deref() == Some(t));

    if has_type("NOT_FOUND") {
        return ReportError::NotFound(format!("{}/{}", org, repo));
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    if has_type("RATE_LIMITED") {
        ReportError::RateLimit(message)
    } else {
        ReportError::Api(message)
    }
}
