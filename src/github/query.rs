/// Alerts requested per round trip.
pub const PAGE_SIZE: u32 = 50;

pub const VULNERABILITY_ALERTS_QUERY: &str = r#"
query ($org_name: String!, $repo_name: String!, $page_size: Int!, $pagination: String) {
  repository(owner: $org_name, name: $repo_name) {
    name
    vulnerabilityAlerts(first: $page_size, after: $pagination) {
      pageInfo {
        hasNextPage
        endCursor
      }
      totalCount
      nodes {
        id
        number
        createdAt
        state
        dismissedAt
        dismissReason
        dismissComment
        fixedAt
        dependencyScope
        repository {
          name
          owner {
            login
          }
        }
        securityAdvisory {
          ghsaId
          description
          permalink
          severity
          summary
        }
        securityVulnerability {
          package {
            name
          }
          vulnerableVersionRange
          firstPatchedVersion {
            identifier
          }
        }
        vulnerableManifestFilename
        vulnerableManifestPath
      }
    }
  }
}
"#;

pub fn variables(org: &str, repo: &str, cursor: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "org_name": org,
        "repo_name": repo,
        "page_size": PAGE_SIZE,
        "pagination": cursor,
    })
}
