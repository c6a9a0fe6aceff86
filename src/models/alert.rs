use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Advisory severity as reported by GitHub, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// High-priority severities are the only ones that make it into the report.
    pub fn is_high_priority(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the vulnerable dependency ships with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyScope {
    Runtime,
    Development,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertState {
    Open,
    Fixed,
    Dismissed,
    AutoDismissed,
    /// States added to the schema after this client was written.
    #[serde(other)]
    Unknown,
}

/// One Dependabot alert as returned by the `vulnerabilityAlerts` connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    /// Per-repository sequence number, used in the alert's web URL.
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub state: AlertState,
    pub dismissed_at: Option<DateTime<Utc>>,
    pub dismiss_reason: Option<String>,
    pub dismiss_comment: Option<String>,
    pub fixed_at: Option<DateTime<Utc>>,
    /// Nullable in the GitHub schema for ecosystems without scope data.
    pub dependency_scope: Option<DependencyScope>,
    pub repository: RepositoryRef,
    pub security_advisory: Advisory,
    pub security_vulnerability: Vulnerability,
    pub vulnerable_manifest_filename: String,
    pub vulnerable_manifest_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory {
    pub ghsa_id: String,
    pub description: String,
    /// Nullable in the GitHub schema.
    pub permalink: Option<String>,
    pub severity: Severity,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub package: Package,
    pub vulnerable_version_range: String,
    /// Absent until a fixed release exists.
    pub first_patched_version: Option<PatchedVersion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchedVersion {
    pub identifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

impl Alert {
    pub fn patched_version(&self) -> Option<&str> {
        self.security_vulnerability
            .first_patched_version
            .as_ref()
            .map(|v| v.identifier.as_str())
    }

    /// Deep link to the alert in the repository's security tab.
    pub fn web_url(&self, web_host: &str) -> String {
        format!(
            "https://{}/{}/{}/security/dependabot/{}",
            web_host, self.repository.owner.login, self.repository.name, self.number
        )
    }
}
