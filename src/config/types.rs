use std::path::PathBuf;
use crate::errors::ReportError;
use crate::github::DEFAULT_API_URL;
use crate::report::DEFAULT_WEB_HOST;

/// Everything one export run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub token: String,
    pub org: String,
    pub repo: String,
    pub csv_path: PathBuf,
    pub api_url: String,
    pub web_host: String,
    /// Stage rows in `<csv_path>.partial` and publish only on success.
    pub atomic: bool,
}

impl ExportConfig {
    pub fn new(token: &str, org: &str, repo: &str, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            token: token.to_string(),
            org: org.to_string(),
            repo: repo.to_string(),
            csv_path: csv_path.into(),
            api_url: DEFAULT_API_URL.to_string(),
            web_host: DEFAULT_WEB_HOST.to_string(),
            atomic: false,
        }
    }

    /// Presence check only; the API is the authority on whether values are valid.
    pub fn validate(&self) -> Result<(), ReportError> {
        let required = [
            ("token", self.token.as_str()),
            ("org", self.org.as_str()),
            ("repo", self.repo.as_str()),
            ("api-url", self.api_url.as_str()),
            ("web-host", self.web_host.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ReportError::Config(format!("Missing required input: {}", name)));
            }
        }
        if self.csv_path.as_os_str().is_empty() {
            return Err(ReportError::Config("Missing required input: csv-path".into()));
        }
        Ok(())
    }
}
