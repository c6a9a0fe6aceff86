use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;
use crate::errors::ReportError;

const MULTILINE_DELIMITER: &str = "DEPENDABOT_CSV_EOF";

/// Publishes step outputs through the runner's `GITHUB_OUTPUT` file.
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    pub fn new(path: Option<&Path>) -> Self {
        Self { path: path.map(Path::to_path_buf) }
    }

    /// Use `GITHUB_OUTPUT` when running under Actions; log otherwise.
    pub fn from_env() -> Self {
        let path = std::env::var_os("GITHUB_OUTPUT")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self { path }
    }

    pub async fn set_output(&self, name: &str, value: &str) -> Result<(), ReportError> {
        let Some(path) = &self.path else {
            info!(name, value, "Step output");
            return Ok(());
        };

        let entry = if value.contains('\n') {
            format!("{name}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n")
        } else {
            format!("{name}={value}\n")
        };
        let mut file = tokio::fs::OpenOptions::new()
            .create(true).append(true).open(path).await?;
        file.write_all(entry.as_bytes()).await?;
        Ok(())
    }
}

/// Format an `::error::` workflow command; the runner turns it into a failure annotation.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
