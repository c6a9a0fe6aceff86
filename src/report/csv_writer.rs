use std::path::{Path, PathBuf};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use crate::errors::ReportError;
use crate::models::Alert;

pub const DEFAULT_WEB_HOST: &str = "github.com";

/// Report columns, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Manifest,
    PackageName,
    ImpactedVersion,
    PatchedVersion,
    Severity,
    Summary,
    CveLink,
    AlertLink,
}

pub const COLUMNS: [Column; 8] = [
    Column::Manifest,
    Column::PackageName,
    Column::ImpactedVersion,
    Column::PatchedVersion,
    Column::Severity,
    Column::Summary,
    Column::CveLink,
    Column::AlertLink,
];

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Manifest => "Manifest",
            Column::PackageName => "Package Name",
            Column::ImpactedVersion => "Impacted Version",
            Column::PatchedVersion => "Patched Version",
            Column::Severity => "Severity",
            Column::Summary => "Summary",
            Column::CveLink => "CVE Link",
            Column::AlertLink => "Alert Link",
        }
    }

    pub fn value(&self, alert: &Alert, web_host: &str) -> String {
        match self {
            Column::Manifest => alert.vulnerable_manifest_path.clone(),
            Column::PackageName => alert.security_vulnerability.package.name.clone(),
            Column::ImpactedVersion => alert.security_vulnerability.vulnerable_version_range.clone(),
            Column::PatchedVersion => alert.patched_version().unwrap_or_default().to_string(),
            Column::Severity => alert.security_advisory.severity.to_string(),
            Column::Summary => alert.security_advisory.summary.clone(),
            Column::CveLink => alert.security_advisory.permalink.clone().unwrap_or_default(),
            Column::AlertLink => alert.web_url(web_host),
        }
    }
}

/// Appends filtered alerts to a CSV file, one page at a time.
pub struct CsvReportWriter {
    path: PathBuf,
    web_host: String,
}

impl CsvReportWriter {
    pub fn new(path: &Path) -> Self {
        Self::with_web_host(path, DEFAULT_WEB_HOST)
    }

    pub fn with_web_host(path: &Path, web_host: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            web_host: web_host.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the report's parent directory if it does not exist yet.
    pub async fn prepare(&self) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Encode `alerts` as CSV, preceded by the header row when `include_header` is set.
    pub fn render(&self, alerts: &[Alert], include_header: bool) -> Result<Vec<u8>, ReportError> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if include_header {
            wtr.write_record(COLUMNS.iter().map(|c| c.label()))?;
        }
        for alert in alerts {
            wtr.write_record(COLUMNS.iter().map(|c| c.value(alert, &self.web_host)))?;
        }

        wtr.into_inner().map_err(|e| ReportError::Io(e.into_error()))
    }

    /// Append one page of rows to the report file, creating it if needed.
    /// Returns the number of data rows written.
    pub async fn append_page(&self, alerts: &[Alert], include_header: bool) -> Result<usize, ReportError> {
        let bytes = self.render(alerts, include_header)?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true).append(true).open(&self.path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!(
            path = %self.path.display(),
            rows = alerts.len(),
            header = include_header,
            "Appended rows to report"
        );
        Ok(alerts.len())
    }
}
