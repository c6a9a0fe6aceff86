use std::path::{Path, PathBuf};
use crate::config::ExportConfig;
use crate::errors::ReportError;
use crate::github::AlertSource;
use crate::report::CsvReportWriter;
use super::filter::filter_alerts;
use super::state::{PaginationState, Transition};
use tracing::{error, info, warn};

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Unfiltered alert total reported by the first page.
    pub total_count: u64,
    pub pages_fetched: usize,
    pub rows_written: usize,
}

/// Drives fetch → filter → write until the API reports no further pages.
pub struct AlertExporter<S: AlertSource> {
    source: S,
    config: ExportConfig,
}

impl<S: AlertSource> AlertExporter<S> {
    pub fn new(source: S, config: ExportConfig) -> Self {
        Self { source, config }
    }

    pub async fn run(&self) -> Result<RunSummary, ReportError> {
        info!(
            org = %self.config.org,
            repo = %self.config.repo,
            source = self.source.source_name(),
            "Exporting vulnerability alerts"
        );

        if !self.config.atomic {
            let writer = CsvReportWriter::with_web_host(&self.config.csv_path, &self.config.web_host);
            writer.prepare().await?;
            return self.paginate(&writer).await;
        }

        let staging = staging_path(&self.config.csv_path);
        remove_if_exists(&staging).await?;
        let writer = CsvReportWriter::with_web_host(&staging, &self.config.web_host);
        writer.prepare().await?;

        match self.paginate(&writer).await {
            Ok(summary) => {
                tokio::fs::rename(&staging, &self.config.csv_path).await?;
                info!(path = %self.config.csv_path.display(), "Published staged report");
                Ok(summary)
            }
            Err(e) => {
                if let Err(cleanup) = remove_if_exists(&staging).await {
                    warn!(path = %staging.display(), error = %cleanup, "Failed to remove staged report");
                }
                Err(e)
            }
        }
    }

    async fn paginate(&self, writer: &CsvReportWriter) -> Result<RunSummary, ReportError> {
        let mut state = PaginationState::new();
        let mut rows_written = 0;

        loop {
            let fetched = self.source
                .fetch_page(&self.config.org, &self.config.repo, state.cursor())
                .await;
            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    error!(pages_fetched = state.pages_fetched(), error = %e, "Alert fetch failed");
                    return Err(e);
                }
            };

            state.record_page(page.total_count);
            if state.is_first_page() {
                info!(alert_count = page.total_count, "Alert count");
            }

            let reportable = filter_alerts(&page.nodes);
            match writer.append_page(&reportable, state.is_first_page()).await {
                Ok(rows) => rows_written += rows,
                Err(e) => {
                    error!(
                        path = %writer.path().display(),
                        pages_fetched = state.pages_fetched(),
                        error = %e,
                        "Report write failed"
                    );
                    return Err(e);
                }
            }

            if page.page_info.has_next_page && page.page_info.end_cursor.is_none() {
                return Err(ReportError::Api("hasNextPage is set but endCursor is missing".into()));
            }

            let transition = state.advance(&page.page_info);
            info!(
                has_next_page = page.page_info.has_next_page,
                cursor = state.cursor().unwrap_or("null"),
                kept = reportable.len(),
                received = page.nodes.len(),
                "Processed alerts page"
            );

            if transition == Transition::Done {
                break;
            }
        }

        Ok(RunSummary {
            total_count: state.total_count().unwrap_or(0),
            pages_fetched: state.pages_fetched(),
            rows_written,
        })
    }
}

/// `<csv-path>.partial`, in the destination's directory.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".partial");
    PathBuf::from(staged)
}

async fn remove_if_exists(path: &Path) -> Result<(), ReportError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
