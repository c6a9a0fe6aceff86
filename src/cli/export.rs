use crate::actions::StepOutputs;
use crate::cli::commands::Cli;
use crate::config::{resolve_credential, ExportConfig};
use crate::errors::ReportError;
use crate::github::GitHubClient;
use crate::pipeline::AlertExporter;
use tracing::info;

pub const ALERTS_COUNT_OUTPUT: &str = "alerts_count";

pub async fn handle_export(cli: &Cli) -> Result<(), ReportError> {
    let config = build_export_config(cli)?;
    info!(org = %config.org, repo = %config.repo, path = %config.csv_path.display(), "Starting export");

    let client = GitHubClient::with_api_url(&config.token, &config.api_url)?;
    let exporter = AlertExporter::new(client, config);
    let summary = exporter.run().await?;

    StepOutputs::from_env()
        .set_output(ALERTS_COUNT_OUTPUT, &summary.total_count.to_string())
        .await?;

    info!(
        alert_count = summary.total_count,
        pages = summary.pages_fetched,
        rows = summary.rows_written,
        "Export completed"
    );
    Ok(())
}

pub fn build_export_config(cli: &Cli) -> Result<ExportConfig, ReportError> {
    let token = cli.token.clone()
        .filter(|t| !t.is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .map(|t| resolve_credential(&t))
        .ok_or_else(|| ReportError::Config("Missing required input: token".into()))?;

    let config = ExportConfig {
        token,
        org: cli.org.trim().to_string(),
        repo: cli.repo.trim().to_string(),
        csv_path: cli.csv_path.clone(),
        api_url: cli.api_url.clone(),
        web_host: cli.web_host.clone(),
        atomic: cli.atomic,
    };
    config.validate()?;
    Ok(config)
}
