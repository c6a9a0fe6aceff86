use async_trait::async_trait;
use dependabot_csv::config::ExportConfig;
use dependabot_csv::errors::ReportError;
use dependabot_csv::github::client::decode_response;
use dependabot_csv::github::types::{GraphQlResponse, RepositoryData};
use dependabot_csv::github::AlertSource;
use dependabot_csv::models::{Alert, AlertPage, PageInfo};
use dependabot_csv::pipeline::{filter_alerts, AlertExporter};
use serde_json::json;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const HEADER: &str = "\"Manifest\",\"Package Name\",\"Impacted Version\",\"Patched Version\",\"Severity\",\"Summary\",\"CVE Link\",\"Alert Link\"";

/// Replays a fixed sequence of page results and records the cursors it was asked for.
/// Clones share the same script, so a test can keep one handle for inspection.
#[derive(Clone)]
struct ScriptedSource {
    pages: Arc<Mutex<VecDeque<Result<AlertPage, ReportError>>>>,
    cursors: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<AlertPage, ReportError>>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages.into())),
            cursors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSource for ScriptedSource {
    async fn fetch_page(
        &self,
        _org: &str,
        _repo: &str,
        cursor: Option<&str>,
    ) -> Result<AlertPage, ReportError> {
        self.cursors.lock().unwrap().push(cursor.map(str::to_string));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ReportError::Api("fetched past the last scripted page".into())))
    }

    fn source_name(&self) -> &str { "scripted" }
}

fn alert(number: u64, severity: &str, scope: &str, fixed: bool, dismissed: bool) -> Alert {
    let state = if fixed { "FIXED" } else if dismissed { "DISMISSED" } else { "OPEN" };
    let dismissed_at = dismissed.then_some("2024-02-11T11:00:00Z");
    let fixed_at = fixed.then_some("2024-02-12T11:00:00Z");
    serde_json::from_value(json!({
        "id": format!("RVA_{}", number),
        "number": number,
        "createdAt": "2024-02-10T11:00:00Z",
        "state": state,
        "dismissedAt": dismissed_at,
        "dismissReason": null,
        "dismissComment": null,
        "fixedAt": fixed_at,
        "dependencyScope": scope,
        "repository": { "name": "widgets", "owner": { "login": "acme" } },
        "securityAdvisory": {
            "ghsaId": format!("GHSA-{:04}", number),
            "description": "description",
            "permalink": format!("https://github.com/advisories/GHSA-{:04}", number),
            "severity": severity,
            "summary": format!("summary {}", number)
        },
        "securityVulnerability": {
            "package": { "name": format!("pkg-{}", number) },
            "vulnerableVersionRange": "< 2.0.0",
            "firstPatchedVersion": { "identifier": "2.0.0" }
        },
        "vulnerableManifestFilename": "Cargo.lock",
        "vulnerableManifestPath": "Cargo.lock"
    }))
    .unwrap()
}

fn page(total_count: u64, nodes: Vec<Alert>, next_cursor: Option<&str>) -> AlertPage {
    AlertPage {
        page_info: PageInfo {
            has_next_page: next_cursor.is_some(),
            end_cursor: next_cursor.map(str::to_string),
        },
        total_count,
        nodes,
    }
}

fn config(path: &Path) -> ExportConfig {
    ExportConfig::new("ghp_test", "acme", "widgets", path)
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

#[tokio::test]
async fn test_single_page_filters_and_reports_total() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports").join("alerts.csv");

    let source = ScriptedSource::new(vec![Ok(page(
        3,
        vec![
            alert(11, "CRITICAL", "RUNTIME", false, false),
            alert(12, "LOW", "RUNTIME", false, false),
        ],
        None,
    ))]);

    let summary = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap();

    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.rows_written, 1);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].contains("\"pkg-11\""));
    assert!(lines[1].ends_with("\"https://github.com/acme/widgets/security/dependabot/11\""));
}

#[tokio::test]
async fn test_exactly_n_fetches_and_cursor_chaining() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");

    let source = ScriptedSource::new(vec![
        Ok(page(120, vec![alert(1, "HIGH", "RUNTIME", false, false)], Some("c1"))),
        Ok(page(120, vec![alert(2, "HIGH", "RUNTIME", false, false)], Some("c2"))),
        Ok(page(120, vec![alert(3, "HIGH", "RUNTIME", false, false)], None)),
        // never reached
        Ok(page(120, vec![alert(4, "HIGH", "RUNTIME", false, false)], None)),
    ]);

    let summary = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap();

    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(
        source.cursors(),
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );

    let lines = read_lines(&path);
    assert_eq!(lines.iter().filter(|l| l.as_str() == HEADER).count(), 1);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines.len(), 4);
    assert!(!lines.iter().any(|l| l.contains("pkg-4")));
}

#[tokio::test]
async fn test_total_comes_from_first_page_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");

    // every alert on both pages is filtered out
    let source = ScriptedSource::new(vec![
        Ok(page(80, vec![alert(1, "LOW", "RUNTIME", false, false)], Some("c1"))),
        Ok(page(81, vec![alert(2, "HIGH", "DEVELOPMENT", false, false)], None)),
    ]);

    let summary = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap();

    assert_eq!(summary.total_count, 80);
    assert_eq!(summary.rows_written, 0);
    assert_eq!(read_lines(&path), vec![HEADER.to_string()]);
}

#[tokio::test]
async fn test_empty_repository_writes_header_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");

    let source = ScriptedSource::new(vec![Ok(page(0, vec![], None))]);
    let summary = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap();

    assert_eq!(summary.total_count, 0);
    assert_eq!(read_lines(&path), vec![HEADER.to_string()]);
}

#[tokio::test]
async fn test_second_page_failure_keeps_first_page_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");

    let source = ScriptedSource::new(vec![
        Ok(page(60, vec![alert(1, "CRITICAL", "RUNTIME", false, false)], Some("c1"))),
        Err(ReportError::Network("connection reset by peer".into())),
        Ok(page(60, vec![alert(2, "CRITICAL", "RUNTIME", false, false)], None)),
    ]);

    let err = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap_err();

    assert_eq!(err.to_string(), "Network error: connection reset by peer");
    assert_eq!(source.cursors().len(), 2);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].contains("pkg-1"));
    assert!(!lines.iter().any(|l| l.contains("pkg-2")));
}

#[tokio::test]
async fn test_first_page_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("alerts.csv");

    let source = ScriptedSource::new(vec![Err(ReportError::Authentication("Bad credentials".into()))]);
    let err = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap_err();

    assert!(matches!(err, ReportError::Authentication(_)));
    assert!(path.parent().unwrap().is_dir());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_write_failure_aborts_after_first_fetch() {
    let dir = TempDir::new().unwrap();
    // the report path is a directory, so opening it for append fails
    let path = dir.path().join("alerts.csv");
    fs::create_dir(&path).unwrap();

    let source = ScriptedSource::new(vec![
        Ok(page(80, vec![alert(1, "HIGH", "RUNTIME", false, false)], Some("c1"))),
        Ok(page(80, vec![alert(2, "CRITICAL", "RUNTIME", false, false)], None)),
    ]);
    let err = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap_err();

    assert!(matches!(err, ReportError::Io(_)));
    assert_eq!(source.cursors().len(), 1);
    assert!(path.is_dir());
}

#[tokio::test]
async fn test_appends_to_existing_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");
    fs::write(&path, "previous run\n").unwrap();

    let source = ScriptedSource::new(vec![Ok(page(
        1,
        vec![alert(5, "HIGH", "RUNTIME", false, false)],
        None,
    ))]);
    AlertExporter::new(source.clone(), config(&path)).run().await.unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines[0], "previous run");
    assert_eq!(lines[1], HEADER);
    assert_eq!(lines.len(), 3);
}

#[tokio::test]
async fn test_next_page_without_cursor_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");

    let mut broken = page(2, vec![], None);
    broken.page_info.has_next_page = true;
    let source = ScriptedSource::new(vec![Ok(broken)]);

    let err = AlertExporter::new(source.clone(), config(&path)).run().await.unwrap_err();
    assert!(matches!(err, ReportError::Api(_)));
    assert_eq!(source.cursors().len(), 1);
}

#[tokio::test]
async fn test_atomic_failure_leaves_destination_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");
    fs::write(&path, "last good report\n").unwrap();

    let source = ScriptedSource::new(vec![
        Ok(page(60, vec![alert(1, "CRITICAL", "RUNTIME", false, false)], Some("c1"))),
        Err(ReportError::Api("Something went wrong".into())),
    ]);
    let mut cfg = config(&path);
    cfg.atomic = true;

    assert!(AlertExporter::new(source.clone(), cfg).run().await.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "last good report\n");
    assert!(!dir.path().join("alerts.csv.partial").exists());
}

#[tokio::test]
async fn test_atomic_success_publishes_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.csv");

    let source = ScriptedSource::new(vec![
        Ok(page(2, vec![alert(1, "CRITICAL", "RUNTIME", false, false)], Some("c1"))),
        Ok(page(2, vec![alert(2, "HIGH", "RUNTIME", true, false)], None)),
    ]);
    let mut cfg = config(&path);
    cfg.atomic = true;

    let summary = AlertExporter::new(source.clone(), cfg).run().await.unwrap();
    assert_eq!(summary.rows_written, 1);
    assert_eq!(read_lines(&path).len(), 2);
    assert!(!dir.path().join("alerts.csv.partial").exists());
}

#[test]
fn test_decode_recorded_response() {
    let envelope: GraphQlResponse<RepositoryData> =
        serde_json::from_str(include_str!("fixtures/alerts_page.json")).unwrap();
    let page = decode_response(envelope, "acme", "widgets").unwrap();

    assert_eq!(page.total_count, 57);
    assert_eq!(page.nodes.len(), 3);
    assert!(page.page_info.has_next_page);
    assert_eq!(page.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOnYyOpHOAAAAAg=="));
    assert!(page.nodes[2].security_vulnerability.first_patched_version.is_none());
    assert!(page.nodes[2].security_advisory.permalink.is_none());

    // dismissed critical and development-only moderate are dropped
    let kept = filter_alerts(&page.nodes);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].number, 1);
}
