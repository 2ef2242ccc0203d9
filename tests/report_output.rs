use serde_json::json;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use veracode_report::client::fakes::FakeReportService;
use veracode_report::config::TimeoutAction;
use veracode_report::models::{FindingStatus, PolicySandbox, ReportRequest, ScanType};
use veracode_report::pipeline::{
    PipelineConfig, PollSettings, ReportPipeline, WindowOutcome, WindowPolicy,
};

fn make_pipeline(dir: &TempDir, service: Arc<FakeReportService>) -> ReportPipeline {
    let config = PipelineConfig {
        output_dir: dir.path().to_path_buf(),
        poll: PollSettings { interval: Duration::ZERO, max_attempts: 30 },
        on_timeout: TimeoutAction::Skip,
    };
    ReportPipeline::new(config, service)
}

fn single() -> WindowPolicy {
    WindowPolicy::Single { request: ReportRequest::default() }
}

fn make_findings() -> serde_json::Value {
    json!([
        {
            "app_name": "payments-api",
            "scan_type": "Static Analysis",
            "cwe_id": 89,
            "severity": 5,
            "finding_description": "SQL injection in query builder, user input concatenated",
            "mitigated": false
        },
        {
            "app_name": "payments-api",
            "scan_type": "SCA",
            "cwe_id": 1104,
            "severity": 3,
            "finding_description": "Outdated \"log4j\" component",
            "mitigated": true
        }
    ])
}

#[tokio::test]
async fn test_single_run_writes_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakeReportService::new().with_findings(make_findings()));

    make_pipeline(&dir, service).run(&single()).await.unwrap();

    let content = fs::read_to_string(dir.path().join("output_1.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "app_name,scan_type,cwe_id,severity,finding_description,mitigated");
    assert_eq!(
        lines[1],
        "payments-api,Static Analysis,89,5,\"SQL injection in query builder, user input concatenated\",false"
    );
    assert_eq!(lines[2], "payments-api,SCA,1104,3,\"Outdated \"\"log4j\"\" component\",true");
}

#[tokio::test]
async fn test_single_run_csv_reads_back() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakeReportService::new().with_findings(make_findings()));

    make_pipeline(&dir, service).run(&single()).await.unwrap();

    let mut reader = csv::Reader::from_path(dir.path().join("output_1.csv")).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 6);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][4], "Outdated \"log4j\" component");
}

#[tokio::test]
async fn test_single_run_picks_next_free_name() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("output_1.csv"), "earlier run\n").unwrap();
    let service = Arc::new(
        FakeReportService::new()
            .with_findings(json!([{"a": 1}]))
            .with_findings(json!([{"a": 2}])),
    );
    let pipeline = make_pipeline(&dir, service);

    pipeline.run(&single()).await.unwrap();
    pipeline.run(&single()).await.unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("output_1.csv")).unwrap(), "earlier run\n");
    assert_eq!(fs::read_to_string(dir.path().join("output_2.csv")).unwrap(), "a\n1\n");
    assert_eq!(fs::read_to_string(dir.path().join("output_3.csv")).unwrap(), "a\n2\n");
}

#[tokio::test]
async fn test_empty_report_creates_no_file() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakeReportService::new().with_findings(json!([])));

    let summary = make_pipeline(&dir, service).run(&single()).await.unwrap();

    assert_eq!(summary.windows[0].outcome, WindowOutcome::Empty);
    assert_eq!(summary.files_written(), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_divergent_records_keep_cells_under_their_headers() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakeReportService::new().with_findings(json!([
        {"id": 1, "severity": 5},
        {"severity": 2, "id": 2, "cve": "CVE-2021-44228"}
    ])));

    make_pipeline(&dir, service).run(&single()).await.unwrap();

    let content = fs::read_to_string(dir.path().join("output_1.csv")).unwrap();
    assert_eq!(content, "id,severity,cve\n1,5,\n2,2,CVE-2021-44228\n");
}

#[tokio::test]
async fn test_single_request_submitted_as_given() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakeReportService::new());
    let request = ReportRequest::new(&[ScanType::Sca], PolicySandbox::Sandbox, FindingStatus::Closed);

    make_pipeline(&dir, service.clone())
        .run(&WindowPolicy::Single { request: request.clone() })
        .await
        .unwrap();

    assert_eq!(service.submitted(), vec![request]);
}
