use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use crate::auth::{ApiCredentials, VeracodeHmacSigner};
use crate::client::{ReportService, VeracodeClient};
use crate::config::{self, ReportConfig};
use crate::errors::ReportError;
use crate::models::ReportRequest;
use crate::pipeline::{PipelineConfig, ReportPipeline, RunSummary, WindowPolicy};
use super::commands::{Cli, IntervalArgs, SingleArgs, ValidateArgs};
use super::progress::{drive_progress, render_summary};

const DEFAULT_CONFIG_FILE: &str = "veracode-report.yaml";

pub async fn handle_intervals(cli: &Cli, args: &IntervalArgs) -> Result<(), ReportError> {
    info!(start_date = %args.start_date, num_intervals = args.num_intervals, "Exporting findings by interval");
    let config = load_config(cli).await?;
    let policy = WindowPolicy::Sliding {
        template: config.request_template(),
        start: args.start_date,
        count: args.num_intervals,
    };
    execute(cli, &config, &policy).await
}

pub async fn handle_single(cli: &Cli, args: &SingleArgs) -> Result<(), ReportError> {
    let config = load_config(cli).await?;
    let request = match &args.request {
        Some(path) => read_request(Path::new(path)).await?,
        None => config.request_template(),
    };
    execute(cli, &config, &WindowPolicy::Single { request }).await
}

pub async fn handle_validate(args: &ValidateArgs) -> Result<(), ReportError> {
    let path = PathBuf::from(&args.file);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.file);
    Ok(())
}

/// Explicit `--config`, else `./veracode-report.yaml` if present, else defaults.
async fn load_config(cli: &Cli) -> Result<ReportConfig, ReportError> {
    match &cli.config {
        Some(path) => config::parse_config(Path::new(path)).await,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                debug!(path = %default_path.display(), "Using config file from working directory");
                config::parse_config(default_path).await
            } else {
                Ok(ReportConfig::default())
            }
        }
    }
}

async fn read_request(path: &Path) -> Result<ReportRequest, ReportError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        ReportError::Config(format!("Cannot read request file {}: {}", path.display(), e))
    })?;
    let request: ReportRequest = serde_json::from_str(&content)?;
    Ok(request)
}

fn output_dir(cli: &Cli, config: &ReportConfig) -> PathBuf {
    cli.output_dir
        .as_deref()
        .or(config.output_directory())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Credentials and signer are built once here and shared by every request.
fn build_service(config: &ReportConfig) -> Result<Arc<dyn ReportService>, ReportError> {
    let credentials = ApiCredentials::resolve(config.credentials.as_ref())?;
    debug!(api_key_id = %credentials.api_key_id, "Resolved API credentials");
    let signer = Arc::new(VeracodeHmacSigner::new(&credentials)?);
    let client = VeracodeClient::from_config(config, signer)?;
    Ok(Arc::new(client))
}

async fn execute(cli: &Cli, config: &ReportConfig, policy: &WindowPolicy) -> Result<(), ReportError> {
    let service = build_service(config)?;
    let pipeline_config = PipelineConfig::from_config(config, output_dir(cli, config));
    let summary = run_with_progress(cli.quiet, pipeline_config, service, policy).await?;

    if !cli.quiet {
        println!("{}", render_summary(&summary));
    }
    Ok(())
}

/// Run the pipeline, rendering progress from its event stream unless quiet.
pub async fn run_with_progress(
    quiet: bool,
    config: PipelineConfig,
    service: Arc<dyn ReportService>,
    policy: &WindowPolicy,
) -> Result<RunSummary, ReportError> {
    if quiet {
        return ReportPipeline::new(config, service).run(policy).await;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(drive_progress(rx));
    let result = ReportPipeline::new(config, service)
        .with_event_channel(tx)
        .run(policy)
        .await;
    // Pipeline (and its sender) is dropped here, which ends the renderer
    let _ = renderer.await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;
    use crate::client::fakes::FakeReportService;
    use crate::config::TimeoutAction;
    use crate::pipeline::PollSettings;

    #[tokio::test]
    async fn test_read_request_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("finding.json");
        std::fs::write(
            &path,
            r#"{"scan_type": ["SCA"], "policy_sandbox": "Policy", "status": "open", "report_type": "findings"}"#,
        )
        .unwrap();
        let request = read_request(&path).await.unwrap();
        assert_eq!(request.scan_types.len(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_request_file() {
        let result = read_request(Path::new("/nonexistent/finding.json")).await;
        assert!(matches!(result, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_output_dir_precedence() {
        let config: ReportConfig = serde_yaml::from_str("output:\n  directory: from-config\n").unwrap();

        let cli = Cli::try_parse_from(["veracode-report", "single", "-o", "from-flag"]).unwrap();
        assert_eq!(output_dir(&cli, &config), PathBuf::from("from-flag"));

        let cli = Cli::try_parse_from(["veracode-report", "single"]).unwrap();
        assert_eq!(output_dir(&cli, &config), PathBuf::from("from-config"));
        assert_eq!(output_dir(&cli, &ReportConfig::default()), PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_run_with_progress_returns_summary() {
        let dir = TempDir::new().unwrap();
        let service = Arc::new(FakeReportService::new().with_findings(json!([{"a": 1}])));
        let config = PipelineConfig {
            output_dir: dir.path().to_path_buf(),
            poll: PollSettings { interval: Duration::ZERO, max_attempts: 3 },
            on_timeout: TimeoutAction::Skip,
        };

        let summary = run_with_progress(
            false,
            config,
            service,
            &WindowPolicy::Single { request: ReportRequest::default() },
        )
        .await
        .unwrap();
        assert_eq!(summary.files_written(), 1);
    }
}
