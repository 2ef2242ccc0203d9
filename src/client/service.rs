use async_trait::async_trait;
use crate::errors::ReportError;
use crate::models::{JobStatus, ReportJob, ReportRequest};

/// Remote report-generation service.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Submit a report request; one outbound creation call.
    async fn submit(&self, request: &ReportRequest) -> Result<ReportJob, ReportError>;

    /// Current status of a submitted job.
    async fn status(&self, job_id: &str) -> Result<JobStatus, ReportError>;

    /// Full body of a completed report.
    async fn fetch(&self, job_id: &str) -> Result<serde_json::Value, ReportError>;

    /// Service name for logging
    fn service_name(&self) -> &str;
}
