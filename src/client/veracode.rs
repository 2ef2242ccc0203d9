use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;
use crate::auth::RequestSigner;
use crate::config::{redact_authorization, ReportConfig};
use crate::config::security::validate_api_base;
use crate::errors::ReportError;
use crate::models::envelope;
use crate::models::{JobStatus, ReportJob, ReportRequest};
use super::service::ReportService;

const REPORT_PATH: [&str; 2] = ["analytics", "report"];

/// Analytics reporting API client. All requests are signed by the injected
/// signer.
pub struct VeracodeClient {
    client: Client,
    base_url: Url,
    user_agent: String,
    signer: Arc<dyn RequestSigner>,
}

impl VeracodeClient {
    /// Without a `timeout`, a request waits as long as the server keeps the
    /// connection open.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Option<Duration>,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, ReportError> {
        let base_url = validate_api_base(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ReportError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            user_agent: user_agent.to_string(),
            signer,
        })
    }

    pub fn from_config(config: &ReportConfig, signer: Arc<dyn RequestSigner>) -> Result<Self, ReportError> {
        Self::new(
            config.api_base(),
            &config.user_agent(),
            config.http_timeout_secs().map(Duration::from_secs),
            signer,
        )
    }

    /// `{base}/analytics/report[/{job_id}]`
    pub fn report_url(&self, job_id: Option<&str>) -> Result<Url, ReportError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ReportError::Config(format!("API base URL cannot be a base: {}", self.base_url)))?;
            segments.pop_if_empty().extend(REPORT_PATH);
            if let Some(id) = job_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn signed(&self, method: Method, url: Url) -> Result<RequestBuilder, ReportError> {
        let authorization = self.signer.authorization(method.as_str(), &url)?;
        debug!(method = %method, url = %url, authorization = %redact_authorization(&authorization), "Signed request");
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(reqwest::header::USER_AGENT, &self.user_agent))
    }

    async fn get_report(&self, job_id: &str) -> Result<Value, ReportError> {
        let url = self.report_url(Some(job_id))?;
        let resp = self
            .signed(Method::GET, url.clone())?
            .send()
            .await
            .map_err(|e| ReportError::Network(format!("GET {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ReportError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ReportError::MalformedResponse(format!("Report body is not JSON: {}", e)))
    }
}

#[async_trait]
impl ReportService for VeracodeClient {
    async fn submit(&self, request: &ReportRequest) -> Result<ReportJob, ReportError> {
        let url = self.report_url(None)?;
        let resp = self
            .signed(Method::POST, url.clone())?
            .json(request)
            .send()
            .await
            .map_err(|e| ReportError::Network(format!("POST {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReportError::Submission {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = resp.json().await
            .map_err(|e| ReportError::MalformedResponse(format!("Submission response is not JSON: {}", e)))?;
        let id = envelope::job_id(&data)?;
        Ok(ReportJob::submitted(id))
    }

    async fn status(&self, job_id: &str) -> Result<JobStatus, ReportError> {
        let data = self.get_report(job_id).await?;
        debug!(job_id = %job_id, response = %data, "Status response");
        let raw = envelope::raw_status(&data)?;
        Ok(JobStatus::from_raw(raw.as_deref()))
    }

    async fn fetch(&self, job_id: &str) -> Result<Value, ReportError> {
        self.get_report(job_id).await
    }

    fn service_name(&self) -> &str {
        "veracode-analytics"
    }
}
