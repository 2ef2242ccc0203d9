//! Scripted in-memory `ReportService` (testing only)
//!
//! Statuses are served from one queue across all jobs in call order; once the
//! queue is drained every status check answers COMPLETED. Report bodies work
//! the same way and default to an empty findings list.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::ReportError;
use crate::models::{JobStatus, ReportJob, ReportRequest};
use super::service::ReportService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Submit,
    Status(String),
    Fetch(String),
}

#[derive(Debug, Default)]
pub struct FakeReportService {
    statuses: Mutex<VecDeque<Option<String>>>,
    bodies: Mutex<VecDeque<Value>>,
    submitted: Mutex<Vec<ReportRequest>>,
    calls: Mutex<Vec<FakeCall>>,
    status_failure_after: Option<usize>,
    submit_failure: Option<u16>,
}

impl FakeReportService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        self.with_raw_statuses(statuses.iter().map(|s| Some(s.to_string())).collect())
    }

    /// `None` simulates a status response without a status field.
    pub fn with_raw_statuses(self, statuses: Vec<Option<String>>) -> Self {
        self.statuses.lock().unwrap().extend(statuses);
        self
    }

    /// Queue a report body whose findings list is `findings`.
    pub fn with_findings(self, findings: Value) -> Self {
        self.with_body(json!({"_embedded": {"findings": findings}}))
    }

    pub fn with_body(self, body: Value) -> Self {
        self.bodies.lock().unwrap().push_back(body);
        self
    }

    /// Status checks after the first `n` fail with a transport error.
    pub fn failing_status_after(mut self, n: usize) -> Self {
        self.status_failure_after = Some(n);
        self
    }

    /// Every submission is rejected with this HTTP status.
    pub fn rejecting_submissions(mut self, status: u16) -> Self {
        self.submit_failure = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<ReportRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.count(|c| matches!(c, FakeCall::Status(_)))
    }

    pub fn fetch_calls(&self) -> usize {
        self.count(|c| matches!(c, FakeCall::Fetch(_)))
    }

    fn count(&self, pred: impl Fn(&FakeCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl ReportService for FakeReportService {
    async fn submit(&self, request: &ReportRequest) -> Result<ReportJob, ReportError> {
        self.calls.lock().unwrap().push(FakeCall::Submit);
        if let Some(status) = self.submit_failure {
            return Err(ReportError::Submission { status, body: "rejected".into() });
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(request.clone());
        Ok(ReportJob::submitted(format!("job-{}", submitted.len())))
    }

    async fn status(&self, job_id: &str) -> Result<JobStatus, ReportError> {
        let previous = self.status_calls();
        self.calls.lock().unwrap().push(FakeCall::Status(job_id.to_string()));
        if self.status_failure_after.is_some_and(|n| previous >= n) {
            return Err(ReportError::Network("connection reset".into()));
        }
        let raw = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Some("COMPLETED".to_string()));
        Ok(JobStatus::from_raw(raw.as_deref()))
    }

    async fn fetch(&self, job_id: &str) -> Result<Value, ReportError> {
        self.calls.lock().unwrap().push(FakeCall::Fetch(job_id.to_string()));
        Ok(self
            .bodies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json!({"_embedded": {"findings": []}})))
    }

    fn service_name(&self) -> &str {
        "fake"
    }
}
