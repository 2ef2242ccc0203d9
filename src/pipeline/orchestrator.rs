use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn, info_span, Instrument};
use crate::client::ReportService;
use crate::config::TimeoutAction;
use crate::errors::ReportError;
use crate::models::{sliding_windows, IntervalWindow, ReportBatch, ReportRequest};
use crate::reporting::{write_report, OutputTarget, WriteOutcome};
use super::events::PipelineEvent;
use super::poller::poll_until_terminal;
use super::state::*;

/// One unit of work: a request, the window it covers and where it is written.
#[derive(Debug, Clone)]
struct WindowPlan {
    window: Option<IntervalWindow>,
    request: ReportRequest,
    target: OutputTarget,
}

/// Drives request → poll → fetch → write for every window of a run, strictly
/// one window at a time.
pub struct ReportPipeline {
    config: PipelineConfig,
    service: Arc<dyn ReportService>,
    event_tx: Option<mpsc::UnboundedSender<PipelineEvent>>,
}

impl ReportPipeline {
    pub fn new(config: PipelineConfig, service: Arc<dyn ReportService>) -> Self {
        Self {
            config,
            service,
            event_tx: None,
        }
    }

    /// Attach an event channel for streaming progress to a renderer.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Run every window of the policy. The first fatal error or unexpected job
    /// status stops the run; later windows are not attempted.
    pub async fn run(&self, policy: &WindowPolicy) -> Result<RunSummary, ReportError> {
        let plans = plan_windows(policy)?;
        info!(
            service = self.service.service_name(),
            windows = plans.len(),
            output_dir = %self.config.output_dir.display(),
            "Starting report run"
        );
        self.emit(PipelineEvent::RunStarted { windows: plans.len() });

        let mut summary = RunSummary::default();
        for plan in plans {
            let span = match plan.window {
                Some(w) => info_span!("window", index = w.index, start = %w.start, end = %w.end),
                None => info_span!("window", index = 1),
            };
            let report = self.run_window(plan).instrument(span).await?;
            summary.windows.push(report);
        }

        info!(
            files = summary.files_written(),
            rows = summary.total_rows(),
            timed_out = summary.timed_out(),
            "Report run finished"
        );
        self.emit(PipelineEvent::RunFinished {
            files_written: summary.files_written(),
            total_rows: summary.total_rows(),
        });
        Ok(summary)
    }

    async fn run_window(&self, plan: WindowPlan) -> Result<WindowReport, ReportError> {
        self.emit(PipelineEvent::WindowStarted { window: plan.window });

        // Requester
        plan.request.validate()?;
        let mut job = self.service.submit(&plan.request).await?;
        info!(job_id = %job.id, "Report requested");
        self.emit(PipelineEvent::JobSubmitted { job_id: job.id.clone() });

        // Poller
        let outcome = poll_until_terminal(
            self.service.as_ref(),
            &mut job,
            &self.config.poll,
            self.event_tx.as_ref(),
        )
        .await?;

        let attempts = outcome.attempts();
        match outcome {
            PollOutcome::Completed { .. } => {}
            PollOutcome::Failed { status, .. } => {
                return Err(ReportError::UnexpectedStatus { job_id: job.id, status });
            }
            PollOutcome::TimedOut { attempts } => {
                self.emit(PipelineEvent::WindowTimedOut {
                    job_id: job.id.clone(),
                    attempts,
                    action: self.config.on_timeout,
                });
                return match self.config.on_timeout {
                    TimeoutAction::Abort => Err(ReportError::PollTimeout { job_id: job.id, attempts }),
                    TimeoutAction::Skip => {
                        warn!(job_id = %job.id, attempts, "Skipping window, no report written");
                        Ok(WindowReport {
                            window: plan.window,
                            job_id: job.id,
                            poll_attempts: attempts,
                            outcome: WindowOutcome::TimedOut,
                        })
                    }
                };
            }
        }

        // Fetcher
        let body = self.service.fetch(&job.id).await?;
        let batch = ReportBatch::from_report(&body)?;
        if !batch.is_uniform() {
            warn!(job_id = %job.id, columns = batch.columns().len(), "Findings have differing fields; aligning cells by column name");
        }

        // Writer
        let outcome = match write_report(&batch, &self.config.output_dir, plan.target).await? {
            WriteOutcome::Written { path, rows } => {
                self.emit(PipelineEvent::ReportWritten { path: path.clone(), rows });
                WindowOutcome::Written { path, rows }
            }
            WriteOutcome::Empty => {
                self.emit(PipelineEvent::ReportEmpty { job_id: job.id.clone() });
                WindowOutcome::Empty
            }
        };

        Ok(WindowReport {
            window: plan.window,
            job_id: job.id,
            poll_attempts: attempts,
            outcome,
        })
    }
}

/// Expand a policy into concrete plans. All windows are computed before any
/// request is sent, so a bad interval count fails without network traffic.
fn plan_windows(policy: &WindowPolicy) -> Result<Vec<WindowPlan>, ReportError> {
    match policy {
        WindowPolicy::Single { request } => Ok(vec![WindowPlan {
            window: None,
            request: request.clone(),
            target: OutputTarget::NextFree,
        }]),
        WindowPolicy::Sliding { template, start, count } => Ok(sliding_windows(*start, *count)?
            .into_iter()
            .map(|window| WindowPlan {
                request: template.with_window(window.start, window.end),
                target: OutputTarget::Indexed(window.index),
                window: Some(window),
            })
            .collect()),
    }
}
