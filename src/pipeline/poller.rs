use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use crate::client::ReportService;
use crate::errors::ReportError;
use crate::models::{JobStatus, ReportJob};
use super::events::PipelineEvent;
use super::state::{PollOutcome, PollSettings};

/// Poll a job at a fixed interval until it leaves PROCESSING or the attempt
/// budget runs out.
///
/// Only PROCESSING consumes budget and sleeps. There is no sleep after the
/// final attempt. Transport and HTTP errors end polling immediately.
pub async fn poll_until_terminal(
    service: &dyn ReportService,
    job: &mut ReportJob,
    settings: &PollSettings,
    events: Option<&mpsc::UnboundedSender<PipelineEvent>>,
) -> Result<PollOutcome, ReportError> {
    for attempt in 1..=settings.max_attempts {
        debug!(job_id = %job.id, attempt, max = settings.max_attempts, "Checking report status");
        let status = service.status(&job.id).await?;
        job.observe(status.clone());

        if let Some(tx) = events {
            let _ = tx.send(PipelineEvent::StatusPolled {
                job_id: job.id.clone(),
                attempt,
                max_attempts: settings.max_attempts,
                status: status.clone(),
            });
        }

        match status {
            JobStatus::Completed => {
                info!(job_id = %job.id, attempts = attempt, "Report completed");
                return Ok(PollOutcome::Completed { attempts: attempt });
            }
            JobStatus::Submitted | JobStatus::Processing => {
                if attempt < settings.max_attempts {
                    tokio::time::sleep(settings.interval).await;
                }
            }
            JobStatus::Other(raw) => {
                warn!(
                    job_id = %job.id,
                    status = raw.as_deref().unwrap_or("<missing>"),
                    "Unexpected report status"
                );
                return Ok(PollOutcome::Failed { status: raw, attempts: attempt });
            }
        }
    }

    warn!(job_id = %job.id, attempts = settings.max_attempts, "Report still processing after last status check");
    Ok(PollOutcome::TimedOut { attempts: settings.max_attempts })
}
