use std::path::PathBuf;
use crate::config::TimeoutAction;
use crate::models::{IntervalWindow, JobStatus};

/// Messages sent from the pipeline to a progress renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Run started with this many windows to process
    RunStarted {
        windows: usize,
    },
    /// A window's request is about to be submitted
    WindowStarted {
        window: Option<IntervalWindow>,
    },
    /// The service accepted a request
    JobSubmitted {
        job_id: String,
    },
    /// One status check finished
    StatusPolled {
        job_id: String,
        attempt: u32,
        max_attempts: u32,
        status: JobStatus,
    },
    /// A CSV file was written
    ReportWritten {
        path: PathBuf,
        rows: usize,
    },
    /// The report had no findings
    ReportEmpty {
        job_id: String,
    },
    /// The job was still processing after the last status check
    WindowTimedOut {
        job_id: String,
        attempts: u32,
        action: TimeoutAction,
    },
    /// All windows were processed
    RunFinished {
        files_written: usize,
        total_rows: usize,
    },
}
