use serde::Serialize;

const PROCESSING: &str = "PROCESSING";
const COMPLETED: &str = "COMPLETED";

/// Lifecycle state of a report-generation job as reported by the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum JobStatus {
    /// Accepted by the service, not yet polled.
    Submitted,
    Processing,
    Completed,
    /// Any other value, or no status field at all. Terminal by policy.
    Other(Option<String>),
}

impl JobStatus {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(PROCESSING) => JobStatus::Processing,
            Some(COMPLETED) => JobStatus::Completed,
            other => JobStatus::Other(other.map(str::to_string)),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Processing => write!(f, "{}", PROCESSING),
            Self::Completed => write!(f, "{}", COMPLETED),
            Self::Other(Some(raw)) => write!(f, "{}", raw),
            Self::Other(None) => write!(f, "<missing>"),
        }
    }
}

/// A report-generation job tracked by its opaque vendor id.
#[derive(Debug, Clone, Serialize)]
pub struct ReportJob {
    pub id: String,
    pub status: JobStatus,
}

impl ReportJob {
    pub fn submitted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Submitted,
        }
    }

    /// Record a status observed from the service.
    pub fn observe(&mut self, status: JobStatus) {
        self.status = status;
    }
}
