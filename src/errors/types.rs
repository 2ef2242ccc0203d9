use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid report request: {0}")]
    InvalidRequest(String),

    #[error("Report submission failed with HTTP {status}: {body}")]
    Submission { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Unexpected report status for job {job_id}: {}", status.as_deref().unwrap_or("<missing>"))]
    UnexpectedStatus { job_id: String, status: Option<String> },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Report job {job_id} still processing after {attempts} status checks")]
    PollTimeout { job_id: String, attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        ReportError::Network(e.to_string())
    }
}
