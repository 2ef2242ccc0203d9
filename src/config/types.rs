use serde::{Deserialize, Serialize};
use crate::models::{FindingStatus, PolicySandbox, ReportRequest, ScanType};

pub const DEFAULT_API_BASE: &str = "https://api.veracode.com/appsec/v1";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    pub api: Option<ApiConfig>,
    pub credentials: Option<CredentialsConfig>,
    pub polling: Option<PollingConfig>,
    pub request: Option<RequestDefaults>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    /// Per-request timeout. Unset means requests never time out on their own.
    pub timeout_secs: Option<u64>,
}

/// Values may be `$ENV_VAR` references.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CredentialsConfig {
    pub api_key_id: Option<String>,
    pub api_key_secret: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PollingConfig {
    pub interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub on_timeout: Option<TimeoutAction>,
}

/// What the driver does when a job is still processing after the last
/// status check.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutAction {
    /// Fail the run.
    Abort,
    /// Record the timeout and move on to the next window.
    #[default]
    Skip,
}

impl TimeoutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Display for TimeoutAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RequestDefaults {
    pub scan_types: Option<Vec<ScanType>>,
    pub policy_sandbox: Option<PolicySandbox>,
    pub status: Option<FindingStatus>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub directory: Option<String>,
}

impl ReportConfig {
    pub fn api_base(&self) -> &str {
        self.api
            .as_ref()
            .and_then(|a| a.base_url.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn user_agent(&self) -> String {
        self.api
            .as_ref()
            .and_then(|a| a.user_agent.clone())
            .unwrap_or_else(|| format!("veracode-report/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn http_timeout_secs(&self) -> Option<u64> {
        self.api.as_ref().and_then(|a| a.timeout_secs)
    }

    pub fn poll_interval_secs(&self) -> u64 {
        self.polling
            .as_ref()
            .and_then(|p| p.interval_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
    }

    pub fn max_poll_attempts(&self) -> u32 {
        self.polling
            .as_ref()
            .and_then(|p| p.max_attempts)
            .unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS)
    }

    pub fn on_timeout(&self) -> TimeoutAction {
        self.polling
            .as_ref()
            .and_then(|p| p.on_timeout)
            .unwrap_or_default()
    }

    /// Request filters without a date window.
    pub fn request_template(&self) -> ReportRequest {
        let defaults = self.request.clone().unwrap_or_default();
        ReportRequest::new(
            defaults.scan_types.as_deref().unwrap_or(&ScanType::ALL),
            defaults.policy_sandbox.unwrap_or_default(),
            defaults.status.unwrap_or_default(),
        )
    }

    pub fn output_directory(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.directory.as_deref())
    }
}
