use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use crate::errors::ReportError;

/// Report type sent with every request. The analytics API only exposes findings.
pub const FINDINGS_REPORT_TYPE: &str = "findings";

/// Kind of scan a finding originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanType {
    #[serde(rename = "Static Analysis", alias = "static")]
    Static,
    #[serde(rename = "Dynamic Analysis", alias = "dynamic")]
    Dynamic,
    #[serde(rename = "Manual Analysis", alias = "manual")]
    Manual,
    #[serde(rename = "SCA", alias = "sca")]
    Sca,
}

impl ScanType {
    pub const ALL: [ScanType; 4] = [ScanType::Static, ScanType::Dynamic, ScanType::Manual, ScanType::Sca];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "Static Analysis",
            Self::Dynamic => "Dynamic Analysis",
            Self::Manual => "Manual Analysis",
            Self::Sca => "SCA",
        }
    }
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether findings come from policy scans or sandbox scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolicySandbox {
    #[default]
    #[serde(alias = "policy")]
    Policy,
    #[serde(alias = "sandbox")]
    Sandbox,
}

/// Finding status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    #[default]
    Open,
    Closed,
}

/// Body of a report-generation request.
///
/// Field names follow the analytics API wire format. The window dates are
/// omitted entirely when unset, which lets the vendor apply its default range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "scan_type")]
    pub scan_types: Vec<ScanType>,
    pub policy_sandbox: PolicySandbox,
    #[serde(rename = "status")]
    pub status_filter: FindingStatus,
    #[serde(default = "default_report_type")]
    pub report_type: String,
    #[serde(
        rename = "last_updated_start_date",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_date"
    )]
    pub window_start: Option<NaiveDate>,
    #[serde(
        rename = "last_updated_end_date",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_date"
    )]
    pub window_end: Option<NaiveDate>,
}

fn default_report_type() -> String {
    FINDINGS_REPORT_TYPE.to_string()
}

/// Accepts a `YYYY-MM-DD` string, an empty string or null.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl ReportRequest {
    pub fn new(scan_types: &[ScanType], policy_sandbox: PolicySandbox, status_filter: FindingStatus) -> Self {
        let mut deduped = Vec::with_capacity(scan_types.len());
        for scan_type in scan_types {
            if !deduped.contains(scan_type) {
                deduped.push(*scan_type);
            }
        }
        Self {
            scan_types: deduped,
            policy_sandbox,
            status_filter,
            report_type: default_report_type(),
            window_start: None,
            window_end: None,
        }
    }

    /// Copy of this request filtered to `[start, end)`.
    pub fn with_window(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            window_start: Some(start),
            window_end: Some(end),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.scan_types.is_empty() {
            return Err(ReportError::InvalidRequest("at least one scan type is required".into()));
        }
        if let (Some(start), Some(end)) = (self.window_start, self.window_end) {
            if start > end {
                return Err(ReportError::InvalidRequest(format!(
                    "window start {} is after window end {}",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self::new(&ScanType::ALL, PolicySandbox::Policy, FindingStatus::Open)
    }
}
