//! JSON paths into analytics API responses.
//!
//! Every response wraps its payload in an `_embedded` object. These paths are
//! assumed stable; there is no schema versioning.

use serde_json::{Map, Value};
use crate::errors::ReportError;

pub const EMBEDDED_KEY: &str = "_embedded";
pub const ID_KEY: &str = "id";
pub const STATUS_KEY: &str = "status";
pub const FINDINGS_KEY: &str = "findings";

pub fn embedded(body: &Value) -> Result<&Map<String, Value>, ReportError> {
    body.get(EMBEDDED_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| ReportError::MalformedResponse(format!("missing '{}' object", EMBEDDED_KEY)))
}

/// Job id from a report-creation response.
pub fn job_id(body: &Value) -> Result<String, ReportError> {
    let id = embedded(body)?
        .get(ID_KEY)
        .ok_or_else(|| ReportError::MalformedResponse(format!("missing '{}.{}'", EMBEDDED_KEY, ID_KEY)))?;
    match id {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ReportError::MalformedResponse(format!(
            "unusable job id: {}",
            other
        ))),
    }
}

/// Raw status string from a status response. `None` when the field is absent
/// or not a string.
pub fn raw_status(body: &Value) -> Result<Option<String>, ReportError> {
    Ok(embedded(body)?
        .get(STATUS_KEY)
        .and_then(Value::as_str)
        .map(str::to_string))
}
