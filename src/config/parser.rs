use std::path::Path;
use crate::errors::ReportError;
use super::types::ReportConfig;
use super::security::validate_api_base;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<ReportConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<ReportConfig, ReportError> {
    // An empty file is a valid, all-defaults config
    if content.trim().is_empty() {
        return Ok(ReportConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: ReportConfig = serde_yaml::from_value(yaml)?;

    // Semantic checks
    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReportError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ReportError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed parsing below is authoritative
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &ReportConfig) -> Result<(), ReportError> {
    validate_api_base(config.api_base())?;

    if config.max_poll_attempts() == 0 {
        return Err(ReportError::Config("polling.max_attempts must be at least 1".into()));
    }

    if let Some(request) = &config.request {
        if request.scan_types.as_ref().is_some_and(|s| s.is_empty()) {
            return Err(ReportError::Config("request.scan_types must not be empty".into()));
        }
    }

    if config.poll_interval_secs() == 0 {
        warn!("polling.interval_secs is 0; status checks will run back to back");
    }

    Ok(())
}
