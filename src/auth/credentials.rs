use std::path::{Path, PathBuf};
use tracing::debug;
use crate::config::{resolve_credential, CredentialsConfig};
use crate::errors::ReportError;

pub const KEY_ID_ENV: &str = "VERACODE_API_KEY_ID";
pub const KEY_SECRET_ENV: &str = "VERACODE_API_KEY_SECRET";
pub const PROFILE_ENV: &str = "VERACODE_API_PROFILE";
const DEFAULT_PROFILE: &str = "default";

/// API key pair used for HMAC signing.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key_id: String,
    pub api_key_secret: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"[REDACTED]")
            .finish()
    }
}

impl ApiCredentials {
    /// Resolve credentials from, in order: the config file, the environment,
    /// then the `~/.veracode/credentials` profile.
    pub fn resolve(config: Option<&CredentialsConfig>) -> Result<Self, ReportError> {
        if let Some(creds) = config.and_then(from_config) {
            debug!("Using API credentials from config file");
            return Ok(creds);
        }

        if let (Ok(id), Ok(secret)) = (std::env::var(KEY_ID_ENV), std::env::var(KEY_SECRET_ENV)) {
            if !id.is_empty() && !secret.is_empty() {
                debug!("Using API credentials from environment");
                return Ok(Self { api_key_id: id, api_key_secret: secret });
            }
        }

        let profile = config
            .and_then(|c| c.profile.clone())
            .or_else(|| std::env::var(PROFILE_ENV).ok())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        match default_credentials_file() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), profile = %profile, "Reading credentials file");
                Self::from_file(&path, &profile)
            }
            _ => Err(ReportError::Authentication(format!(
                "No API credentials found: set {} and {} or create ~/.veracode/credentials",
                KEY_ID_ENV, KEY_SECRET_ENV
            ))),
        }
    }

    /// Read one profile section from an INI-style credentials file.
    pub fn from_file(path: &Path, profile: &str) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path)?;
        parse_profile(&content, profile).ok_or_else(|| {
            ReportError::Authentication(format!(
                "Profile '{}' in {} is missing veracode_api_key_id or veracode_api_key_secret",
                profile,
                path.display()
            ))
        })
    }
}

fn from_config(config: &CredentialsConfig) -> Option<ApiCredentials> {
    let id = config.api_key_id.as_deref().map(resolve_credential)?;
    let secret = config.api_key_secret.as_deref().map(resolve_credential)?;
    if id.is_empty() || secret.is_empty() || id.starts_with('$') || secret.starts_with('$') {
        return None;
    }
    Some(ApiCredentials { api_key_id: id, api_key_secret: secret })
}

fn default_credentials_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".veracode").join("credentials"))
}

fn parse_profile(content: &str, profile: &str) -> Option<ApiCredentials> {
    let mut in_section = false;
    let mut id = None;
    let mut secret = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = section.trim() == profile;
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "veracode_api_key_id" => id = Some(value.trim().to_string()),
                "veracode_api_key_secret" => secret = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    match (id, secret) {
        (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
            Some(ApiCredentials { api_key_id: id, api_key_secret: secret })
        }
        _ => None,
    }
}
