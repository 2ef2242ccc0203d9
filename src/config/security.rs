use reqwest::Url;
use crate::errors::ReportError;

const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

/// Signed requests carry the key id and a replayable signature, so the API
/// base must be HTTPS unless it points at a loopback test server.
pub fn validate_api_base(raw: &str) -> Result<Url, ReportError> {
    let url = Url::parse(raw)
        .map_err(|e| ReportError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "https" => {}
        "http" if url.host_str().is_some_and(|h| LOOPBACK_HOSTS.contains(&h)) => {}
        scheme => {
            return Err(ReportError::Config(format!(
                "API base URL must use https (got '{}')",
                scheme
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(ReportError::Config(format!("API base URL has no host: {}", raw)));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ReportError::Config("API base URL must not carry a query or fragment".into()));
    }

    Ok(url)
}
