use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Mask the signature part of a Veracode HMAC authorization header.
pub fn redact_authorization(header: &str) -> String {
    match header.find("sig=") {
        Some(pos) => {
            let after = pos + "sig=".len();
            let end = header[after..].find(',').map(|i| after + i).unwrap_or(header.len());
            format!("{}[REDACTED]{}", &header[..after], &header[end..])
        }
        None => header.to_string(),
    }
}
