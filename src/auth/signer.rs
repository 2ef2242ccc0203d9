use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;
use crate::errors::ReportError;
use super::credentials::ApiCredentials;

type HmacSha256 = Hmac<Sha256>;

pub const AUTH_SCHEME: &str = "VERACODE-HMAC-SHA-256";
const REQUEST_VERSION: &[u8] = b"vcode_request_version_1";

/// Produces the `Authorization` header value for an outbound request.
///
/// Built once per run and shared by every call the client makes.
pub trait RequestSigner: Send + Sync {
    fn authorization(&self, method: &str, url: &Url) -> Result<String, ReportError>;
}

/// Veracode HMAC request signing.
pub struct VeracodeHmacSigner {
    key_id: String,
    secret: Vec<u8>,
}

impl VeracodeHmacSigner {
    pub fn new(credentials: &ApiCredentials) -> Result<Self, ReportError> {
        let secret = hex::decode(credentials.api_key_secret.trim())
            .map_err(|e| ReportError::Authentication(format!("API key secret is not valid hex: {}", e)))?;
        Ok(Self {
            key_id: credentials.api_key_id.trim().to_string(),
            secret,
        })
    }

    /// Sign with an explicit timestamp (epoch millis) and hex nonce.
    pub fn sign_with(&self, method: &str, url: &Url, timestamp_ms: i64, nonce: &str) -> Result<String, ReportError> {
        let host = url.host_str()
            .ok_or_else(|| ReportError::Config(format!("URL has no host: {}", url)))?;
        let path = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        let signing_data = format!(
            "id={}&host={}&url={}&method={}",
            self.key_id,
            host,
            path,
            method.to_uppercase()
        );

        let nonce_bytes = hex::decode(nonce)
            .map_err(|e| ReportError::Authentication(format!("Invalid nonce: {}", e)))?;
        let key_nonce = hmac_sign(&self.secret, &nonce_bytes)?;
        let key_date = hmac_sign(&key_nonce, timestamp_ms.to_string().as_bytes())?;
        let signature_key = hmac_sign(&key_date, REQUEST_VERSION)?;
        let signature = hex::encode(hmac_sign(&signature_key, signing_data.as_bytes())?);

        Ok(format!(
            "{} id={},ts={},nonce={},sig={}",
            AUTH_SCHEME, self.key_id, timestamp_ms, nonce, signature
        ))
    }
}

impl RequestSigner for VeracodeHmacSigner {
    fn authorization(&self, method: &str, url: &Url) -> Result<String, ReportError> {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        let nonce = hex::encode(uuid::Uuid::new_v4().as_bytes());
        self.sign_with(method, url, timestamp_ms, &nonce)
    }
}

fn hmac_sign(key: &[u8], data: &[u8]) -> Result<Vec<u8>, ReportError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ReportError::Authentication(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
