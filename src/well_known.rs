//! HTTPS well-known fallback fetcher.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::constants::{WELL_KNOWN_MAX_BYTES, WELL_KNOWN_PATH, WELL_KNOWN_TIMEOUT};
use crate::error::AidError;
use crate::parser::RawRecord;
use crate::record::AidRecord;
use crate::resolver::WellKnownFetch;

/// [`WellKnownFetch`] implementation over HTTPS.
///
/// Fetches `https://<domain>/.well-known/agent`, refusing redirects,
/// requiring an `application/json` body of at most
/// [`WELL_KNOWN_MAX_BYTES`], and validating the manifest through the same
/// validator the TXT parser uses.
pub struct HttpWellKnown {
    client: reqwest::Client,
}

impl HttpWellKnown {
    /// Creates a fetcher with a hardened HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ERR_FALLBACK_FAILED` if the client cannot be constructed.
    pub fn new() -> Result<Self, AidError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(WELL_KNOWN_TIMEOUT)
            .build()
            .map_err(|e| {
                AidError::fallback_failed(format!("failed to build well-known HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WellKnownFetch for HttpWellKnown {
    async fn fetch_well_known(&self, domain: &str) -> Result<AidRecord, AidError> {
        let url = format!("https://{domain}{WELL_KNOWN_PATH}");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AidError::fallback_failed(format!("well-known fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AidError::fallback_failed(format!(
                "well-known HTTP {status} from {url}"
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !content_type.starts_with("application/json") {
            return Err(AidError::fallback_failed(format!(
                "invalid content-type '{content_type}' for well-known (expected application/json)"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AidError::fallback_failed(format!("failed to read well-known body: {e}")))?;
        if body.len() > WELL_KNOWN_MAX_BYTES {
            return Err(AidError::fallback_failed(format!(
                "well-known response too large ({} bytes)",
                body.len()
            )));
        }

        let json: Value = serde_json::from_str(&body).map_err(|e| {
            AidError::fallback_failed(format!("invalid JSON in well-known response: {e}"))
        })?;
        raw_from_json(&json)?
            .validate()
            .map_err(|e| AidError::fallback_failed(format!("invalid well-known record: {e}")))
    }
}

/// Canonicalizes a well-known manifest into the shared validation shape.
///
/// Full key names win over their single-letter aliases; non-string values
/// are ignored.
fn raw_from_json(value: &Value) -> Result<RawRecord, AidError> {
    let object = value
        .as_object()
        .ok_or_else(|| AidError::fallback_failed("well-known manifest must be a JSON object"))?;
    let field = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
    };
    Ok(RawRecord {
        v: field("v").or_else(|| field("version")),
        uri: field("uri").or_else(|| field("u")),
        proto: field("proto").or_else(|| field("p")),
        auth: field("auth").or_else(|| field("a")),
        desc: field("desc").or_else(|| field("s")),
        docs: field("docs").or_else(|| field("d")),
        dep: field("dep").or_else(|| field("e")),
    })
}
