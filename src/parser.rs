//! TXT record parser and validator.

use url::Url;

use crate::constants::SPEC_VERSION;
use crate::error::AidError;
use crate::record::{AidRecord, AuthToken, ProtocolToken};

/// Canonical field values before validation.
///
/// Both the TXT parser and the well-known manifest adapter normalize their
/// input into this shape, so every record passes through one validator.
#[derive(Debug, Default)]
pub(crate) struct RawRecord {
    pub(crate) v: Option<String>,
    pub(crate) uri: Option<String>,
    pub(crate) proto: Option<String>,
    pub(crate) auth: Option<String>,
    pub(crate) desc: Option<String>,
    pub(crate) docs: Option<String>,
    pub(crate) dep: Option<String>,
}

impl RawRecord {
    /// Splits one TXT string into canonical fields.
    ///
    /// Keys are case-sensitive and resolved through their aliases; two keys
    /// resolving to the same canonical field reject the record. Unknown keys
    /// are ignored for forward compatibility.
    pub(crate) fn from_txt(raw: &str) -> Result<Self, AidError> {
        if raw.trim().is_empty() {
            return Err(AidError::invalid_txt("record is empty"));
        }

        let mut out = Self::default();
        for segment in raw.split(';') {
            let segment = segment.trim();
            let Some((key, value)) = segment.split_once('=') else {
                return Err(AidError::invalid_txt(format!(
                    "malformed segment '{segment}': expected key=value"
                )));
            };
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() {
                return Err(AidError::invalid_txt(format!(
                    "malformed segment '{segment}': empty key"
                )));
            }

            let (field, slot) = match key {
                "v" | "version" => ("v", &mut out.v),
                "uri" | "u" => ("uri", &mut out.uri),
                "proto" | "p" => ("proto", &mut out.proto),
                "auth" | "a" => ("auth", &mut out.auth),
                "desc" | "s" => ("desc", &mut out.desc),
                "docs" | "d" => ("docs", &mut out.docs),
                "dep" | "e" => ("dep", &mut out.dep),
                _ => continue,
            };
            if slot.is_some() {
                return Err(AidError::invalid_txt(format!(
                    "duplicate value for field '{field}' (key '{key}')"
                )));
            }
            *slot = Some(value.to_string());
        }

        Ok(out)
    }

    /// Validates the canonical fields into an [`AidRecord`].
    pub(crate) fn validate(self) -> Result<AidRecord, AidError> {
        let v = self
            .v
            .ok_or_else(|| AidError::invalid_txt("missing required field 'v'"))?;
        if v != SPEC_VERSION {
            return Err(AidError::invalid_txt(format!(
                "unsupported version '{v}', expected '{SPEC_VERSION}'"
            )));
        }

        let uri = self
            .uri
            .ok_or_else(|| AidError::invalid_txt("missing required field 'uri'"))?;
        validate_https_uri(&uri, "uri")?;

        let proto_raw = self
            .proto
            .ok_or_else(|| AidError::invalid_txt("missing required field 'proto'"))?;
        let proto = ProtocolToken::from_token(&proto_raw).ok_or_else(|| {
            AidError::invalid_txt(format!("unsupported value '{proto_raw}' for field 'proto'"))
        })?;

        let auth = match self.auth {
            Some(auth_raw) => Some(AuthToken::from_token(&auth_raw).ok_or_else(|| {
                AidError::invalid_txt(format!("unsupported value '{auth_raw}' for field 'auth'"))
            })?),
            None => None,
        };

        if let Some(docs) = &self.docs {
            validate_https_uri(docs, "docs")?;
        }

        Ok(AidRecord {
            uri,
            proto,
            auth,
            desc: self.desc,
            docs: self.docs,
            dep: self.dep,
        })
    }
}

fn validate_https_uri(value: &str, field: &str) -> Result<(), AidError> {
    let url = Url::parse(value).map_err(|e| {
        AidError::invalid_txt(format!("field '{field}' is not a valid absolute URI: {e}"))
    })?;
    if url.scheme() != "https" {
        return Err(AidError::invalid_txt(format!(
            "field '{field}' must use the https scheme, got '{}'",
            url.scheme()
        )));
    }
    Ok(())
}

/// Parses one TXT record string into a validated [`AidRecord`].
///
/// The input is a sequence of `key=value` pairs separated by `;`. Pure and
/// deterministic: the same input always yields field-wise identical results,
/// and the function is safe to call concurrently.
///
/// # Errors
///
/// Returns an [`AidError`] with code `ERR_INVALID_TXT` when the record is
/// structurally malformed, misses a required field, duplicates a canonical
/// field through aliases, or carries an unsupported version, URI scheme,
/// protocol, or auth value.
///
/// # Examples
///
/// ```
/// use aid_discovery::parse;
///
/// let record = parse("v=aid1;uri=https://api.example.com/mcp;proto=mcp;desc=Example").unwrap();
/// assert_eq!(record.uri(), "https://api.example.com/mcp");
/// assert_eq!(record.desc(), Some("Example"));
///
/// assert!(parse("v=aid1;uri=http://insecure.example.com;proto=mcp").is_err());
/// ```
pub fn parse(raw: &str) -> Result<AidRecord, AidError> {
    RawRecord::from_txt(raw)?.validate()
}
