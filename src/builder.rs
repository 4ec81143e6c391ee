//! Builder for constructing AID records programmatically.

use crate::constants::SPEC_VERSION;
use crate::error::AidError;
use crate::parser::RawRecord;
use crate::record::{AidRecord, AuthToken, ProtocolToken};

/// Builds an [`AidRecord`] from typed components.
///
/// The finished record passes through the same validator as the TXT parser,
/// so a built record is publishable as-is via
/// [`AidRecord::to_txt_record`].
///
/// # Examples
///
/// ```
/// use aid_discovery::{AidRecordBuilder, AuthToken, ProtocolToken};
///
/// let record = AidRecordBuilder::new("https://api.example.com/mcp", ProtocolToken::Mcp)
///     .auth(AuthToken::Pat)
///     .desc("Example agent")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     record.to_txt_record(),
///     "v=aid1;u=https://api.example.com/mcp;p=mcp;a=pat;s=Example agent"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AidRecordBuilder {
    uri: String,
    proto: ProtocolToken,
    auth: Option<AuthToken>,
    desc: Option<String>,
    docs: Option<String>,
    dep: Option<String>,
}

impl AidRecordBuilder {
    /// Starts a builder with the two caller-supplied required fields.
    #[must_use]
    pub fn new(uri: impl Into<String>, proto: ProtocolToken) -> Self {
        Self {
            uri: uri.into(),
            proto,
            auth: None,
            desc: None,
            docs: None,
            dep: None,
        }
    }

    /// Sets the authentication scheme hint.
    #[must_use]
    pub const fn auth(mut self, auth: AuthToken) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Sets the documentation URI.
    #[must_use]
    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Sets the scheduled deprecation timestamp (RFC 3339, UTC).
    #[must_use]
    pub fn dep(mut self, dep: impl Into<String>) -> Self {
        self.dep = Some(dep.into());
        self
    }

    /// Validates the assembled fields into an [`AidRecord`].
    ///
    /// # Errors
    ///
    /// Returns `ERR_INVALID_TXT` when the endpoint or docs URI is not an
    /// absolute `https` URI.
    pub fn build(self) -> Result<AidRecord, AidError> {
        RawRecord {
            v: Some(SPEC_VERSION.to_string()),
            uri: Some(self.uri),
            proto: Some(self.proto.as_str().to_string()),
            auth: self.auth.map(|a| a.as_str().to_string()),
            desc: self.desc,
            docs: self.docs,
            dep: self.dep,
        }
        .validate()
    }
}
