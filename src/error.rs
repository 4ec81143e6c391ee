//! Error types for AID record parsing and discovery.

use std::fmt;

/// Stable machine-readable error codes.
///
/// The string form returned by [`ErrorCode::as_str`] is part of the external
/// contract: callers branch on it programmatically, so the symbols never
/// change meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A record failed structural or semantic validation, or more than one
    /// valid record was published at a single queried name.
    InvalidTxt,
    /// Discovery exhausted every candidate name without finding a valid record.
    NoRecord,
    /// A transport-level operational failure prevented completing discovery.
    DnsLookupFailed,
    /// The caller-supplied protocol hint is not a supported protocol token.
    UnsupportedProto,
    /// The well-known fallback fetch failed.
    FallbackFailed,
}

impl ErrorCode {
    /// Returns the stable wire symbol for this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidTxt => "ERR_INVALID_TXT",
            Self::NoRecord => "ERR_NO_RECORD",
            Self::DnsLookupFailed => "ERR_DNS_LOOKUP_FAILED",
            Self::UnsupportedProto => "ERR_UNSUPPORTED_PROTO",
            Self::FallbackFailed => "ERR_FALLBACK_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured discovery failure.
///
/// Carries a stable [`ErrorCode`] symbol plus a human-readable message.
/// Calling code branches on [`AidError::code`], never on message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AidError {
    /// The stable symbol classifying this failure.
    pub code: ErrorCode,
    /// Human-readable detail.
    pub message: String,
}

impl AidError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an `ERR_INVALID_TXT` error.
    #[must_use]
    pub fn invalid_txt(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTxt, message)
    }

    /// Creates an `ERR_NO_RECORD` error.
    #[must_use]
    pub fn no_record(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoRecord, message)
    }

    /// Creates an `ERR_DNS_LOOKUP_FAILED` error.
    #[must_use]
    pub fn dns_lookup_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DnsLookupFailed, message)
    }

    /// Creates an `ERR_UNSUPPORTED_PROTO` error.
    #[must_use]
    pub fn unsupported_proto(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedProto, message)
    }

    /// Creates an `ERR_FALLBACK_FAILED` error.
    #[must_use]
    pub fn fallback_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FallbackFailed, message)
    }
}

impl fmt::Display for AidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for AidError {}

/// Classification of a failed TXT lookup.
///
/// Discovery treats the two kinds differently: `NotFound` is an ordinary
/// "no answer here" that lets the walk continue quietly, while `Failed`
/// records an operational problem that surfaces as `ERR_DNS_LOOKUP_FAILED`
/// if the walk ends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// The name does not exist or carries no TXT records (NXDOMAIN, NODATA).
    NotFound,
    /// An operational failure: network unreachable, SERVFAIL, transport timeout.
    Failed,
}

/// Error returned by a [`TxtLookup`](crate::TxtLookup) transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// Failure classification.
    pub kind: LookupErrorKind,
    /// Human-readable detail from the transport.
    pub message: String,
}

impl LookupError {
    /// Creates a "name not found" lookup error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// Creates an operational lookup failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::Failed,
            message: message.into(),
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LookupErrorKind::NotFound => write!(f, "name not found: {}", self.message),
            LookupErrorKind::Failed => write!(f, "lookup failed: {}", self.message),
        }
    }
}

impl std::error::Error for LookupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_stable() {
        assert_eq!(ErrorCode::InvalidTxt.as_str(), "ERR_INVALID_TXT");
        assert_eq!(ErrorCode::NoRecord.as_str(), "ERR_NO_RECORD");
        assert_eq!(ErrorCode::DnsLookupFailed.as_str(), "ERR_DNS_LOOKUP_FAILED");
        assert_eq!(ErrorCode::UnsupportedProto.as_str(), "ERR_UNSUPPORTED_PROTO");
        assert_eq!(ErrorCode::FallbackFailed.as_str(), "ERR_FALLBACK_FAILED");
    }

    #[test]
    fn display_includes_symbol_and_message() {
        let err = AidError::invalid_txt("missing required field 'uri'");
        assert_eq!(
            err.to_string(),
            "ERR_INVALID_TXT: missing required field 'uri'"
        );
    }

    #[test]
    fn lookup_error_kinds() {
        assert_eq!(
            LookupError::not_found("x").kind,
            LookupErrorKind::NotFound
        );
        assert_eq!(LookupError::failed("x").kind, LookupErrorKind::Failed);
    }
}
