//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use aid_discovery::prelude::*;
//!
//! let record = parse("v=aid1;uri=https://api.example.com/mcp;proto=mcp").unwrap();
//! assert_eq!(record.proto(), ProtocolToken::Mcp);
//! ```

pub use crate::{
    // Core types
    AidRecord, AuthToken, Discovery, DiscoveryMeta, DiscoveryOptions, DiscoverySource,
    ProtocolToken, Resolver,
    // Builder
    AidRecordBuilder,
    // Capabilities
    TxtLookup, WellKnownFetch,
    // Errors
    AidError, ErrorCode, LookupError, LookupErrorKind,
    // Parsing
    parse,
    // Constants
    DEFAULT_DNS_TIMEOUT, DNS_SUBDOMAIN, MIN_WALK_LABELS, SPEC_VERSION, WELL_KNOWN_MAX_BYTES,
    WELL_KNOWN_PATH, WELL_KNOWN_TIMEOUT,
};

#[cfg(feature = "dns")]
pub use crate::SystemDns;

#[cfg(feature = "well-known")]
pub use crate::HttpWellKnown;
