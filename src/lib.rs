//! Parser and discovery resolver for AID agent records.
//!
//! This crate implements client-side discovery of an agent service endpoint
//! via DNS TXT records: given a domain (and an optional protocol hint), it
//! locates a single authoritative TXT record describing how to reach the
//! agent, parses it into a structured [`AidRecord`], and surfaces stable,
//! machine-checkable [`AidError`] symbols when the record is missing,
//! malformed, or ambiguous.
//!
//! # Record format
//!
//! One DNS TXT string of semicolon-delimited `key=value` pairs:
//!
//! ```text
//! v=aid1;uri=https://api.example.com/mcp;proto=mcp;auth=pat;desc=Example agent
//! ```
//!
//! Short aliases (`u`, `p`, `a`, `s`, …) are accepted on parse; duplicating a
//! field through differing aliases rejects the record.
//!
//! # Discovery
//!
//! Candidates are derived from the requested domain under the `_agent`
//! subdomain and probed strictly sequentially, walking from the exact host up
//! toward the registrable parent. With a protocol hint, protocol-scoped forms
//! (`_agent._mcp.<domain>`, `_agent.mcp.<domain>`) are tried before the bare
//! form at each level. The first name yielding exactly one valid record wins;
//! two or more valid records at one name are a configuration error.
//!
//! # Quick start
//!
//! ```no_run
//! use aid_discovery::{discover, DEFAULT_DNS_TIMEOUT};
//!
//! # async fn run() -> Result<(), aid_discovery::AidError> {
//! let found = discover("example.com", DEFAULT_DNS_TIMEOUT).await?;
//! println!(
//!     "agent endpoint: {} (matched {})",
//!     found.record.uri(),
//!     found.meta.query_name
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The parser is available standalone and never touches the network:
//!
//! ```
//! use aid_discovery::parse;
//!
//! let record = parse("v=aid1;uri=https://api.example.com/mcp;proto=mcp").unwrap();
//! assert_eq!(record.uri(), "https://api.example.com/mcp");
//! ```
//!
//! # Custom transports
//!
//! The DNS transport is an injected capability: implement [`TxtLookup`] and
//! hand it to [`Resolver::new`] to swap the network seam out, for tests or
//! otherwise. The `dns` feature (default) provides [`SystemDns`] over
//! hickory-resolver; the `well-known` feature adds [`HttpWellKnown`], an
//! HTTPS fallback consulted only after the DNS walk exhausts.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod candidates;
mod constants;
mod error;
mod parser;
pub mod prelude;
mod record;
mod resolver;
#[cfg(feature = "dns")]
mod transport;
#[cfg(feature = "well-known")]
mod well_known;

pub use builder::AidRecordBuilder;
pub use constants::{
    DEFAULT_DNS_TIMEOUT, DNS_SUBDOMAIN, MIN_WALK_LABELS, SPEC_VERSION, WELL_KNOWN_MAX_BYTES,
    WELL_KNOWN_PATH, WELL_KNOWN_TIMEOUT,
};
pub use error::{AidError, ErrorCode, LookupError, LookupErrorKind};
pub use parser::parse;
pub use record::{AidRecord, AuthToken, ProtocolToken};
pub use resolver::{
    Discovery, DiscoveryMeta, DiscoveryOptions, DiscoverySource, Resolver, TxtLookup,
    WellKnownFetch,
};
#[cfg(feature = "dns")]
pub use resolver::{discover, discover_with_options};
#[cfg(feature = "dns")]
pub use transport::SystemDns;
#[cfg(feature = "well-known")]
pub use well_known::HttpWellKnown;
