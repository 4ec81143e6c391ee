//! Constants for AID record parsing and discovery.

use std::time::Duration;

/// The single supported record version literal.
pub const SPEC_VERSION: &str = "aid1";

/// The discovery subdomain prefixed to every candidate query name.
pub const DNS_SUBDOMAIN: &str = "_agent";

/// Minimum number of labels a parent suffix must retain for the hierarchical
/// walk to keep probing; the requested domain itself is always probed.
pub const MIN_WALK_LABELS: usize = 2;

/// Default deadline shared by all DNS lookups of one discovery call.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Path of the well-known fallback manifest.
pub const WELL_KNOWN_PATH: &str = "/.well-known/agent";

/// Default deadline for one well-known fallback fetch.
pub const WELL_KNOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Maximum accepted size of a well-known manifest body.
pub const WELL_KNOWN_MAX_BYTES: usize = 64 * 1024;
