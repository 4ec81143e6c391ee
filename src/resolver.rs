//! Discovery resolver: the hierarchical candidate walk and answer policy.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

use crate::candidates::{candidate_names, normalize_domain};
use crate::constants::WELL_KNOWN_PATH;
use crate::error::{AidError, ErrorCode, LookupError, LookupErrorKind};
use crate::parser::parse;
use crate::record::{AidRecord, ProtocolToken};

/// The injected DNS transport capability.
///
/// The resolver's only network-facing seam: given a fully-qualified name,
/// return every TXT string published there. Swappable for testing.
#[async_trait]
pub trait TxtLookup: Send + Sync {
    /// Resolves all TXT strings published at `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] classified as NotFound for NXDOMAIN or
    /// empty-answer responses, and Failed for operational problems.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

#[async_trait]
impl<T: TxtLookup + ?Sized> TxtLookup for std::sync::Arc<T> {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        (**self).lookup_txt(name).await
    }
}

/// The injected well-known fallback capability.
///
/// Invoked only after the DNS walk exhausts, under the remaining deadline of
/// the discovery call.
#[async_trait]
pub trait WellKnownFetch: Send + Sync {
    /// Fetches and validates the well-known manifest for `domain`.
    ///
    /// # Errors
    ///
    /// Returns `ERR_FALLBACK_FAILED` when the manifest cannot be fetched or
    /// does not validate.
    async fn fetch_well_known(&self, domain: &str) -> Result<AidRecord, AidError>;
}

/// Options shaping one discovery call.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Protocol hint; when set, protocol-scoped candidate names are tried
    /// before the bare form at every level. Must be a supported protocol
    /// token or the call fails with `ERR_UNSUPPORTED_PROTO` before any
    /// query is issued.
    pub protocol: Option<String>,
    /// Enables the well-known fallback after DNS walk exhaustion.
    pub well_known_fallback: bool,
}

/// Which mechanism produced a discovery result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverySource {
    /// A DNS TXT candidate answered.
    Dns,
    /// The well-known fallback manifest answered.
    WellKnown,
}

/// Diagnostic trail of a successful discovery.
///
/// Exposed for observability; nothing here feeds back into control decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryMeta {
    /// The candidate name (or well-known URL) that produced the record.
    pub query_name: String,
    /// The raw TXT string that validated. For a well-known result this is
    /// the record's canonical wire form.
    pub raw: String,
    /// Every candidate name queried, in issue order.
    pub queried: Vec<String>,
    /// The mechanism that produced the record.
    pub source: DiscoverySource,
}

/// A successful discovery: the validated record plus its diagnostic trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// The parsed and validated record.
    pub record: AidRecord,
    /// The diagnostic trail.
    pub meta: DiscoveryMeta,
}

/// Client-side discovery of an agent endpoint via DNS TXT records.
///
/// Owns its injected capabilities; concurrent calls share no mutable state,
/// so one resolver can serve many simultaneous discoveries.
///
/// # Examples
///
/// ```no_run
/// use aid_discovery::{Resolver, SystemDns, DEFAULT_DNS_TIMEOUT};
///
/// # async fn run() -> Result<(), aid_discovery::AidError> {
/// let resolver = Resolver::new(SystemDns::new());
/// let found = resolver.discover("example.com", DEFAULT_DNS_TIMEOUT).await?;
/// println!("agent endpoint: {}", found.record.uri());
/// # Ok(())
/// # }
/// ```
pub struct Resolver<T> {
    transport: T,
    well_known: Option<Box<dyn WellKnownFetch>>,
}

impl<T: TxtLookup> Resolver<T> {
    /// Creates a resolver over the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            well_known: None,
        }
    }

    /// Attaches a well-known fallback capability.
    ///
    /// The fallback still runs only when a call opts in via
    /// [`DiscoveryOptions::well_known_fallback`].
    #[must_use]
    pub fn with_well_known(mut self, fetcher: impl WellKnownFetch + 'static) -> Self {
        self.well_known = Some(Box::new(fetcher));
        self
    }

    /// Discovers the agent record for `domain`, DNS-only and without a
    /// protocol hint.
    ///
    /// `timeout` is one shared deadline governing every lookup of the call.
    ///
    /// # Errors
    ///
    /// See [`Resolver::discover_with_options`].
    pub async fn discover(
        &self,
        domain: &str,
        timeout: Duration,
    ) -> Result<Discovery, AidError> {
        self.discover_with_options(domain, timeout, DiscoveryOptions::default())
            .await
    }

    /// Discovers the agent record for `domain` with explicit options.
    ///
    /// Candidate names are probed strictly sequentially, most-specific
    /// first; the walk stops at the first name yielding exactly one valid
    /// record. Malformed TXT strings at a name are dropped silently, and
    /// records past their scheduled deprecation do not count as valid; two
    /// or more valid records at one name are a configuration error and fail
    /// the call immediately.
    ///
    /// # Errors
    ///
    /// - `ERR_UNSUPPORTED_PROTO`: the protocol hint is not a supported
    ///   token (no query is issued).
    /// - `ERR_INVALID_TXT`: ambiguity at one name, or the only record at a
    ///   name is past its scheduled deprecation.
    /// - `ERR_NO_RECORD`: every candidate (and the fallback, if enabled)
    ///   was exhausted without a valid record.
    /// - `ERR_DNS_LOOKUP_FAILED`: the shared deadline elapsed, or the walk
    ///   ended on a transport-level operational failure.
    /// - `ERR_FALLBACK_FAILED`: the well-known fallback ran and failed.
    pub async fn discover_with_options(
        &self,
        domain: &str,
        timeout: Duration,
        options: DiscoveryOptions,
    ) -> Result<Discovery, AidError> {
        let proto = match options.protocol.as_deref() {
            Some(hint) => Some(ProtocolToken::from_token(hint).ok_or_else(|| {
                AidError::unsupported_proto(format!("unsupported protocol hint '{hint}'"))
            })?),
            None => None,
        };

        let normalized = normalize_domain(domain);
        let deadline = Instant::now() + timeout;
        let mut queried = Vec::new();

        let walk_err = match self.walk(&normalized, proto, deadline, &mut queried).await {
            Ok((record, raw, query_name)) => {
                return Ok(Discovery {
                    record,
                    meta: DiscoveryMeta {
                        query_name,
                        raw,
                        queried,
                        source: DiscoverySource::Dns,
                    },
                });
            }
            Err(e) => e,
        };

        if !options.well_known_fallback
            || !matches!(
                walk_err.code,
                ErrorCode::NoRecord | ErrorCode::DnsLookupFailed
            )
        {
            return Err(walk_err);
        }
        let Some(fetcher) = &self.well_known else {
            return Err(walk_err);
        };
        if Instant::now() >= deadline {
            return Err(walk_err);
        }

        debug!(domain = %normalized, "DNS walk exhausted, trying well-known fallback");
        let record = match timeout_at(deadline, fetcher.fetch_well_known(&normalized)).await {
            Err(_) => {
                return Err(AidError::fallback_failed(format!(
                    "deadline exceeded during well-known fetch for {normalized}"
                )));
            }
            Ok(Err(e)) => return Err(e),
            Ok(Ok(record)) => record,
        };

        let query_name = format!("https://{normalized}{WELL_KNOWN_PATH}");
        check_deprecation(&record, &query_name)?;
        let raw = record.to_txt_record();
        Ok(Discovery {
            record,
            meta: DiscoveryMeta {
                query_name,
                raw,
                queried,
                source: DiscoverySource::WellKnown,
            },
        })
    }

    /// Discovers records for several domains concurrently, returning the
    /// successful subset in input order.
    pub async fn discover_multiple<I>(
        &self,
        domains: I,
        timeout: Duration,
        options: DiscoveryOptions,
    ) -> Vec<Discovery>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let calls = domains.into_iter().map(|domain| {
            let options = options.clone();
            async move {
                self.discover_with_options(domain.as_ref(), timeout, options)
                    .await
            }
        });
        join_all(calls)
            .await
            .into_iter()
            .filter_map(Result::ok)
            .collect()
    }

    /// Returns true if `domain` publishes a discoverable agent record.
    pub async fn has_record(&self, domain: &str, timeout: Duration) -> bool {
        self.discover(domain, timeout).await.is_ok()
    }

    /// Walks the candidate names, classifying each answer set.
    ///
    /// Returns the record, its raw TXT string, and the name that answered.
    async fn walk(
        &self,
        domain: &str,
        proto: Option<ProtocolToken>,
        deadline: Instant,
        queried: &mut Vec<String>,
    ) -> Result<(AidRecord, String, String), AidError> {
        let names = candidate_names(domain, proto.map(ProtocolToken::as_str));
        // Outcome of the final candidate decides how exhaustion is classed.
        let mut final_failure: Option<LookupError> = None;

        for name in names {
            final_failure = None;
            queried.push(name.clone());
            debug!(candidate = %name, "querying TXT record");

            let answers = match timeout_at(deadline, self.transport.lookup_txt(&name)).await {
                Err(_) => {
                    return Err(AidError::dns_lookup_failed(format!(
                        "discovery deadline exceeded while querying {name}"
                    )));
                }
                Ok(Err(e)) if e.kind == LookupErrorKind::NotFound => {
                    debug!(candidate = %name, "name not found, continuing walk");
                    continue;
                }
                Ok(Err(e)) => {
                    debug!(candidate = %name, error = %e, "transport failure, continuing walk");
                    final_failure = Some(e);
                    continue;
                }
                Ok(Ok(answers)) => answers,
            };

            let mut valid = Vec::new();
            let mut expired: Option<AidError> = None;
            for raw in &answers {
                let trimmed = raw.trim();
                match parse(trimmed) {
                    Ok(record) => match check_deprecation(&record, &name) {
                        Ok(()) => valid.push((record, trimmed.to_string())),
                        Err(e) => {
                            debug!(candidate = %name, error = %e, "excluding deprecated record");
                            expired = Some(e);
                        }
                    },
                    Err(e) => {
                        debug!(candidate = %name, error = %e, "dropping TXT string that is not a valid record");
                    }
                }
            }

            if valid.len() > 1 {
                return Err(AidError::invalid_txt(format!(
                    "multiple valid AID records found for {name}; publish exactly one record per queried name"
                )));
            }
            if let Some((record, raw)) = valid.pop() {
                return Ok((record, raw, name));
            }
            // A name whose only parseable record has expired is a
            // configuration error, not a miss.
            if let Some(e) = expired {
                return Err(e);
            }
        }

        match final_failure {
            Some(e) => Err(AidError::dns_lookup_failed(format!(
                "DNS lookup failed for {}: {e}",
                queried.last().map_or(domain, String::as_str)
            ))),
            None => Err(AidError::no_record(format!(
                "no valid AID record found for {domain}"
            ))),
        }
    }
}

/// Rejects a record whose scheduled deprecation has passed; a future date
/// only logs a warning. Unparsable timestamps are ignored.
fn check_deprecation(record: &AidRecord, origin: &str) -> Result<(), AidError> {
    let Some(dep) = record.dep() else {
        return Ok(());
    };
    let Ok(when) = OffsetDateTime::parse(dep, &Rfc3339) else {
        return Ok(());
    };
    if when <= OffsetDateTime::now_utc() {
        return Err(AidError::invalid_txt(format!(
            "record for {origin} was deprecated on {dep}"
        )));
    }
    warn!(origin, deprecated_on = dep, "record is scheduled for deprecation");
    Ok(())
}

/// Discovers the agent record for `domain` over the system DNS transport.
///
/// DNS-only, no protocol hint. `timeout` is the single deadline shared by
/// every lookup of the call.
///
/// # Errors
///
/// See [`Resolver::discover_with_options`].
#[cfg(feature = "dns")]
pub async fn discover(domain: &str, timeout: Duration) -> Result<Discovery, AidError> {
    Resolver::new(crate::transport::SystemDns::new())
        .discover(domain, timeout)
        .await
}

/// Discovers the agent record for `domain` over the system DNS transport
/// with explicit options.
///
/// With the `well-known` feature enabled and
/// [`DiscoveryOptions::well_known_fallback`] set, an HTTPS fetch of the
/// well-known manifest runs after DNS exhaustion.
///
/// # Errors
///
/// See [`Resolver::discover_with_options`].
#[cfg(feature = "dns")]
pub async fn discover_with_options(
    domain: &str,
    timeout: Duration,
    options: DiscoveryOptions,
) -> Result<Discovery, AidError> {
    let resolver = Resolver::new(crate::transport::SystemDns::new());
    #[cfg(feature = "well-known")]
    let resolver = if options.well_known_fallback {
        resolver.with_well_known(crate::well_known::HttpWellKnown::new()?)
    } else {
        resolver
    };
    resolver
        .discover_with_options(domain, timeout, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_dns_only() {
        let options = DiscoveryOptions::default();
        assert_eq!(options.protocol, None);
        assert!(!options.well_known_fallback);
    }

    #[test]
    fn deprecation_in_the_past_rejects() {
        let record =
            parse("v=aid1;u=https://api.example.com;p=mcp;e=2020-01-01T00:00:00Z").unwrap();
        let err = check_deprecation(&record, "_agent.example.com").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTxt);
    }

    #[test]
    fn deprecation_in_the_future_is_tolerated() {
        let record =
            parse("v=aid1;u=https://api.example.com;p=mcp;e=2099-01-01T00:00:00Z").unwrap();
        assert!(check_deprecation(&record, "_agent.example.com").is_ok());
    }

    #[test]
    fn unparsable_deprecation_is_ignored() {
        let record = parse("v=aid1;u=https://api.example.com;p=mcp;e=someday").unwrap();
        assert!(check_deprecation(&record, "_agent.example.com").is_ok());
    }
}
