//! System DNS transport backed by hickory-resolver.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;

use crate::error::LookupError;
use crate::resolver::TxtLookup;

/// [`TxtLookup`] implementation over the default public resolvers.
///
/// NXDOMAIN and empty-answer responses are reported as
/// [`LookupErrorKind::NotFound`](crate::LookupErrorKind::NotFound) so the
/// discovery walk can distinguish "no record here" from operational
/// failures.
pub struct SystemDns {
    resolver: TokioAsyncResolver,
}

impl SystemDns {
    /// Creates a transport with default resolver configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ),
        }
    }
}

impl Default for SystemDns {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TxtLookup for SystemDns {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = self.resolver.txt_lookup(name).await.map_err(|e| {
            if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                LookupError::not_found(e.to_string())
            } else {
                LookupError::failed(e.to_string())
            }
        })?;

        Ok(lookup
            .iter()
            .map(|txt| {
                // Character strings over 255 bytes arrive chunked; rejoin them.
                txt.iter()
                    .map(|chunk| String::from_utf8_lossy(chunk.as_ref()))
                    .collect::<String>()
            })
            .collect())
    }
}
