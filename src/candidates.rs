//! Candidate query-name generation for the hierarchical discovery walk.

use url::Url;

use crate::constants::{DNS_SUBDOMAIN, MIN_WALK_LABELS};

/// Normalizes a requested domain for candidate generation.
///
/// Lowercases, strips any trailing dot, drops a port if one was supplied,
/// and converts IDN labels to their A-label form by parsing the domain as a
/// URL host.
pub(crate) fn normalize_domain(domain: &str) -> String {
    let fallback = || domain.trim_end_matches('.').to_ascii_lowercase();
    match Url::parse(&format!("https://{domain}")) {
        Ok(url) => url
            .host_str()
            .map_or_else(fallback, |host| host.trim_end_matches('.').to_string()),
        Err(_) => fallback(),
    }
}

/// Generates the ordered candidate query names for one discovery call.
///
/// Level 0 is the requested domain itself; each further level strips the
/// left-most label, while the remaining suffix keeps at least
/// [`MIN_WALK_LABELS`] labels. With a protocol hint, each level yields the
/// underscore form, the plain form, and the bare form, most-specific first;
/// without one, only the bare form.
pub(crate) fn candidate_names(domain: &str, protocol: Option<&str>) -> Vec<String> {
    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
    if labels.is_empty() {
        return Vec::new();
    }

    let mut names = Vec::new();
    let mut start = 0;
    loop {
        let level = labels[start..].join(".");
        if let Some(proto) = protocol {
            names.push(format!("{DNS_SUBDOMAIN}._{proto}.{level}"));
            names.push(format!("{DNS_SUBDOMAIN}.{proto}.{level}"));
        }
        names.push(format!("{DNS_SUBDOMAIN}.{level}"));

        start += 1;
        if labels.len() - start < MIN_WALK_LABELS {
            break;
        }
    }
    names
}
