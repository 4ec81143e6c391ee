//! Property-based tests validating the TXT record parser.
//!
//! These tests generate random well-formed records and verify the parser
//! accepts them, and generate structured malformations it must reject.

use proptest::prelude::*;

use aid_discovery::{AuthToken, ProtocolToken, parse};

/// Strategies for generating grammar-conformant record inputs.
mod strategies {
    use super::*;

    /// Valid lowercase letters for the first character of a label.
    const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

    /// Valid alphanumeric characters for DNS labels.
    const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    /// Characters safe inside a free-text value (no delimiters).
    const TEXT_CHARS: &[u8] =
        b"abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,-_/";

    /// Generate a valid DNS label (1-16 chars, letter-first so a host can
    /// never be mistaken for a numeric IPv4 form).
    pub fn dns_label() -> impl Strategy<Value = String> {
        (
            prop::sample::select(LOWERCASE.to_vec()),
            prop::collection::vec(prop::sample::select(ALPHANUMERIC.to_vec()), 0..=15),
        )
            .prop_map(|(first, rest)| {
                let mut s = String::with_capacity(1 + rest.len());
                s.push(first as char);
                for c in rest {
                    s.push(c as char);
                }
                s
            })
    }

    /// Generate an absolute https endpoint URI.
    pub fn https_uri() -> impl Strategy<Value = String> {
        (
            prop::collection::vec(dns_label(), 2..=4),
            prop::collection::vec(dns_label(), 0..=3),
        )
            .prop_map(|(host, path)| {
                let mut uri = format!("https://{}", host.join("."));
                for segment in path {
                    uri.push('/');
                    uri.push_str(&segment);
                }
                uri
            })
    }

    /// Generate a supported protocol token.
    pub fn proto() -> impl Strategy<Value = ProtocolToken> {
        prop::sample::select(ProtocolToken::ALL.to_vec())
    }

    /// Generate a supported auth token.
    pub fn auth() -> impl Strategy<Value = AuthToken> {
        prop::sample::select(AuthToken::ALL.to_vec())
    }

    /// Generate free text containing no record delimiters.
    pub fn text_value() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(TEXT_CHARS.to_vec()), 1..=40)
            .prop_filter_map("text must not be blank after trimming", |chars| {
                let s: String = chars.into_iter().map(|c| c as char).collect();
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
    }

    /// Generate a complete well-formed record string, exercising both long
    /// and short key aliases.
    pub fn record_txt() -> impl Strategy<Value = String> {
        (
            https_uri(),
            proto(),
            prop::option::of(auth()),
            prop::option::of(text_value()),
            prop::option::of(https_uri()),
            any::<bool>(),
        )
            .prop_map(|(uri, proto, auth, desc, docs, short_keys)| {
                let (kv, ku, kp, ka, ks, kd) = if short_keys {
                    ("v", "u", "p", "a", "s", "d")
                } else {
                    ("version", "uri", "proto", "auth", "desc", "docs")
                };
                let mut txt = format!("{kv}=aid1;{ku}={uri};{kp}={proto}");
                if let Some(auth) = auth {
                    txt.push_str(&format!(";{ka}={auth}"));
                }
                if let Some(desc) = desc {
                    txt.push_str(&format!(";{ks}={desc}"));
                }
                if let Some(docs) = docs {
                    txt.push_str(&format!(";{kd}={docs}"));
                }
                txt
            })
    }
}

mod acceptance_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn well_formed_records_parse(txt in record_txt()) {
            let result = parse(&txt);
            prop_assert!(result.is_ok(), "failed to parse: {} ({:?})", txt, result.err());
        }

        #[test]
        fn required_fields_survive_parsing(uri in https_uri(), proto in proto()) {
            let txt = format!("v=aid1;uri={uri};proto={proto}");
            let record = parse(&txt).unwrap();
            prop_assert_eq!(record.uri(), uri.as_str());
            prop_assert_eq!(record.proto(), proto);
            prop_assert_eq!(record.auth(), None);
        }

        #[test]
        fn surrounding_whitespace_is_tolerated(uri in https_uri(), proto in proto()) {
            let txt = format!("  v=aid1 ; uri={uri} ; proto={proto}  ");
            let record = parse(&txt).unwrap();
            prop_assert_eq!(record.uri(), uri.as_str());
        }

        #[test]
        fn parsing_is_deterministic(txt in record_txt()) {
            let first = parse(&txt).unwrap();
            let second = parse(&txt).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

mod rejection_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn http_scheme_is_always_rejected(uri in https_uri(), proto in proto()) {
            let insecure = uri.replacen("https://", "http://", 1);
            let txt = format!("v=aid1;uri={insecure};proto={proto}");
            prop_assert!(parse(&txt).is_err(), "accepted insecure URI: {}", txt);
        }

        #[test]
        fn duplicate_uri_via_alias_is_rejected(uri in https_uri(), proto in proto()) {
            let txt = format!("v=aid1;uri={uri};u={uri};proto={proto}");
            prop_assert!(parse(&txt).is_err());
        }

        #[test]
        fn duplicate_proto_via_alias_is_rejected(uri in https_uri(), proto in proto()) {
            let txt = format!("v=aid1;uri={uri};proto={proto};p={proto}");
            prop_assert!(parse(&txt).is_err());
        }

        #[test]
        fn unknown_version_is_rejected(uri in https_uri(), proto in proto(), version in dns_label()) {
            prop_assume!(version != "aid1");
            let txt = format!("v={version};uri={uri};proto={proto}");
            prop_assert!(parse(&txt).is_err());
        }

        #[test]
        fn missing_proto_is_rejected(uri in https_uri()) {
            let txt = format!("v=aid1;uri={uri}");
            prop_assert!(parse(&txt).is_err());
        }

        #[test]
        fn unsupported_proto_token_is_rejected(uri in https_uri(), token in dns_label()) {
            prop_assume!(ProtocolToken::from_token(&token).is_none());
            let txt = format!("v=aid1;uri={uri};proto={token}");
            prop_assert!(parse(&txt).is_err());
        }
    }
}

mod roundtrip_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn serialize_reparse_is_field_wise_equal(txt in record_txt()) {
            let record = parse(&txt).unwrap();
            let reparsed = parse(&record.to_txt_record()).unwrap();
            prop_assert_eq!(record, reparsed);
        }

        #[test]
        fn unknown_keys_do_not_change_the_result(txt in record_txt(), key in dns_label(), value in dns_label()) {
            prop_assume!(!matches!(
                key.as_str(),
                "v" | "version" | "uri" | "u" | "proto" | "p" | "auth" | "a"
                    | "desc" | "s" | "docs" | "d" | "dep" | "e"
            ));
            let without = parse(&txt).unwrap();
            let with = parse(&format!("{txt};{key}={value}")).unwrap();
            prop_assert_eq!(without, with);
        }
    }
}
