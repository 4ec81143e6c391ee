//! The validated AID record and its token enumerations.

use std::fmt;
use std::str::FromStr;

use crate::constants::SPEC_VERSION;
use crate::error::AidError;

/// Supported service protocol identifiers.
///
/// The wire value is converted to this closed set once at parse time, so an
/// unsupported value can never reach calling code as a bare string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolToken {
    /// MCP-style agent protocol.
    Mcp,
    /// Agent-to-agent protocol.
    A2a,
    /// OpenAPI-described HTTP endpoint.
    OpenApi,
    /// gRPC endpoint.
    Grpc,
    /// GraphQL endpoint.
    GraphQl,
    /// WebSocket endpoint.
    WebSocket,
    /// Zeroconf-advertised local service.
    Zeroconf,
    /// Locally-executed agent.
    Local,
}

impl ProtocolToken {
    /// All supported tokens, in wire order.
    pub const ALL: [Self; 8] = [
        Self::Mcp,
        Self::A2a,
        Self::OpenApi,
        Self::Grpc,
        Self::GraphQl,
        Self::WebSocket,
        Self::Zeroconf,
        Self::Local,
    ];

    /// Returns the wire token for this protocol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mcp => "mcp",
            Self::A2a => "a2a",
            Self::OpenApi => "openapi",
            Self::Grpc => "grpc",
            Self::GraphQl => "graphql",
            Self::WebSocket => "websocket",
            Self::Zeroconf => "zeroconf",
            Self::Local => "local",
        }
    }

    /// Looks up a wire token. Tokens are case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }
}

impl fmt::Display for ProtocolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolToken {
    type Err = AidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| AidError::unsupported_proto(format!("unsupported protocol '{s}'")))
    }
}

/// Supported authentication scheme hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthToken {
    /// No authentication required.
    None,
    /// Personal access token.
    Pat,
    /// Static API key.
    ApiKey,
    /// HTTP basic authentication.
    Basic,
    /// OAuth 2.0 device flow.
    OAuth2Device,
    /// OAuth 2.0 authorization code flow.
    OAuth2Code,
    /// Mutual TLS.
    Mtls,
    /// Scheme documented out of band.
    Custom,
}

impl AuthToken {
    /// All supported tokens, in wire order.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Pat,
        Self::ApiKey,
        Self::Basic,
        Self::OAuth2Device,
        Self::OAuth2Code,
        Self::Mtls,
        Self::Custom,
    ];

    /// Returns the wire token for this scheme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pat => "pat",
            Self::ApiKey => "apikey",
            Self::Basic => "basic",
            Self::OAuth2Device => "oauth2_device",
            Self::OAuth2Code => "oauth2_code",
            Self::Mtls => "mtls",
            Self::Custom => "custom",
        }
    }

    /// Looks up a wire token. Tokens are case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == token)
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthToken {
    type Err = AidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
            .ok_or_else(|| AidError::invalid_txt(format!("unsupported auth scheme '{s}'")))
    }
}

/// A parsed and validated AID record.
///
/// A value of this type is always fully valid: the required fields are
/// present, the endpoint URI is absolute `https`, and the protocol and auth
/// hints are members of their closed token sets. Records are immutable value
/// objects produced fresh per parse.
///
/// # Examples
///
/// ```
/// use aid_discovery::parse;
///
/// let record = parse("v=aid1;uri=https://api.example.com/mcp;p=mcp;a=pat").unwrap();
/// assert_eq!(record.uri(), "https://api.example.com/mcp");
/// assert_eq!(record.proto().as_str(), "mcp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AidRecord {
    pub(crate) uri: String,
    pub(crate) proto: ProtocolToken,
    pub(crate) auth: Option<AuthToken>,
    pub(crate) desc: Option<String>,
    pub(crate) docs: Option<String>,
    pub(crate) dep: Option<String>,
}

impl AidRecord {
    /// Returns the record version literal.
    #[must_use]
    pub const fn version(&self) -> &'static str {
        SPEC_VERSION
    }

    /// Returns the endpoint URI, exactly as published.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the service protocol.
    #[must_use]
    pub const fn proto(&self) -> ProtocolToken {
        self.proto
    }

    /// Returns the authentication scheme hint, if present.
    #[must_use]
    pub const fn auth(&self) -> Option<AuthToken> {
        self.auth
    }

    /// Returns the human-readable description, if present.
    #[must_use]
    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    /// Returns the documentation URI, if present.
    #[must_use]
    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref()
    }

    /// Returns the scheduled deprecation timestamp, if present.
    ///
    /// The value is the published string; expiry is enforced during
    /// discovery, not by the parser.
    #[must_use]
    pub fn dep(&self) -> Option<&str> {
        self.dep.as_deref()
    }

    /// Serializes the record to its canonical short-key TXT wire form.
    ///
    /// The result round-trips through [`parse`](crate::parse).
    ///
    /// # Examples
    ///
    /// ```
    /// use aid_discovery::parse;
    ///
    /// let record = parse("v=aid1;uri=https://api.example.com/mcp;proto=mcp").unwrap();
    /// assert_eq!(record.to_txt_record(), "v=aid1;u=https://api.example.com/mcp;p=mcp");
    /// ```
    #[must_use]
    pub fn to_txt_record(&self) -> String {
        let mut parts = vec![format!("v={SPEC_VERSION}")];
        parts.push(format!("u={}", self.uri));
        parts.push(format!("p={}", self.proto.as_str()));
        if let Some(auth) = self.auth {
            parts.push(format!("a={}", auth.as_str()));
        }
        if let Some(desc) = &self.desc {
            parts.push(format!("s={desc}"));
        }
        if let Some(docs) = &self.docs {
            parts.push(format!("d={docs}"));
        }
        if let Some(dep) = &self.dep {
            parts.push(format!("e={dep}"));
        }
        parts.join(";")
    }
}

impl fmt::Display for AidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_txt_record())
    }
}

impl FromStr for AidRecord {
    type Err = AidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AidRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_txt_record())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AidRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::parser::parse(&s).map_err(serde::de::Error::custom)
    }
}
