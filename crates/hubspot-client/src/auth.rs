//! Credential selection and request authentication.
//!
//! HubSpot accepts either a private-app access token or a legacy API key.
//! The policy for turning a [`Credential`] into request decorations lives
//! entirely in [`resolve_auth`], which the HTTP transport calls once at
//! construction time.

use std::fmt;

/// Query parameter carrying a legacy API key.
pub const API_KEY_QUERY_PARAM: &str = "hapikey";

/// A configured HubSpot credential.
///
/// The variants are mutually exclusive; see [`Credential::resolve`] for
/// the precedence rule.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Private-app or OAuth access token.
    BearerToken(String),
    /// Legacy API key.
    ApiKey(String),
}

impl Credential {
    /// Picks the credential to use from optional settings.
    ///
    /// An access token wins over an API key. Empty strings count as unset.
    pub fn resolve(access_token: Option<&str>, api_key: Option<&str>) -> Option<Self> {
        let present = |s: Option<&str>| s.filter(|v| !v.trim().is_empty()).map(str::to_string);

        present(access_token)
            .map(Credential::BearerToken)
            .or_else(|| present(api_key).map(Credential::ApiKey))
    }

    /// Short label for logs; never includes the secret.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::BearerToken(_) => "access-token",
            Credential::ApiKey(_) => "api-key",
        }
    }

    fn secret(&self) -> &str {
        match self {
            Credential::BearerToken(s) | Credential::ApiKey(s) => s,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential::{}(<redacted>)", self.kind())
    }
}

/// Headers and query parameters added to every outbound request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthParts {
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Extra query parameters appended after the caller's own.
    pub query: Vec<(String, String)>,
}

/// Turns a credential into request decorations.
///
/// Both credential kinds are sent as `Authorization: Bearer`. An API key is
/// additionally sent as the `hapikey` query parameter, which only happens
/// when no access token is configured.
pub fn resolve_auth(credential: Option<&Credential>) -> AuthParts {
    let Some(credential) = credential else {
        return AuthParts::default();
    };

    let mut parts = AuthParts {
        headers: vec![(
            "Authorization".to_string(),
            format!("Bearer {}", credential.secret()),
        )],
        query: Vec::new(),
    };

    if let Credential::ApiKey(key) = credential {
        parts
            .query
            .push((API_KEY_QUERY_PARAM.to_string(), key.clone()));
    }

    parts
}
