//! Authentication schemes applied to every request a client sends.
//!
//! An [`Auth`] is an ordered list of [`AuthScheme`]s. Each scheme contributes
//! one header; schemes are applied in sequence, so a later scheme writing the
//! same header name replaces an earlier one.
//!
//! ## Examples
//!
//! ```rust
//! use dynamix_lib::auth::{Auth, AuthScheme, Credentials};
//!
//! let auth = Auth::new()
//!     .with(AuthScheme::bearer("sk-123"))
//!     .with(AuthScheme::api_key_with_header("abc", "X-Service-Key"));
//! assert_eq!(auth.schemes().len(), 2);
//!
//! let from_env = Credentials {
//!     username: Some("ada".into()),
//!     password: Some("hunter2".into()),
//!     ..Credentials::default()
//! };
//! assert!(Auth::from_credentials(from_env).is_some());
//! ```

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::error::AuthError;

/// Default header for bearer tokens.
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

/// Default header for API keys.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// A single way of authenticating a request.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `<header>: Bearer <token>`
    Bearer {
        /// The bearer token.
        token: String,
        /// Header name, `Authorization` unless overridden.
        header: String,
    },
    /// `<header>: <key>`
    ApiKey {
        /// The API key.
        key: String,
        /// Header name, `X-API-Key` unless overridden.
        header: String,
    },
    /// `Authorization: Basic <base64(username:password)>`
    Basic {
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },
}

impl AuthScheme {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::bearer_with_header(token, DEFAULT_AUTH_HEADER)
    }

    pub fn bearer_with_header(token: impl Into<String>, header: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
            header: header.into(),
        }
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        Self::api_key_with_header(key, DEFAULT_API_KEY_HEADER)
    }

    pub fn api_key_with_header(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            header: header.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Short scheme label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "api_key",
            Self::Basic { .. } => "basic",
        }
    }

    /// Builds the header this scheme contributes.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name is invalid or the credential
    /// contains bytes not allowed in a header value.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue), AuthError> {
        let (name, raw) = match self {
            Self::Bearer { token, header } => (header_name(header)?, format!("Bearer {token}")),
            Self::ApiKey { key, header } => (header_name(header)?, key.clone()),
            Self::Basic { username, password } => {
                let encoded = BASE64.encode(format!("{username}:{password}"));
                (AUTHORIZATION, format!("Basic {encoded}"))
            }
        };

        let mut value =
            HeaderValue::try_from(raw).map_err(|_| AuthError::InvalidCredential {
                header: name.to_string(),
            })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

fn header_name(name: &str) -> Result<HeaderName, AuthError> {
    HeaderName::try_from(name).map_err(|_| AuthError::InvalidHeaderName {
        name: name.to_string(),
    })
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer { header, .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .field("header", header)
                .finish(),
            Self::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("key", &"<redacted>")
                .field("header", header)
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Raw credentials, typically collected from flags or the environment.
#[derive(Clone, Default)]
pub struct Credentials {
    pub token: Option<String>,
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Header for the bearer token; `Authorization` when `None`.
    pub auth_header: Option<String>,
    /// Header for the API key; `X-API-Key` when `None`.
    pub api_key_header: Option<String>,
}

/// Ordered set of auth schemes applied to each request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auth {
    schemes: Vec<AuthScheme>,
}

impl Auth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scheme, applied after the ones already present.
    pub fn with(mut self, scheme: AuthScheme) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn schemes(&self) -> &[AuthScheme] {
        &self.schemes
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Builds an auth stack from whatever credentials are present.
    ///
    /// Order is bearer, API key, basic. Basic auth needs both a username and
    /// a password. Returns `None` if nothing usable was supplied.
    pub fn from_credentials(credentials: Credentials) -> Option<Self> {
        let Credentials {
            token,
            api_key,
            username,
            password,
            auth_header,
            api_key_header,
        } = credentials;

        let mut auth = Self::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let header = auth_header.unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string());
            auth = auth.with(AuthScheme::bearer_with_header(token, header));
        }
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            let header = api_key_header.unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string());
            auth = auth.with(AuthScheme::api_key_with_header(key, header));
        }
        if let (Some(username), Some(password)) = (username, password) {
            if !username.is_empty() && !password.is_empty() {
                auth = auth.with(AuthScheme::basic(username, password));
            }
        }

        if auth.is_empty() {
            None
        } else {
            tracing::debug!(schemes = auth.schemes.len(), "Prepared authentication");
            Some(auth)
        }
    }

    /// Renders all schemes into one header map, in order.
    ///
    /// ## Errors
    ///
    /// Returns the first scheme that fails to produce a valid header.
    pub fn headers(&self) -> Result<HeaderMap, AuthError> {
        let mut headers = HeaderMap::new();
        for scheme in &self.schemes {
            let (name, value) = scheme.header()?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let (name, value) = AuthScheme::bearer("abc").header().unwrap();
        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value, "Bearer abc");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_custom_header() {
        let (name, value) = AuthScheme::bearer_with_header("abc", "X-Auth-Token")
            .header()
            .unwrap();
        assert_eq!(name.as_str(), "x-auth-token");
        assert_eq!(value, "Bearer abc");
    }

    #[test]
    fn test_api_key_header() {
        let (name, value) = AuthScheme::api_key("k-1").header().unwrap();
        assert_eq!(name.as_str(), "x-api-key");
        assert_eq!(value, "k-1");
    }

    #[test]
    fn test_basic_header() {
        let (name, value) = AuthScheme::basic("user", "pass").header().unwrap();
        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_invalid_header_name() {
        let err = AuthScheme::api_key_with_header("k", "bad header").header().unwrap_err();
        assert!(matches!(err, AuthError::InvalidHeaderName { .. }));
    }

    #[test]
    fn test_invalid_credential() {
        let err = AuthScheme::bearer("line\nbreak").header().unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential { .. }));
    }

    #[test]
    fn test_no_credentials_yields_none() {
        assert!(Auth::from_credentials(Credentials::default()).is_none());
    }

    #[test]
    fn test_basic_needs_both_parts() {
        let credentials = Credentials {
            username: Some("user".to_string()),
            ..Credentials::default()
        };
        assert!(Auth::from_credentials(credentials).is_none());
    }

    #[test]
    fn test_combined_schemes_in_order() {
        let credentials = Credentials {
            token: Some("t".to_string()),
            api_key: Some("k".to_string()),
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            api_key_header: Some("X-Key".to_string()),
            ..Credentials::default()
        };
        let auth = Auth::from_credentials(credentials).unwrap();
        let kinds: Vec<&str> = auth.schemes().iter().map(AuthScheme::kind).collect();
        assert_eq!(kinds, ["bearer", "api_key", "basic"]);

        let headers = auth.headers().unwrap();
        assert_eq!(headers["x-key"], "k");
        // basic runs last and replaces the bearer Authorization value
        assert_eq!(headers[AUTHORIZATION], "Basic dTpw");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!(
            "{:?}",
            Auth::new()
                .with(AuthScheme::bearer("super-secret"))
                .with(AuthScheme::basic("ada", "hunter2"))
        );
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("ada"));
    }
}
