//! Applications - named remote backends.
//!
//! An application owns a base URL, an optional authentication descriptor,
//! an ordered middleware stack, and one lazily built [`Connection`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::errors::{Error, Result};
use crate::sources::connection::{Connection, Middleware};
use crate::sources::transport::{HttpTransport, Transport};

/// Authentication applied to every request of an application.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP basic credentials.
    Basic { user: String, password: String },
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `Authorization: Token token="<token>"`
    Token(String),
    /// `Authorization: <scheme> <credentials>`
    Custom { scheme: String, credentials: String },
}

impl Auth {
    /// Short name of the scheme, for listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Auth::Basic { .. } => "basic",
            Auth::Bearer(_) => "bearer",
            Auth::Token(_) => "token",
            Auth::Custom { .. } => "custom",
        }
    }

    /// The literal `Authorization` header value.
    ///
    /// `None` for basic auth, which the transport encodes itself.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Auth::Basic { .. } => None,
            Auth::Bearer(token) => Some(format!("Bearer {}", token)),
            Auth::Token(token) => Some(format!("Token token=\"{}\"", token)),
            Auth::Custom {
                scheme,
                credentials,
            } => Some(format!("{} {}", scheme, credentials)),
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Auth::Token(_) => f.write_str("Token(<redacted>)"),
            Auth::Custom { scheme, .. } => f
                .debug_struct("Custom")
                .field("scheme", scheme)
                .field("credentials", &"<redacted>")
                .finish(),
        }
    }
}

/// A named remote backend.
#[derive(Debug, Clone)]
pub struct Application {
    name: String,
    url: Option<String>,
    auth: Option<Auth>,
    middleware: Vec<Arc<dyn Middleware>>,
    transport: Option<Arc<dyn Transport>>,
    connection: OnceLock<Connection>,
}

impl Application {
    /// Create an application without a URL.
    pub fn new(name: impl Into<String>) -> Self {
        Application {
            name: name.into(),
            url: None,
            auth: None,
            middleware: Vec::new(),
            transport: None,
            connection: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized base URL.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    /// Set the base URL. `http://` is assumed when no scheme is given.
    pub fn set_url(&mut self, url: &str) -> Result<&mut Self> {
        self.url = Some(normalize_base_url(&self.name, url)?);
        self.connection = OnceLock::new();
        Ok(self)
    }

    pub fn basic_auth(&mut self, user: impl Into<String>, password: impl Into<String>) -> &mut Self {
        self.authorization(Auth::Basic {
            user: user.into(),
            password: password.into(),
        })
    }

    pub fn bearer_auth(&mut self, token: impl Into<String>) -> &mut Self {
        self.authorization(Auth::Bearer(token.into()))
    }

    pub fn token_auth(&mut self, token: impl Into<String>) -> &mut Self {
        self.authorization(Auth::Token(token.into()))
    }

    /// Set the authentication descriptor. The last one set wins.
    pub fn authorization(&mut self, auth: Auth) -> &mut Self {
        if let Some(previous) = &self.auth {
            tracing::debug!(
                "{}: replacing {} auth with {} auth",
                self.name,
                previous.kind(),
                auth.kind()
            );
        }
        self.auth = Some(auth);
        self.connection = OnceLock::new();
        self
    }

    /// Append a middleware. Middleware runs in registration order.
    pub fn use_middleware<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self.connection = OnceLock::new();
        self
    }

    /// Replace the HTTP transport.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.transport = Some(transport);
        self.connection = OnceLock::new();
        self
    }

    /// The connection for this application, built on first use.
    pub fn connection(&self) -> Result<&Connection> {
        if let Some(connection) = self.connection.get() {
            return Ok(connection);
        }

        let base_url = self.url.clone().ok_or_else(|| Error::AppWithoutUrl {
            name: self.name.clone(),
        })?;
        let transport = self
            .transport
            .clone()
            .unwrap_or_else(|| Arc::new(HttpTransport::new()));

        tracing::debug!("Opening connection for {} at {}", self.name, base_url);
        let connection = Connection::new(
            self.name.clone(),
            base_url,
            self.auth.clone(),
            self.middleware.clone(),
            transport,
        );
        Ok(self.connection.get_or_init(|| connection))
    }

    pub fn is_connected(&self) -> bool {
        self.connection.get().is_some()
    }
}

fn normalize_base_url(name: &str, url: &str) -> Result<String> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed = url::Url::parse(&with_scheme).map_err(|source| Error::InvalidUrl {
        name: name.to_string(),
        url: url.to_string(),
        source,
    })?;

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_scheme_to_http() {
        let mut app = Application::new("adventure_app");
        app.set_url("localhost:1234").unwrap();
        assert_eq!(app.url(), Some("http://localhost:1234"));
    }

    #[test]
    fn test_keeps_https_and_strips_trailing_slash() {
        let mut app = Application::new("secure");
        app.set_url("https://api.example.com/v1/").unwrap();
        assert_eq!(app.url(), Some("https://api.example.com/v1"));
    }

    #[test]
    fn test_rejects_garbage_urls() {
        let mut app = Application::new("bad");
        assert!(matches!(
            app.set_url("http://exa mple.com"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_last_auth_wins() {
        let mut app = Application::new("adventure_app");
        app.basic_auth("user", "pass").token_auth("abc");
        assert_eq!(app.auth(), Some(&Auth::Token("abc".to_string())));
    }

    #[test]
    fn test_basic_auth_has_no_literal_header() {
        let auth = Auth::Basic {
            user: "user".to_string(),
            password: "pass".to_string(),
        };
        assert_eq!(auth.header_value(), None);
        assert!(!format!("{:?}", auth).contains("pass"));
    }

    #[test]
    fn test_auth_header_values() {
        assert_eq!(
            Auth::Token("abc".to_string()).header_value().as_deref(),
            Some("Token token=\"abc\"")
        );
        assert_eq!(
            Auth::Bearer("abc".to_string()).header_value().as_deref(),
            Some("Bearer abc")
        );
        assert_eq!(
            Auth::Custom {
                scheme: "OAuth".to_string(),
                credentials: "xyz".to_string()
            }
            .header_value()
            .as_deref(),
            Some("OAuth xyz")
        );
        assert!(!format!("{:?}", Auth::Bearer("secret".to_string())).contains("secret"));
    }

    #[test]
    fn test_connection_requires_url() {
        let app = Application::new("empty");
        assert!(matches!(
            app.connection(),
            Err(Error::AppWithoutUrl { .. })
        ));
    }

    #[test]
    fn test_connection_is_memoized() {
        let mut app = Application::new("adventure_app");
        app.set_url("localhost:1234").unwrap();
        assert!(!app.is_connected());

        let first = app.connection().unwrap() as *const Connection;
        let second = app.connection().unwrap() as *const Connection;
        assert_eq!(first, second);
        assert!(app.is_connected());
    }
}
