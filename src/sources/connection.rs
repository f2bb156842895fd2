//! Connections and request middleware.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::Result;
use crate::sources::application::Auth;
use crate::sources::transport::{Request, Response, Transport};

/// Hook run around every request of an application.
pub trait Middleware: fmt::Debug + Send + Sync {
    /// Adjust an outgoing request.
    fn on_request(&self, request: &mut Request);

    /// Inspect or adjust a received response.
    fn on_response(&self, _request: &Request, _response: &mut Response) {}
}

/// Adds headers the request does not already carry.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Vec<(String, String)>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DefaultHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DefaultHeaders {
            headers: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Middleware for DefaultHeaders {
    fn on_request(&self, request: &mut Request) {
        for (name, value) in &self.headers {
            request.default_header(name, value);
        }
    }
}

/// Applies a request timeout unless one is already set.
#[derive(Debug, Clone, Copy)]
pub struct Timeout(pub Duration);

impl Middleware for Timeout {
    fn on_request(&self, request: &mut Request) {
        if request.timeout.is_none() {
            request.timeout = Some(self.0);
        }
    }
}

/// A transport handle scoped to one application's base URL.
#[derive(Debug, Clone)]
pub struct Connection {
    app: String,
    base_url: String,
    auth: Option<Auth>,
    middleware: Vec<Arc<dyn Middleware>>,
    transport: Arc<dyn Transport>,
}

impl Connection {
    pub fn new(
        app: String,
        base_url: String,
        auth: Option<Auth>,
        middleware: Vec<Arc<dyn Middleware>>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Connection {
            app,
            base_url,
            auth,
            middleware,
            transport,
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Absolute URL for a request path, without the query.
    pub fn endpoint(&self, request: &Request) -> String {
        format!("{}{}", self.base_url, request.path)
    }

    /// Send a request through the middleware stack. Each call is one attempt.
    pub fn send(&self, mut request: Request) -> Result<Response> {
        if request.auth.is_none() {
            request.auth = self.auth.clone();
        }
        for middleware in &self.middleware {
            middleware.on_request(&mut request);
        }

        tracing::debug!(
            app = %self.app,
            "{} {} {}",
            request.method,
            self.endpoint(&request),
            request.body.as_deref().unwrap_or("")
        );

        let mut response = self.transport.send(&self.base_url, &request)?;

        for middleware in &self.middleware {
            middleware.on_response(&request, &mut response);
        }
        tracing::debug!(app = %self.app, "{} {} -> {}", request.method, request.path, response.status);

        Ok(response)
    }
}
