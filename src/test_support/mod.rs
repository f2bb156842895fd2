//! Test utilities and mocks for remotely unit tests.
//!
//! [`MockTransport`] stands in for the HTTP transport: it answers requests
//! from route expectations and records every request it receives, so tests
//! can assert exactly how many fetches happened.
//!
//! # Example
//!
//! ```rust,ignore
//! use remotely::test_support::{MockResponse, MockTransport, RoutePattern};
//!
//! let transport = MockTransport::new();
//! transport.stub(Method::Get, RoutePattern::Exact("/adventures/1".into()), MockResponse::json("{}"));
//!
//! // ...exercise code...
//! assert_eq!(transport.call_count(Method::Get, "/adventures/1"), 1);
//! ```

pub mod fixtures;

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Result};

use crate::errors;
use crate::sources::transport::{Method, Request, Response, Transport};

/// Pattern for matching request paths in MockTransport.
#[derive(Debug, Clone)]
pub enum RoutePattern {
    /// Exact match on the normalized path.
    Exact(String),
    /// Match if the path starts with a prefix.
    Prefix(String),
    /// Match using a regex pattern.
    Regex(String),
    /// Match any path.
    Any,
}

impl RoutePattern {
    /// Check if this pattern matches the given path.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(s) => path == s,
            RoutePattern::Prefix(s) => path.starts_with(s),
            RoutePattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(path))
                .unwrap_or(false),
            RoutePattern::Any => true,
        }
    }
}

/// Canned response for a route.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
    /// Number of times this response can be used (None = unlimited).
    pub times: Option<usize>,
}

impl MockResponse {
    /// A 200 response with a JSON body.
    pub fn json(body: impl Into<String>) -> Self {
        MockResponse {
            status: 200,
            body: body.into(),
            times: None,
        }
    }

    /// An empty response with the given status.
    pub fn status(status: u16) -> Self {
        MockResponse {
            status,
            body: String::new(),
            times: None,
        }
    }

    /// A 200 response with an HTML body.
    pub fn html(body: impl Into<String>) -> Self {
        MockResponse::json(body)
    }

    /// Change the status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Limit how many requests this response answers.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }
}

/// Expectation for a request.
#[derive(Debug, Clone)]
struct RouteExpectation {
    method: Method,
    pattern: RoutePattern,
    response: MockResponse,
    used: usize,
}

impl RouteExpectation {
    fn available(&self) -> bool {
        match self.response.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// Mock transport for testing request flow.
///
/// Expectations are tried in the order they were added; the first
/// available match answers. Unmatched requests get an empty 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    expectations: Mutex<Vec<RouteExpectation>>,
    calls: Mutex<Vec<Request>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests matching `method` and `pattern` with `response`.
    pub fn stub(&self, method: Method, pattern: RoutePattern, response: MockResponse) -> &Self {
        lock(&self.expectations).push(RouteExpectation {
            method,
            pattern,
            response,
            used: 0,
        });
        self
    }

    /// Get all requests that were sent.
    pub fn calls(&self) -> Vec<Request> {
        lock(&self.calls).clone()
    }

    /// The most recent request.
    pub fn last_call(&self) -> Option<Request> {
        lock(&self.calls).last().cloned()
    }

    /// Number of requests sent with `method` to exactly `path`.
    pub fn call_count(&self, method: Method, path: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Verify that all expectations with a specific count were used up.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in lock(&self.expectations).iter().enumerate() {
            if let Some(expected) = exp.response.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} ({} {:?}) was used {} times, expected {}",
                        i,
                        exp.method,
                        exp.pattern,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl Transport for MockTransport {
    fn send(&self, _base_url: &str, request: &Request) -> errors::Result<Response> {
        lock(&self.calls).push(request.clone());

        let mut expectations = lock(&self.expectations);
        for exp in expectations.iter_mut() {
            if exp.method == request.method && exp.pattern.matches(request.path.as_str()) && exp.available() {
                exp.used += 1;
                return Ok(Response {
                    status: exp.response.status,
                    body: exp.response.body.clone(),
                });
            }
        }

        Ok(Response {
            status: 404,
            body: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_available_match_answers() {
        let transport = MockTransport::new();
        transport
            .stub(Method::Get, RoutePattern::Prefix("/a".into()), MockResponse::json("1").times(1))
            .stub(Method::Get, RoutePattern::Any, MockResponse::json("2"));

        let request = Request::new(Method::Get, "/a/b");
        assert_eq!(transport.send("", &request).unwrap().body, "1");
        assert_eq!(transport.send("", &request).unwrap().body, "2");
        assert_eq!(transport.call_count(Method::Get, "/a/b"), 2);
        transport.verify().unwrap();
    }

    #[test]
    fn test_unmatched_is_not_found() {
        let transport = MockTransport::new();
        let response = transport.send("", &Request::new(Method::Delete, "/x")).unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_regex_pattern() {
        assert!(RoutePattern::Regex(r"^/members/\d+$".into()).matches("/members/12"));
        assert!(!RoutePattern::Regex(r"^/members/\d+$".into()).matches("/members/x"));
    }
}
