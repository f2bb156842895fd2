//! HTTP verbs on top of a connection.
//!
//! `get` and `post` classify the response; `put` and `delete` only report
//! whether the remote side accepted the request.

use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::core::attributes::Attributes;
use crate::core::collection::ParentRef;
use crate::core::model_class::ModelClass;
use crate::core::url::Url;
use crate::errors::{Error, Result};
use crate::ops::classify::{classify, looks_like_html, Fetched};
use crate::sources::transport::{Method, Request, Response};
use crate::sources::Connection;

/// Statuses `put` and `delete` treat as success.
pub const SUCCESS_STATUSES: RangeInclusive<u16> = 200..=299;

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Owner of a fetched collection
    pub parent: Option<ParentRef>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn parent(mut self, parent: Option<ParentRef>) -> Self {
        self.parent = parent;
        self
    }

    fn request(&self, method: Method, path: &Url) -> Request {
        let mut request = Request::new(method, path.clone()).with_query(self.query.clone());
        for (name, value) in &self.headers {
            request.set_header(name.clone(), value.clone());
        }
        request
    }
}

/// GET `path` and classify the response as `class`.
pub fn get(conn: &Connection, path: &Url, class: &Arc<ModelClass>, options: RequestOptions) -> Result<Fetched> {
    let response = conn.send(options.request(Method::Get, path))?;
    classify(&response, class, options.parent)
}

/// POST `body` as JSON to `path` and classify the response as `class`.
pub fn post(
    conn: &Connection,
    path: &Url,
    class: &Arc<ModelClass>,
    body: &Attributes,
    options: RequestOptions,
) -> Result<Fetched> {
    let mut request = options
        .request(Method::Post, path)
        .with_body(serde_json::to_string(body)?);
    request.default_header("Content-Type", "application/json");

    let response = conn.send(request)?;
    classify(&response, class, options.parent)
}

/// PUT `body` as JSON to `path`. Returns whether the status was 2xx.
pub fn put(conn: &Connection, path: &Url, body: &Attributes, options: RequestOptions) -> Result<bool> {
    let mut request = options
        .request(Method::Put, path)
        .with_body(serde_json::to_string(body)?);
    request.default_header("Content-Type", "application/json");

    accepted(&conn.send(request)?)
}

/// DELETE `path`. Returns whether the status was 2xx.
pub fn delete(conn: &Connection, path: &Url, options: RequestOptions) -> Result<bool> {
    accepted(&conn.send(options.request(Method::Delete, path))?)
}

fn accepted(response: &Response) -> Result<bool> {
    if !SUCCESS_STATUSES.contains(&response.status) {
        tracing::debug!("Request rejected with status {}", response.status);
        return Ok(false);
    }
    if looks_like_html(&response.body) {
        return Err(Error::NonJsonResponse {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(true)
}
