//! Response classification.
//!
//! Turns an HTTP response into the failure sentinel, a single model, a
//! collection, or the decoded value itself.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::core::attributes::{kind_of, Value};
use crate::core::collection::{Collection, ParentRef};
use crate::core::model::Model;
use crate::core::model_class::ModelClass;
use crate::errors::{Error, Result};
use crate::sources::transport::Response;

/// The outcome of a remote fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// The remote side rejected the request (status >= 400).
    Failed,
    /// A single object.
    Model(Model),
    /// An array of objects, or an empty body.
    Collection(Collection),
    /// Any other decoded JSON value.
    Value(Value),
}

impl Fetched {
    pub fn is_failure(&self) -> bool {
        matches!(self, Fetched::Failed)
    }

    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Fetched::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_model_mut(&mut self) -> Option<&mut Model> {
        match self {
            Fetched::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Fetched::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Fetched::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Fetched::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_model(self) -> Option<Model> {
        match self {
            Fetched::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn into_collection(self) -> Option<Collection> {
        match self {
            Fetched::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Fetched::Failed => "failure",
            Fetched::Model(_) => "model",
            Fetched::Collection(_) => "collection",
            Fetched::Value(_) => "value",
        }
    }

    /// JSON rendering; the failure sentinel renders as `false`.
    pub fn to_json_value(&self) -> Value {
        match self {
            Fetched::Failed => Value::Bool(false),
            Fetched::Model(model) => Value::Object(model.attributes().as_map().clone()),
            Fetched::Collection(collection) => Value::Array(
                collection
                    .iter()
                    .map(|m| Value::Object(m.attributes().as_map().clone()))
                    .collect(),
            ),
            Fetched::Value(value) => value.clone(),
        }
    }
}

fn html_signature() -> &'static Regex {
    static HTML: OnceLock<Regex> = OnceLock::new();
    HTML.get_or_init(|| {
        Regex::new(
            r"(?is)^\x{FEFF}?\s*(<\?xml[^>]*\?>\s*)?(<!--.*?-->\s*)*(<!doctype\s+html|<html|<head|<body)",
        )
        .expect("static regex is valid")
    })
}

/// Whether a body looks like an HTML document.
pub fn looks_like_html(body: &str) -> bool {
    html_signature().is_match(body)
}

/// Classify a response into a [`Fetched`] value of `class`.
///
/// `parent` is attached to collections fetched through a `has_many`.
pub fn classify(
    response: &Response,
    class: &Arc<ModelClass>,
    parent: Option<ParentRef>,
) -> Result<Fetched> {
    if response.status >= 400 {
        tracing::debug!(
            "{} responded with status {}, returning failure",
            class.name(),
            response.status
        );
        return Ok(Fetched::Failed);
    }

    if response.body.trim().is_empty() {
        return Ok(Fetched::Collection(Collection::new(
            Arc::clone(class),
            parent,
            Vec::new(),
        )));
    }

    let decoded: Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(err) => {
            if looks_like_html(&response.body) {
                return Err(Error::NonJsonResponse {
                    status: response.status,
                    body: response.body.clone(),
                });
            }
            tracing::warn!("Could not decode response for {}: {}", class.name(), err);
            return Ok(Fetched::Value(Value::Null));
        }
    };

    match decoded {
        Value::Array(elements) => {
            let items = elements
                .into_iter()
                .enumerate()
                .map(|(i, element)| match element {
                    Value::Object(map) => Ok(Model::new(Arc::clone(class), map.into())),
                    other => Err(Error::MalformedResponse {
                        class: class.name().to_string(),
                        reason: format!("element {} is a {}, not an object", i, kind_of(&other)),
                    }),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Fetched::Collection(Collection::new(
                Arc::clone(class),
                parent,
                items,
            )))
        }
        Value::Object(map) if map.is_empty() => Ok(Fetched::Collection(Collection::new(
            Arc::clone(class),
            parent,
            Vec::new(),
        ))),
        Value::Object(map) => Ok(Fetched::Model(Model::new(Arc::clone(class), map.into()))),
        other => Ok(Fetched::Value(other)),
    }
}
