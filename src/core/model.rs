//! Model instances and the attribute façade.
//!
//! A model is an ordered attribute map plus its class. Attribute access goes
//! through a typed lookup instead of generated methods:
//!
//! - `get("name")` returns the stored value
//! - `set("name", v)` replaces it
//! - `query("name")` returns its truthiness
//! - `send("name=" | "name?" | "name", ..)` dispatches on the method name
//!
//! Any other name fails with [`AttributeError::NoMethod`].
//!
//! Declared associations are reached with [`Model::association`] and
//! `*_id` attributes with [`Model::link`]; both are fetched lazily and
//! memoized on the instance.

use std::sync::Arc;

use crate::core::attributes::{truthy, AttributeError, Attributes, Value};
use crate::core::cache::AssociationCache;
use crate::core::model_class::ModelClass;
use crate::errors::Result;
use crate::ops::autolink;

/// A model instance.
#[derive(Debug, Clone)]
pub struct Model {
    class: Arc<ModelClass>,
    attributes: Attributes,
    pub(crate) associations: AssociationCache,
    pub(crate) links: AssociationCache,
}

impl Model {
    /// Create a model from explicit attributes. Performs no fetches.
    pub fn new(class: Arc<ModelClass>, attributes: Attributes) -> Self {
        Model {
            class,
            attributes,
            associations: AssociationCache::new(),
            links: AssociationCache::new(),
        }
    }

    /// Create a model from a decoded JSON object.
    pub fn from_json(class: Arc<ModelClass>, value: Value) -> std::result::Result<Self, AttributeError> {
        let attributes = Attributes::try_from_value(class.name(), value)?;
        Ok(Model::new(class, attributes))
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Replace every attribute. Cached associations are kept.
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    /// The `id` attribute, if present and not null.
    pub fn id(&self) -> Option<&Value> {
        self.attributes.get("id").filter(|v| !v.is_null())
    }

    /// A model without an id has not been persisted remotely.
    pub fn is_new_record(&self) -> bool {
        self.id().is_none()
    }

    /// Non-failing attribute lookup.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Read a declared attribute.
    pub fn get(&self, name: &str) -> std::result::Result<&Value, AttributeError> {
        self.attributes
            .get(name)
            .ok_or_else(|| self.no_method(name))
    }

    /// Write a declared attribute.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> std::result::Result<(), AttributeError> {
        if !self.attributes.contains(name) {
            return Err(self.no_method(&format!("{}=", name)));
        }
        self.attributes.insert(name, value);
        Ok(())
    }

    /// Boolean coercion of a declared attribute.
    pub fn query(&self, name: &str) -> std::result::Result<bool, AttributeError> {
        match self.attributes.get(name) {
            Some(value) => Ok(truthy(value)),
            None => Err(self.no_method(&format!("{}?", name))),
        }
    }

    /// Dispatch on an accessor name: `name`, `name=` or `name?`.
    ///
    /// The setter form requires an argument and returns it.
    pub fn send(&mut self, method: &str, arg: Option<Value>) -> std::result::Result<Value, AttributeError> {
        if let Some(name) = method.strip_suffix('=') {
            if self.attributes.contains(name) {
                let value = arg.unwrap_or(Value::Null);
                self.set(name, value.clone())?;
                return Ok(value);
            }
        } else if let Some(name) = method.strip_suffix('?') {
            if self.attributes.contains(name) {
                return self.query(name).map(Value::Bool);
            }
        } else if let Some(value) = self.attributes.get(method) {
            return Ok(value.clone());
        }

        Err(self.no_method(method))
    }

    /// Whether an accessor, association, or auto-link exists for `name`.
    pub fn responds_to(&self, name: &str) -> bool {
        let attribute = name
            .strip_suffix('=')
            .or_else(|| name.strip_suffix('?'))
            .unwrap_or(name);

        self.attributes.contains(attribute)
            || self.class.associations().contains(name)
            || self.link_names().iter().any(|link| link == name)
    }

    /// Names of the auto-links derived from `*_id` attributes.
    pub fn link_names(&self) -> Vec<String> {
        autolink::link_names(&self.attributes)
    }

    /// Whether a declared association has been fetched.
    pub fn is_association_cached(&self, name: &str) -> bool {
        self.associations.is_cached(name)
    }

    /// Whether an auto-link has been fetched.
    pub fn is_link_cached(&self, name: &str) -> bool {
        self.links.is_cached(name)
    }

    /// Serialize the attributes as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.attributes)?)
    }

    fn no_method(&self, method: &str) -> AttributeError {
        AttributeError::NoMethod {
            class: self.class.name().to_string(),
            method: method.to_string(),
        }
    }
}

/// Models compare by class and attributes; caches are ignored.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.class.name() == other.class.name() && self.attributes == other.attributes
    }
}
