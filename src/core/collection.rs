//! Collections of model objects.
//!
//! A collection knows its element class, and optionally the parent it was
//! fetched through, so `build` and `create` can fill in the parent's foreign
//! key.

use std::cmp::Ordering;
use std::ops::Deref;
use std::sync::Arc;

use crate::core::attributes::{to_param, Attributes, Value};
use crate::core::model::Model;
use crate::core::model_class::ModelClass;
use crate::errors::{Error, Result};
use crate::ops::{Fetched, Resource};
use crate::util::context::GlobalContext;

/// The owning side of an association-scoped collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentRef {
    /// Attribute children use to point at the parent (`adventure_id`)
    pub foreign_key: String,
    /// The parent's id
    pub id: Value,
}

impl ParentRef {
    /// Reference a persisted model as a parent. `None` for new records.
    pub fn of(model: &Model) -> Option<Self> {
        model.id().map(|id| ParentRef {
            foreign_key: model.class().foreign_key(),
            id: id.clone(),
        })
    }
}

/// An ordered sequence of models sharing one class.
#[derive(Debug, Clone)]
pub struct Collection {
    class: Arc<ModelClass>,
    parent: Option<ParentRef>,
    items: Vec<Model>,
}

impl Collection {
    /// Create a collection. Elements are expected to be of `class`.
    pub fn new(class: Arc<ModelClass>, parent: Option<ParentRef>, items: Vec<Model>) -> Self {
        Collection {
            class,
            parent,
            items,
        }
    }

    /// An empty collection of `class`.
    pub fn empty(class: Arc<ModelClass>) -> Self {
        Collection::new(class, None, Vec::new())
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn items(&self) -> &[Model] {
        &self.items
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Model> {
        self.items.iter_mut()
    }

    pub fn into_vec(self) -> Vec<Model> {
        self.items
    }

    /// Append a model of the element class.
    pub fn push(&mut self, model: Model) -> Result<()> {
        if model.class_name() != self.class.name() {
            return Err(Error::ElementClassMismatch {
                expected: self.class.name().to_string(),
                found: model.class_name().to_string(),
            });
        }
        self.items.push(model);
        Ok(())
    }

    /// The first element whose id matches. `1` and `"1"` are the same id.
    pub fn find(&self, id: impl Into<Value>) -> Option<&Model> {
        let wanted = to_param(&id.into());
        wanted.as_ref()?;
        self.items
            .iter()
            .find(|m| m.id().and_then(to_param) == wanted)
    }

    /// Elements whose attributes equal every criterion, as a new collection.
    pub fn where_(&self, criteria: &Attributes) -> Collection {
        self.filter(|model| {
            criteria
                .iter()
                .all(|(key, value)| model.attribute(key) == Some(value))
        })
    }

    /// Elements matching a predicate, as a new collection.
    pub fn filter<F>(&self, predicate: F) -> Collection
    where
        F: Fn(&Model) -> bool,
    {
        Collection {
            class: Arc::clone(&self.class),
            parent: self.parent.clone(),
            items: self.items.iter().filter(|m| predicate(m)).cloned().collect(),
        }
    }

    /// Elements sorted by an attribute (missing and null values first).
    pub fn order(&self, attribute: &str) -> Collection {
        let mut items = self.items.clone();
        items.sort_by(|a, b| compare_values(a.attribute(attribute), b.attribute(attribute)));
        Collection {
            class: Arc::clone(&self.class),
            parent: self.parent.clone(),
            items,
        }
    }

    /// Mimic a query relation; a collection is already materialized.
    pub fn all(&self) -> &Self {
        self
    }

    /// Build a new element with the parent's foreign key set, and append it.
    pub fn build(&mut self, attributes: Attributes) -> &mut Model {
        let model = Model::new(Arc::clone(&self.class), self.with_parent_key(attributes));
        self.items.push(model);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Build a new element and create it remotely.
    ///
    /// The created element is appended and returned. Returns `None` when the
    /// remote side rejects the creation.
    pub fn create(&mut self, ctx: &GlobalContext, attributes: Attributes) -> Result<Option<&Model>> {
        let attributes = self.with_parent_key(attributes);
        let resource = Resource::new(ctx, Arc::clone(&self.class));

        match resource.create(&attributes)? {
            Fetched::Model(model) => {
                self.push(model)?;
                Ok(self.items.last())
            }
            other => {
                tracing::debug!(
                    "Create of {} returned {}, not appending",
                    self.class.name(),
                    other.kind()
                );
                Ok(None)
            }
        }
    }

    fn with_parent_key(&self, mut attributes: Attributes) -> Attributes {
        if let Some(parent) = &self.parent {
            attributes.insert(&parent.foreign_key, parent.id.clone());
        }
        attributes
    }
}

/// Order JSON values: null < booleans < numbers < strings < others.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl Deref for Collection {
    type Target = [Model];

    fn deref(&self) -> &[Model] {
        &self.items
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.class.name() == other.class.name() && self.items == other.items
    }
}

impl PartialEq<Vec<Model>> for Collection {
    fn eq(&self, other: &Vec<Model>) -> bool {
        &self.items == other
    }
}

impl IntoIterator for Collection {
    type Item = Model;
    type IntoIter = std::vec::IntoIter<Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
