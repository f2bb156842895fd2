//! Class registry - model classes keyed by name.
//!
//! Classes are registered once and shared as `Arc<ModelClass>`. Defining an
//! association on a registered class replaces the shared definition
//! (copy-on-write); subclasses keep the table they copied when they were
//! defined.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::association::{AssociationOptions, Cardinality};
use crate::core::model_class::ModelClass;
use crate::errors::{Error, Result};

/// A set of model classes, keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Arc<ModelClass>>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        ClassRegistry {
            classes: HashMap::new(),
        }
    }

    /// Register a class, replacing any class with the same name.
    pub fn register(&mut self, class: ModelClass) -> Arc<ModelClass> {
        let class = Arc::new(class);
        self.classes
            .insert(class.name().to_string(), Arc::clone(&class));
        class
    }

    /// Define and register a subclass of an already registered class.
    pub fn register_subclass<F>(&mut self, parent: &str, name: &str, configure: F) -> Result<Arc<ModelClass>>
    where
        F: FnOnce(ModelClass) -> ModelClass,
    {
        let parent = self.lookup(parent)?;
        let class = configure(ModelClass::subclass(&parent, name));
        Ok(self.register(class))
    }

    /// Add an association to a registered class.
    pub fn define_association(
        &mut self,
        class: &str,
        name: &str,
        cardinality: Cardinality,
        options: AssociationOptions,
    ) -> Result<Arc<ModelClass>> {
        let entry = self
            .classes
            .get_mut(class)
            .ok_or_else(|| Error::UnknownClass {
                name: class.to_string(),
            })?;

        Arc::make_mut(entry).define(name, cardinality, options);
        Ok(Arc::clone(entry))
    }

    /// Get a registered class.
    pub fn get(&self, name: &str) -> Option<Arc<ModelClass>> {
        self.classes.get(name).cloned()
    }

    /// Get a registered class or fail with `UnknownClass`.
    pub fn lookup(&self, name: &str) -> Result<Arc<ModelClass>> {
        self.get(name).ok_or_else(|| Error::UnknownClass {
            name: name.to_string(),
        })
    }

    /// Get a registered class, or a plain class with conventional defaults.
    ///
    /// Association targets and auto-linked resources do not need to be
    /// declared up front.
    pub fn class_for(&self, name: &str) -> Arc<ModelClass> {
        self.get(name).unwrap_or_else(|| {
            tracing::debug!("Using an undeclared class for {}", name);
            Arc::new(ModelClass::new(name))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Remove every class.
    pub fn clear(&mut self) {
        self.classes.clear();
    }
}
