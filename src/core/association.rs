//! Association descriptors.
//!
//! An association is declared on a model class with a cardinality and a name,
//! plus optional overrides for the request path, the foreign key attribute,
//! the backend application, and the target class.
//!
//! # URI conventions
//!
//! Without an explicit path an association is found at:
//!
//! ```text
//! has_many    /<base resource>/<id>/<plural name>       adventure.members -> /adventures/1/members
//! has_one     /<base resource>/<id>/<singular name>     car.engine        -> /cars/1/engine
//! belongs_to  /<plural name>/<foreign key value>        car.brand         -> /brands/2
//! ```
//!
//! Explicit paths replace every `:token` with the instance's `token`
//! attribute:
//!
//! ```text
//! belongs_to :family, path = "/families/:family_key"    -> /families/noble
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::model::Model;
use crate::errors::Result;
use crate::util::inflector;

/// Relationship multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// One-to-many, the declaring model is the parent.
    HasMany,
    /// One-to-one.
    HasOne,
    /// Many-to-one, the declaring model holds the foreign key.
    BelongsTo,
}

impl Cardinality {
    /// Whether a foreign key override is meaningful for this cardinality.
    pub fn accepts_foreign_key(self) -> bool {
        matches!(self, Cardinality::BelongsTo)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::HasMany => write!(f, "has_many"),
            Cardinality::HasOne => write!(f, "has_one"),
            Cardinality::BelongsTo => write!(f, "belongs_to"),
        }
    }
}

/// Path builder evaluated against the instance.
pub type PathFn = Arc<dyn Fn(&Model) -> Result<String> + Send + Sync>;

/// An explicit request path for an association.
#[derive(Clone)]
pub enum PathTemplate {
    /// A literal template with `:token` placeholders.
    Literal(String),
    /// A callable producing the template from the instance.
    Callable(PathFn),
}

impl PathTemplate {
    /// Build a callable template.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&Model) -> Result<String> + Send + Sync + 'static,
    {
        PathTemplate::Callable(Arc::new(f))
    }

    /// Evaluate the template against an instance, before interpolation.
    pub fn evaluate(&self, model: &Model) -> Result<String> {
        match self {
            PathTemplate::Literal(template) => Ok(template.clone()),
            PathTemplate::Callable(f) => f(model),
        }
    }
}

impl fmt::Debug for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathTemplate::Literal(template) => f.debug_tuple("Literal").field(template).finish(),
            PathTemplate::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        PathTemplate::Literal(template.to_string())
    }
}

impl From<String> for PathTemplate {
    fn from(template: String) -> Self {
        PathTemplate::Literal(template)
    }
}

/// Optional overrides supplied when declaring an association.
#[derive(Debug, Clone, Default)]
pub struct AssociationOptions {
    pub path: Option<PathTemplate>,
    pub foreign_key: Option<String>,
    pub app: Option<String>,
    pub class_name: Option<String>,
}

impl AssociationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit path template.
    pub fn path(mut self, template: impl Into<PathTemplate>) -> Self {
        self.path = Some(template.into());
        self
    }

    /// Use a path computed from the instance.
    pub fn path_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Model) -> Result<String> + Send + Sync + 'static,
    {
        self.path = Some(PathTemplate::callable(f));
        self
    }

    /// Use another attribute than `<name>_id` (belongs_to only).
    pub fn foreign_key(mut self, attribute: impl Into<String>) -> Self {
        self.foreign_key = Some(attribute.into());
        self
    }

    /// Fetch from a specific application.
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    /// Materialize results as this class instead of the classified name.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// Declared metadata for one remote relationship.
#[derive(Debug, Clone)]
pub struct AssociationDescriptor {
    name: String,
    cardinality: Cardinality,
    path: Option<PathTemplate>,
    foreign_key: Option<String>,
    app: Option<String>,
    class_name: Option<String>,
}

impl AssociationDescriptor {
    pub fn new(name: impl Into<String>, cardinality: Cardinality, options: AssociationOptions) -> Self {
        AssociationDescriptor {
            name: name.into(),
            cardinality,
            path: options.path,
            foreign_key: options.foreign_key,
            app: options.app,
            class_name: options.class_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn path(&self) -> Option<&PathTemplate> {
        self.path.as_ref()
    }

    /// The explicit foreign key override, if any.
    pub fn foreign_key(&self) -> Option<&str> {
        self.foreign_key.as_deref()
    }

    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }

    /// Attribute holding the remote id for `belongs_to` (`<name>_id` by default).
    pub fn foreign_key_attribute(&self) -> String {
        self.foreign_key
            .clone()
            .unwrap_or_else(|| format!("{}_id", self.name))
    }

    /// Class the fetched objects are materialized as.
    pub fn target_class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| inflector::classify(&self.name))
    }

    /// Whether the foreign key override is misused for this cardinality.
    pub fn has_misplaced_foreign_key(&self) -> bool {
        self.foreign_key.is_some() && !self.cardinality.accepts_foreign_key()
    }
}

/// Per-class mapping from association name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct AssociationTable {
    entries: HashMap<String, AssociationDescriptor>,
}

impl AssociationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor, replacing any previous one with the same name.
    pub fn define(&mut self, descriptor: AssociationDescriptor) {
        self.entries.insert(descriptor.name.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Association names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssociationDescriptor> {
        self.entries.values()
    }
}
