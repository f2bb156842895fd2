//! Model classes - the declaration surface for remote resources.
//!
//! A `ModelClass` names a resource family, the application it is fetched
//! from, its collection URI, and its association descriptor table.
//!
//! ```
//! use remotely::{AssociationOptions, ModelClass};
//!
//! let member = ModelClass::new("Member")
//!     .with_app("adventure_app")
//!     .with_uri("/members")
//!     .belongs_to("adventure", AssociationOptions::new())
//!     .has_one("weapon", AssociationOptions::new());
//!
//! assert_eq!(member.base_resource_name(), "members");
//! ```

use crate::core::association::{
    AssociationDescriptor, AssociationOptions, AssociationTable, Cardinality,
};
use crate::core::url::Url;
use crate::util::inflector;

/// A model class definition.
#[derive(Debug, Clone)]
pub struct ModelClass {
    /// Class name (e.g. `CustomAdventure`)
    name: String,

    /// Name of the class that directly extends the model capability
    base: String,

    /// Immediate parent class, if this is a subclass
    parent: Option<String>,

    /// Application the class is fetched from (None = single-app fallback)
    app: Option<String>,

    /// Collection URI (defaults to `/<tableized base name>`)
    uri: Url,

    /// Declared remote associations
    associations: AssociationTable,

    /// Attributes sent on `save` (None = all)
    savable: Option<Vec<String>>,
}

impl ModelClass {
    /// Define a class that directly extends the model capability.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        ModelClass {
            uri: Url::new([inflector::tableize(&name)]),
            base: name.clone(),
            name,
            parent: None,
            app: None,
            associations: AssociationTable::new(),
            savable: None,
        }
    }

    /// Define a subclass of `parent`.
    ///
    /// The parent's association table is copied at this point; later
    /// definitions on the parent do not reach the subclass. The base class,
    /// application, URI and savable attributes are inherited as well.
    pub fn subclass(parent: &ModelClass, name: impl Into<String>) -> Self {
        ModelClass {
            name: name.into(),
            base: parent.base.clone(),
            parent: Some(parent.name.clone()),
            app: parent.app.clone(),
            uri: parent.uri.clone(),
            associations: parent.associations.clone(),
            savable: parent.savable.clone(),
        }
    }

    /// Set the application this class is fetched from.
    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    /// Set the collection URI.
    pub fn with_uri(mut self, uri: impl Into<Url>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Declare which attributes `save` sends.
    pub fn savable<S: AsRef<str>>(mut self, attributes: &[S]) -> Self {
        self.savable = Some(attributes.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    /// Declare a one-to-many association.
    pub fn has_many(mut self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.define(name, Cardinality::HasMany, options);
        self
    }

    /// Declare a one-to-one association.
    pub fn has_one(mut self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.define(name, Cardinality::HasOne, options);
        self
    }

    /// Declare a many-to-one association.
    pub fn belongs_to(mut self, name: impl Into<String>, options: AssociationOptions) -> Self {
        self.define(name, Cardinality::BelongsTo, options);
        self
    }

    /// Store an association descriptor in this class's table.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        cardinality: Cardinality,
        options: AssociationOptions,
    ) -> &mut Self {
        let name = name.into();
        tracing::debug!("{} {} :{}", self.name, cardinality, name);
        self.associations
            .define(AssociationDescriptor::new(name, cardinality, options));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class that directly extends the model capability.
    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn associations(&self) -> &AssociationTable {
        &self.associations
    }

    pub fn association(&self, name: &str) -> Option<&AssociationDescriptor> {
        self.associations.get(name)
    }

    pub fn savable_attributes(&self) -> Option<&[String]> {
        self.savable.as_deref()
    }

    /// Plural resource name derived from the base class (`adventures`).
    pub fn base_resource_name(&self) -> String {
        inflector::tableize(&self.base)
    }

    /// Singular element name of this class (`custom_adventure`).
    pub fn element_name(&self) -> String {
        inflector::underscore(&self.name)
    }

    /// Foreign key children use to point at this class (`adventure_id`).
    pub fn foreign_key(&self) -> String {
        inflector::foreign_key(&self.base)
    }
}
