//! Core data structures for Remotely.
//!
//! This module contains the foundational types used throughout Remotely:
//! - Normalized resource paths (Url)
//! - Attribute storage and the model façade
//! - Model classes and their association descriptor tables
//! - Collections and the per-instance association cache

pub mod association;
pub mod attributes;
pub mod cache;
pub mod collection;
pub mod model;
pub mod model_class;
pub mod registry;
pub mod url;

pub use association::{AssociationDescriptor, AssociationOptions, Cardinality, PathTemplate};
pub use attributes::{AttributeError, Attributes, Value};
pub use cache::AssociationCache;
pub use collection::{Collection, ParentRef};
pub use model::Model;
pub use model_class::ModelClass;
pub use registry::ClassRegistry;
pub use url::Url;
