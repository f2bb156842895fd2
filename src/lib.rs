//! Remotely - remote associations for local models
//!
//! This crate lets a model declare associations that live behind a remote
//! HTTP/JSON API. Associations are resolved to a request path, fetched on
//! first access, classified into a model, a collection or a raw value, and
//! memoized per instance until an explicit reload.

pub mod core;
pub mod errors;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities and mocks for Remotely unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a mock transport with route expectations
/// and fixtures mirroring a small adventure-themed API.
#[cfg(test)]
pub mod test_support;

pub use core::{
    association::{AssociationDescriptor, AssociationOptions, Cardinality, PathTemplate},
    attributes::{AttributeError, Attributes},
    collection::{Collection, ParentRef},
    model::Model,
    model_class::ModelClass,
    registry::ClassRegistry,
    url::Url,
};

pub use errors::{Error, Result};
pub use ops::{Fetched, Resource};
pub use sources::{AppRegistry, Application, Auth, Connection};
pub use util::context::GlobalContext;
