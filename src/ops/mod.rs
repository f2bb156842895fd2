//! High-level operations.
//!
//! - [`classify`] turns responses into models, collections or values
//! - [`http`] sends GET/POST/PUT/DELETE through a connection
//! - [`resource`] implements find/where/create/save/destroy
//! - [`association`] implements cached association accessors
//! - [`autolink`] follows `*_id` attributes

pub mod association;
pub mod autolink;
pub mod classify;
pub mod http;
pub mod resource;

pub use association::fetch_association;
pub use classify::{classify, Fetched};
pub use http::RequestOptions;
pub use resource::Resource;
