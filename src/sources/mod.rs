//! Remote backends.
//!
//! Applications are named remote backends; each one builds a single
//! connection that sends requests through its middleware stack and a
//! [`Transport`].

pub mod application;
pub mod connection;
pub mod registry;
pub mod transport;

pub use application::{Application, Auth};
pub use connection::{Connection, DefaultHeaders, Middleware, Timeout};
pub use registry::AppRegistry;
pub use transport::{HttpTransport, Method, Request, Response, Transport};
