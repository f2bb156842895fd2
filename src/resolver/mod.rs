//! Path resolution for declared associations.
//!
//! The resolver is pure: it reads the descriptor and the model's current
//! attributes and never issues requests.

pub mod path;

pub use path::{interpolate, resolve};
