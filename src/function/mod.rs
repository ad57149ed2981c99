//! Composition Function Module
//!
//! The transform at the heart of the crate: read a storage workspace
//! composite, derive its datacenter and volume, merge them into the desired
//! state and report readiness back to the runtime.

pub mod composed;
pub mod composition;
pub mod proto;
pub mod render;
pub mod request;
pub mod response;
pub mod scheme;
pub mod unstructured;

pub use composed::*;
pub use composition::*;
pub use proto::*;
pub use scheme::Scheme;
pub use unstructured::{FieldError, FieldValue, Unstructured};
