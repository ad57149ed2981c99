//! API Module
//!
//! HTTP surface of the function: the run endpoint plus health checks.

pub mod rest;
pub mod server;

pub use rest::*;
pub use server::*;
