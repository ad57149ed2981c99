//! Custom Resource Definitions for the storage composition
//!
//! This module contains all CRD types:
//! - XSeCaStorage: the composite storage workspace the function reads
//! - Datacenter: grouping resource derived per workspace
//! - Volume: dependent resource attached to the datacenter by label

pub mod common;
pub mod composite;
pub mod datacenter;
pub mod volume;

pub use common::*;
pub use composite::*;
pub use datacenter::*;
pub use volume::*;
