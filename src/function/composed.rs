//! Observed and desired composed resources
//!
//! Typed views over the wire state maps. Entries are keyed by the name the
//! composition gives each composed resource, which is stable across runs.

use std::collections::BTreeMap;

use super::proto::Ready;
use super::unstructured::Unstructured;
use crate::crd::TYPE_READY;

/// Key of a composed resource within the composition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName(pub String);

impl ResourceName {
    /// Name made of a prefix and a resource identity joined by a dash
    pub fn prefixed(prefix: &str, identity: &str) -> Self {
        Self(format!("{}-{}", prefix, identity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ResourceName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A composed resource as the runtime last observed it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedComposed {
    pub resource: Unstructured,
    pub connection_details: BTreeMap<String, String>,
}

impl ObservedComposed {
    /// Check whether the resource reports Ready=True
    pub fn is_ready(&self) -> bool {
        self.resource.get_condition(TYPE_READY).is_true()
    }
}

/// A composed resource the function wants to exist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesiredComposed {
    pub resource: Unstructured,
    pub connection_details: BTreeMap<String, String>,
    pub ready: Ready,
}

impl DesiredComposed {
    pub fn new(resource: Unstructured) -> Self {
        Self {
            resource,
            connection_details: BTreeMap::new(),
            ready: Ready::Unspecified,
        }
    }
}

/// Observed composed resources by name
pub type ObservedMap = BTreeMap<ResourceName, ObservedComposed>;

/// Desired composed resources by name
pub type DesiredMap = BTreeMap<ResourceName, DesiredComposed>;
