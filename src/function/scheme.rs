//! Composed resource scheme
//!
//! Registry of the resource kinds the function may emit. It is built once
//! during startup and handed to the function, which converts typed resources
//! into unstructured bodies only for kinds registered here.

use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

use super::unstructured::Unstructured;
use crate::crd::{Datacenter, Volume};
use crate::error::{Error, Result};

/// Known (apiVersion, kind) pairs
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: BTreeSet<(String, String)>,
}

impl Scheme {
    /// Create an empty scheme
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheme holding the IONOS Cloud compute kinds this function composes
    pub fn ionos() -> Self {
        Self::new().register::<Datacenter>().register::<Volume>()
    }

    /// Register a kind
    pub fn register<K>(mut self) -> Self
    where
        K: Resource<DynamicType = ()>,
    {
        let api_version = K::api_version(&()).into_owned();
        let kind = K::kind(&()).into_owned();
        debug!(%api_version, %kind, "Registering kind in scheme");
        self.kinds.insert((api_version, kind));
        self
    }

    /// Check whether a kind is registered
    pub fn recognizes(&self, api_version: &str, kind: &str) -> bool {
        self.kinds
            .contains(&(api_version.to_string(), kind.to_string()))
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Convert a typed resource into an unstructured composed body
    pub fn to_composed<K>(&self, obj: &K) -> Result<Unstructured>
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        let kind = K::kind(&()).into_owned();
        if !self.recognizes(&K::api_version(&()), &kind) {
            return Err(Error::Conversion {
                kind,
                reason: "kind is not registered in the scheme".to_string(),
            });
        }

        let value = serde_json::to_value(obj).map_err(|e| Error::Conversion {
            kind: kind.clone(),
            reason: e.to_string(),
        })?;

        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(Error::Conversion {
                    kind,
                    reason: format!("serialized to a non-object value: {}", other),
                })
            }
        };

        // Desired bodies never carry status
        if matches!(object.get("status"), Some(Value::Null)) {
            object.remove("status");
        }

        Ok(Unstructured::from_object(object))
    }

    /// Decode an unstructured body into a typed resource
    pub fn from_composed<K>(&self, u: &Unstructured) -> Result<K>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let kind = K::kind(&()).into_owned();
        if u.get_api_version() != K::api_version(&()) || u.get_kind() != kind {
            return Err(Error::Conversion {
                kind,
                reason: format!(
                    "document is {} {}",
                    u.get_api_version(),
                    u.get_kind()
                ),
            });
        }
        serde_json::from_value(Value::Object(u.as_object().clone())).map_err(|e| {
            Error::Conversion {
                kind,
                reason: e.to_string(),
            }
        })
    }
}
