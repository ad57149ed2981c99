//! Offline rendering
//!
//! Runs the function once against documents read from YAML files, the way
//! the runtime would call it, so a composite can be checked before it is
//! applied to a cluster.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::composition::StorageFunction;
use super::proto::{Resource, RunFunctionResponse};
use super::request;
use super::unstructured::Unstructured;
use crate::error::{Error, Result};

/// Tag attached to rendered requests
pub const RENDER_TAG: &str = "render";

/// Read a single resource document
pub fn load_document(path: &Path) -> Result<Unstructured> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&raw)?;
    Unstructured::from_value(value).ok_or_else(|| Error::Request {
        what: format!("resource document {}", path.display()),
        reason: "document is not a mapping".to_string(),
    })
}

/// Read a mapping of composed resource name to resource document
pub fn load_resources(path: &Path) -> Result<BTreeMap<String, Resource>> {
    let raw = std::fs::read_to_string(path)?;
    let documents: BTreeMap<String, Value> = serde_yaml::from_str(&raw)?;
    debug!(path = %path.display(), count = documents.len(), "Loaded composed resources");
    documents
        .into_iter()
        .map(|(name, doc)| Ok((name, request::wire_resource(doc)?)))
        .collect()
}

/// Run the function against a composite and optional prior state
pub fn render(
    function: &StorageFunction,
    composite: Unstructured,
    observed: BTreeMap<String, Resource>,
    desired: BTreeMap<String, Resource>,
) -> RunFunctionResponse {
    let mut req = request::for_composite(RENDER_TAG, composite);
    req.observed.resources = observed;
    req.desired.resources = desired;
    function.run_function(&req)
}

/// Encode a response as YAML
pub fn to_yaml(rsp: &RunFunctionResponse) -> Result<String> {
    Ok(serde_yaml::to_string(rsp)?)
}
