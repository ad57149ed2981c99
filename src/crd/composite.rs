//! XSeCaStorage composite resource
//!
//! The storage workspace intent the function reads. The function itself
//! works on the unstructured document and validates fields one by one; this
//! typed form exists to publish the CRD schema and to build documents.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::ConditionedStatus;

/// XSeCaStorage requests a storage workspace: one datacenter per workspace
/// and a volume placed in it.
#[derive(CustomResource, Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "example.org",
    version = "v1",
    kind = "XSeCaStorage",
    plural = "xsecastorages",
    status = "XSeCaStorageStatus",
    printcolumn = r#"{"name": "Workspace", "type": "string", "jsonPath": ".spec.workspace"}"#,
    printcolumn = r#"{"name": "Region", "type": "string", "jsonPath": ".spec.region"}"#,
    printcolumn = r#"{"name": "Size", "type": "integer", "jsonPath": ".spec.sizeGB"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced = false
)]
#[serde(rename_all = "camelCase")]
pub struct XSeCaStorageSpec {
    /// Workspace name; seeds the datacenter name and its discovery label
    pub workspace: String,

    /// Region code, e.g. "de-txl"
    pub region: String,

    /// Owning tenant
    pub tenant: String,

    /// Image the volume is provisioned from
    pub image: String,

    /// Volume size in GB
    #[serde(rename = "sizeGB")]
    pub size_gb: i64,

    /// Volume name
    pub name: String,
}

/// Status of the composite resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct XSeCaStorageStatus {
    #[serde(flatten)]
    pub conditioned: ConditionedStatus,
}
