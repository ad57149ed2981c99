//! Datacenter managed resource
//!
//! The grouping resource of a storage workspace. Volumes never reference a
//! datacenter by ID; they select it through the labels defined here.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::ConditionedStatus;

/// Label carrying the datacenter's own resource name
pub const LABEL_DATACENTER_NAME: &str = "ionos-cloud-datacenter-name";

/// Label carrying the workspace; volumes select their datacenter by it
pub const LABEL_DATACENTER: &str = "ionos-cloud-dc";

/// Label carrying the region as declared on the composite
pub const LABEL_REGION: &str = "ionos-cloud-region";

/// Label carrying the owning tenant
pub const LABEL_TENANT: &str = "ionos-cloud-tenant";

// =============================================================================
// Datacenter CRD
// =============================================================================

/// Datacenter is an IONOS Cloud virtual datacenter managed by the provider.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "compute.ionoscloud.io",
    version = "v1alpha1",
    kind = "Datacenter",
    plural = "datacenters",
    status = "DatacenterStatus",
    printcolumn = r#"{"name": "Location", "type": "string", "jsonPath": ".spec.forProvider.location"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced = false
)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterSpec {
    /// Parameters sent to the cloud API
    pub for_provider: DatacenterParameters,
}

/// Desired datacenter settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterParameters {
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Hierarchical location, e.g. "de/txl"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Datacenter name in the cloud console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Require two-factor authentication for servers in this datacenter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sec_auth_protection: Option<bool>,
}

// =============================================================================
// Status
// =============================================================================

/// Observed state of the datacenter
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterStatus {
    /// Values reported by the cloud API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_provider: Option<DatacenterObservation>,

    #[serde(flatten)]
    pub conditioned: ConditionedStatus,
}

/// Datacenter attributes assigned by the cloud API
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
}

impl Datacenter {
    /// Get the name of this datacenter
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }
}
