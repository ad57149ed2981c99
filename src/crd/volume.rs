//! Volume managed resource
//!
//! The dependent resource of a storage workspace. It attaches to its
//! datacenter through `datacenterIdSelector`, so the provider resolves the
//! parent at reconcile time instead of this resource pinning an ID.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{ConditionedStatus, Selector};

// =============================================================================
// Volume CRD
// =============================================================================

/// Volume is an IONOS Cloud block storage volume managed by the provider.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "compute.ionoscloud.io",
    version = "v1alpha1",
    kind = "Volume",
    plural = "volumes",
    status = "VolumeStatus",
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".spec.forProvider.diskType"}"#,
    printcolumn = r#"{"name": "Size", "type": "number", "jsonPath": ".spec.forProvider.size"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced = false
)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSpec {
    /// Parameters sent to the cloud API
    pub for_provider: VolumeParameters,
}

/// Desired volume settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeParameters {
    /// Concrete datacenter ID, normally resolved from the selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_id: Option<String>,

    /// Selects the datacenter by label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_id_selector: Option<Selector>,

    /// HDD, SSD, SSD Standard or SSD Premium
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,

    /// Image or snapshot name to provision from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,

    /// Initial password for the image's root user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_password: Option<String>,

    /// Volume name in the cloud console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Size in GB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

// =============================================================================
// Status
// =============================================================================

/// Observed state of the volume
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_provider: Option<VolumeObservation>,

    #[serde(flatten)]
    pub conditioned: ConditionedStatus,
}

/// Volume attributes assigned by the cloud API
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolumeObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_number: Option<f64>,
}

impl Volume {
    /// Get the name of this volume
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::TYPE_READY;

    #[test]
    fn test_volume_references_datacenter_by_selector_only() {
        let params = VolumeParameters {
            datacenter_id_selector: Some(Selector::match_label("ionos-cloud-dc", "test-ws")),
            disk_type: Some("SSD".into()),
            size: Some(50.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("datacenterId").is_none());
        assert_eq!(
            value["datacenterIdSelector"]["matchLabels"]["ionos-cloud-dc"],
            "test-ws"
        );
        assert_eq!(value["size"].as_f64(), Some(50.0));
    }

    #[test]
    fn test_status_decodes_conditions() {
        let status: VolumeStatus = serde_json::from_value(serde_json::json!({
            "atProvider": { "id": "6a5f" },
            "conditions": [{ "type": "Ready", "status": "False", "reason": "Creating" }]
        }))
        .unwrap();
        let ready = status.conditioned.get_condition(TYPE_READY);
        assert!(!ready.is_true());
        assert_eq!(ready.reason.as_deref(), Some("Creating"));
    }
}
