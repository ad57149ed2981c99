//! Storage Workspace Composition
//!
//! Derives the composed resources of an XSeCaStorage composite:
//! - a Datacenter per workspace, labelled for discovery
//! - a Volume that selects that datacenter by label
//!
//! Each run is a pure function of the request. Readiness of every derived
//! resource is recomputed from the observed state on every call.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::composed::{DesiredComposed, DesiredMap, ObservedMap, ResourceName};
use super::proto::{Ready, RunFunctionRequest, RunFunctionResponse};
use super::request;
use super::response::{self, DEFAULT_TTL};
use super::scheme::Scheme;
use super::unstructured::Unstructured;
use crate::crd::{
    Datacenter, DatacenterParameters, DatacenterSpec, Selector, Volume, VolumeParameters,
    VolumeSpec, LABEL_DATACENTER, LABEL_DATACENTER_NAME, LABEL_REGION, LABEL_TENANT,
};
use crate::error::{Error, Result};

/// Disk type every volume is created with
pub const VOLUME_DISK_TYPE: &str = "SSD";

/// Placeholder root password for volume images
pub const VOLUME_IMAGE_PASSWORD: &str = "thisisnotapassword";

/// Condition set on the composite when a run succeeds
pub const CONDITION_FUNCTION_SUCCESS: &str = "FunctionSuccess";

// =============================================================================
// Configuration
// =============================================================================

/// Which name the volume's desired entry is keyed by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VolumeKey {
    /// `<prefix>-<spec.name>`
    #[default]
    Name,
    /// `<prefix>-<workspace><separator>volume`
    Identity,
}

impl std::fmt::Display for VolumeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeKey::Name => write!(f, "name"),
            VolumeKey::Identity => write!(f, "identity"),
        }
    }
}

impl std::str::FromStr for VolumeKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(VolumeKey::Name),
            "identity" => Ok(VolumeKey::Identity),
            other => Err(format!(
                "invalid volume key: {}. Use 'name' or 'identity'",
                other
            )),
        }
    }
}

/// Configuration for the composition
#[derive(Debug, Clone)]
pub struct CompositionConfig {
    /// Prefix of every desired resource key
    pub resource_prefix: String,
    /// Separator between workspace and "volume" in the volume's name
    pub volume_separator: char,
    /// Rewrite "de-txl" region codes into "de/txl" locations
    pub normalize_region: bool,
    /// Key the volume's desired entry by its name or its identity
    pub volume_key: VolumeKey,
    /// Freshness interval returned with every response
    pub ttl: Duration,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            resource_prefix: "xservers".to_string(),
            volume_separator: '-',
            normalize_region: true,
            volume_key: VolumeKey::Name,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CompositionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.resource_prefix.is_empty() {
            return Err(Error::Configuration(
                "resource prefix must not be empty".to_string(),
            ));
        }
        if self.volume_separator != '-' && self.volume_separator != '_' {
            return Err(Error::Configuration(format!(
                "volume separator must be '-' or '_', got {:?}",
                self.volume_separator
            )));
        }
        Ok(())
    }

    /// Location of a region code
    pub fn location(&self, region: &str) -> String {
        if self.normalize_region {
            region.replacen('-', "/", 1)
        } else {
            region.to_string()
        }
    }
}

// =============================================================================
// Workspace Intent
// =============================================================================

/// Fields read from the composite, in the order they are validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceIntent {
    pub workspace: String,
    pub region: String,
    pub tenant: String,
    pub image: String,
    pub size_gb: i64,
    pub name: String,
}

impl WorkspaceIntent {
    /// Extract every required field; the first failure wins
    pub fn from_composite(xr: &Unstructured) -> Result<Self> {
        Ok(Self {
            workspace: xr.required("spec.workspace")?,
            region: xr.required("spec.region")?,
            tenant: xr.required("spec.tenant")?,
            image: xr.required("spec.image")?,
            size_gb: xr.required("spec.sizeGB")?,
            name: xr.required("spec.name")?,
        })
    }

    /// Name of the workspace's datacenter
    pub fn datacenter_identity(&self) -> String {
        format!("{}-datacenter", self.workspace)
    }

    /// Name of the workspace's volume
    pub fn volume_identity(&self, separator: char) -> String {
        format!("{}{}volume", self.workspace, separator)
    }
}

// =============================================================================
// Storage Function
// =============================================================================

/// Composes a datacenter and a volume for each storage workspace
pub struct StorageFunction {
    config: CompositionConfig,
    scheme: Arc<Scheme>,
}

impl StorageFunction {
    /// Create a new function
    pub fn new(config: CompositionConfig, scheme: Arc<Scheme>) -> Arc<Self> {
        Arc::new(Self { config, scheme })
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Run the function once. Failures become a fatal result; the response
    /// then carries the request's desired state untouched.
    pub fn run_function(&self, req: &RunFunctionRequest) -> RunFunctionResponse {
        info!(tag = %req.meta.tag, "Running function");
        let mut rsp = response::to(req, self.config.ttl);

        if let Err(e) = self.run(req, &mut rsp) {
            warn!(tag = %req.meta.tag, error = %e, "Function run failed");
            response::fatal(&mut rsp, &e);
        }

        rsp
    }

    fn run(&self, req: &RunFunctionRequest, rsp: &mut RunFunctionResponse) -> Result<()> {
        let observed = request::observed_composed(req);
        let desired = request::desired_composed(req);
        let xr = request::observed_composite(req)?;

        let desired = self.compose(&xr, &observed, desired)?;

        response::set_desired_composed(rsp, &desired)?;
        response::condition_true(rsp, CONDITION_FUNCTION_SUCCESS, "Success")
            .target_composite_and_claim();
        Ok(())
    }

    /// Derive the workspace's resources into a copy of the desired map.
    /// Entries this function does not own pass through unchanged.
    pub fn compose(
        &self,
        xr: &Unstructured,
        observed: &ObservedMap,
        mut desired: DesiredMap,
    ) -> Result<DesiredMap> {
        let intent = WorkspaceIntent::from_composite(xr)?;

        let datacenter = self.datacenter(&intent);
        let key = ResourceName::prefixed(&self.config.resource_prefix, datacenter.name());
        info!(name = %datacenter.name(), "Creating datacenter");
        let entry = self.desired_entry(&datacenter, &key, observed)?;
        desired.insert(key, entry);

        let volume = self.volume(&intent);
        let key = match self.config.volume_key {
            VolumeKey::Name => ResourceName::prefixed(&self.config.resource_prefix, &intent.name),
            VolumeKey::Identity => {
                ResourceName::prefixed(&self.config.resource_prefix, volume.name())
            }
        };
        info!(name = %volume.name(), "Creating volume");
        let entry = self.desired_entry(&volume, &key, observed)?;
        desired.insert(key, entry);

        Ok(desired)
    }

    /// Convert a derived resource and carry over observed readiness
    fn desired_entry<K>(
        &self,
        obj: &K,
        key: &ResourceName,
        observed: &ObservedMap,
    ) -> Result<DesiredComposed>
    where
        K: kube::Resource<DynamicType = ()> + serde::Serialize,
    {
        let mut entry = DesiredComposed::new(self.scheme.to_composed(obj)?);
        if is_observed_ready(observed, key) {
            info!(%key, "Composed resource is ready");
            entry.ready = Ready::True;
        } else {
            debug!(%key, "Composed resource is not ready");
        }
        Ok(entry)
    }

    /// The workspace's datacenter
    pub fn datacenter(&self, intent: &WorkspaceIntent) -> Datacenter {
        let identity = intent.datacenter_identity();

        let mut labels = BTreeMap::new();
        labels.insert(LABEL_DATACENTER_NAME.to_string(), identity.clone());
        labels.insert(LABEL_DATACENTER.to_string(), intent.workspace.clone());
        labels.insert(LABEL_REGION.to_string(), intent.region.clone());
        labels.insert(LABEL_TENANT.to_string(), intent.tenant.clone());

        let mut datacenter = Datacenter::new(
            &identity,
            DatacenterSpec {
                for_provider: DatacenterParameters {
                    description: Some(format!("Datacenter for {}", intent.workspace)),
                    location: Some(self.config.location(&intent.region)),
                    name: Some(identity.clone()),
                    sec_auth_protection: None,
                },
            },
        );
        datacenter.metadata.labels = Some(labels);
        datacenter
    }

    /// The workspace's volume, attached to the datacenter by label only
    pub fn volume(&self, intent: &WorkspaceIntent) -> Volume {
        Volume::new(
            &intent.volume_identity(self.config.volume_separator),
            VolumeSpec {
                for_provider: VolumeParameters {
                    datacenter_id: None,
                    datacenter_id_selector: Some(Selector::match_label(
                        LABEL_DATACENTER,
                        intent.workspace.clone(),
                    )),
                    disk_type: Some(VOLUME_DISK_TYPE.to_string()),
                    image_name: Some(intent.image.clone()),
                    image_password: Some(VOLUME_IMAGE_PASSWORD.to_string()),
                    name: Some(intent.name.clone()),
                    size: Some(intent.size_gb as f64),
                },
            },
        )
    }
}

/// A derived resource is ready when the runtime observed it with Ready=True
pub fn is_observed_ready(observed: &ObservedMap, key: &ResourceName) -> bool {
    observed.get(key).map(|o| o.is_ready()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{XSeCaStorage, XSeCaStorageSpec};
    use crate::function::proto::{Resource, Severity, Status, Target};
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    const DATACENTER_KEY: &str = "xservers-test-ws-datacenter";
    const VOLUME_KEY: &str = "xservers-test-volume";

    fn function(config: CompositionConfig) -> Arc<StorageFunction> {
        StorageFunction::new(config, Arc::new(Scheme::ionos()))
    }

    fn composite(region: &str) -> Unstructured {
        let xr = XSeCaStorage::new(
            "test-xr",
            XSeCaStorageSpec {
                workspace: "test-ws".into(),
                region: region.into(),
                tenant: "test-tenant".into(),
                image: "test-image".into(),
                size_gb: 50,
                name: "test-volume".into(),
            },
        );
        Unstructured::from_value(serde_json::to_value(&xr).unwrap()).unwrap()
    }

    fn composite_request(composite: Unstructured) -> RunFunctionRequest {
        request::for_composite("success", composite)
    }

    fn ready_resource(body: &Resource, status: &str) -> Resource {
        let mut resource = body.clone();
        resource.ready = Ready::Unspecified;
        resource.resource.insert(
            "status".into(),
            json!({ "conditions": [{ "type": "Ready", "status": status, "reason": "Available" }] }),
        );
        resource
    }

    fn body(rsp: &RunFunctionResponse, key: &str) -> Value {
        Value::Object(rsp.desired.resources[key].resource.clone())
    }

    #[test]
    fn test_success_derives_datacenter_and_volume() {
        let rsp = function(CompositionConfig::default())
            .run_function(&composite_request(composite("de-txl")));

        assert!(rsp.results.is_empty());
        assert_eq!(rsp.meta.tag, "success");
        assert_eq!(rsp.meta.ttl, DEFAULT_TTL);
        assert_eq!(rsp.desired.resources.len(), 2);

        let dc = body(&rsp, DATACENTER_KEY);
        assert_eq!(dc["apiVersion"], "compute.ionoscloud.io/v1alpha1");
        assert_eq!(dc["kind"], "Datacenter");
        assert_eq!(dc["metadata"]["name"], "test-ws-datacenter");
        assert_eq!(
            dc["metadata"]["labels"],
            json!({
                "ionos-cloud-datacenter-name": "test-ws-datacenter",
                "ionos-cloud-dc": "test-ws",
                "ionos-cloud-region": "de-txl",
                "ionos-cloud-tenant": "test-tenant"
            })
        );
        assert_eq!(
            dc["spec"]["forProvider"],
            json!({
                "description": "Datacenter for test-ws",
                "location": "de/txl",
                "name": "test-ws-datacenter"
            })
        );

        let vol = body(&rsp, VOLUME_KEY);
        assert_eq!(vol["kind"], "Volume");
        assert_eq!(vol["metadata"]["name"], "test-ws-volume");
        let params = &vol["spec"]["forProvider"];
        assert_eq!(params["diskType"], "SSD");
        assert_eq!(params["imageName"], "test-image");
        assert_eq!(params["imagePassword"], "thisisnotapassword");
        assert_eq!(params["name"], "test-volume");
        assert_eq!(params["size"].as_f64(), Some(50.0));
        assert_eq!(
            params["datacenterIdSelector"],
            json!({ "matchLabels": { "ionos-cloud-dc": "test-ws" } })
        );
        assert!(params.get("datacenterId").is_none());

        assert_eq!(rsp.conditions.len(), 1);
        assert_eq!(rsp.conditions[0].r#type, "FunctionSuccess");
        assert_eq!(rsp.conditions[0].status, Status::True);
        assert_eq!(rsp.conditions[0].reason, "Success");
        assert_eq!(rsp.conditions[0].target, Some(Target::CompositeAndClaim));

        for resource in rsp.desired.resources.values() {
            assert_eq!(resource.ready, Ready::Unspecified);
        }
    }

    #[test]
    fn test_missing_workspace_is_fatal() {
        let xr = Unstructured::from_value(json!({
            "apiVersion": "example.org/v1",
            "kind": "XSeCaStorage"
        }))
        .unwrap();
        let mut req = composite_request(xr);
        req.meta.tag = "fatal".into();

        let rsp = function(CompositionConfig::default()).run_function(&req);

        assert_eq!(rsp.meta.tag, "fatal");
        assert_eq!(rsp.results.len(), 1);
        assert_eq!(rsp.results[0].severity, Severity::Fatal);
        assert_eq!(
            rsp.results[0].message,
            "cannot read spec.workspace field of XSeCaStorage: spec: no such field"
        );
        assert_eq!(rsp.results[0].target, Some(Target::Composite));
        assert!(rsp.desired.resources.is_empty());
        assert!(rsp.conditions.is_empty());
    }

    #[test]
    fn test_fields_validated_in_order() {
        let xr = Unstructured::from_value(json!({
            "kind": "XSeCaStorage",
            "spec": { "workspace": "test-ws", "sizeGB": "large" }
        }))
        .unwrap();
        let err = WorkspaceIntent::from_composite(&xr).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot read spec.region field of XSeCaStorage: spec.region: no such field"
        );

        let xr = Unstructured::from_value(json!({
            "kind": "XSeCaStorage",
            "spec": {
                "workspace": "test-ws", "region": "de-txl", "tenant": "t",
                "image": "img", "sizeGB": "large"
            }
        }))
        .unwrap();
        let err = WorkspaceIntent::from_composite(&xr).unwrap_err();
        assert_matches!(err, Error::TypeMismatchField { ref path, .. } if path == "spec.sizeGB");
        assert_eq!(
            err.to_string(),
            "cannot read spec.sizeGB field of XSeCaStorage: spec.sizeGB: not an integer"
        );
    }

    #[test]
    fn test_tenant_checked_before_image() {
        let xr = Unstructured::from_value(json!({
            "kind": "XSeCaStorage",
            "spec": { "workspace": "test-ws", "region": "de-txl", "sizeGB": 50, "name": "vol" }
        }))
        .unwrap();
        let err = WorkspaceIntent::from_composite(&xr).unwrap_err();
        assert_matches!(err, Error::MissingField { ref path, .. } if path == "spec.tenant");
    }

    #[test]
    fn test_name_checked_last() {
        let xr = Unstructured::from_value(json!({
            "kind": "XSeCaStorage",
            "spec": {
                "workspace": "test-ws", "region": "de-txl", "tenant": "t",
                "image": "img", "sizeGB": 50
            }
        }))
        .unwrap();
        let err = WorkspaceIntent::from_composite(&xr).unwrap_err();
        assert_matches!(err, Error::MissingField { ref path, .. } if path == "spec.name");
        assert_eq!(
            err.to_string(),
            "cannot read spec.name field of XSeCaStorage: spec.name: no such field"
        );
    }

    #[test]
    fn test_fatal_keeps_request_desired_state() {
        let xr = Unstructured::from_value(json!({
            "kind": "XSeCaStorage",
            "spec": { "workspace": "test-ws", "region": "de-txl" }
        }))
        .unwrap();
        let mut req = composite_request(xr);
        let other =
            request::wire_resource(json!({ "apiVersion": "v1", "kind": "ConfigMap" })).unwrap();
        req.desired.resources.insert("other-function-cm".into(), other.clone());

        let rsp = function(CompositionConfig::default()).run_function(&req);

        assert!(rsp.is_fatal());
        assert_eq!(rsp.desired.resources.len(), 1);
        assert_eq!(rsp.desired.resources["other-function-cm"], other);
    }

    #[test]
    fn test_region_normalization() {
        let config = CompositionConfig::default();
        assert_eq!(config.location("de-txl"), "de/txl");
        assert_eq!(config.location("us-las-2"), "us/las-2");
        assert_eq!(config.location("gb"), "gb");

        let config = CompositionConfig {
            normalize_region: false,
            ..Default::default()
        };
        let rsp = function(config).run_function(&composite_request(composite("de-txl")));
        let dc = body(&rsp, DATACENTER_KEY);
        assert_eq!(dc["spec"]["forProvider"]["location"], "de-txl");
        assert_eq!(dc["metadata"]["labels"]["ionos-cloud-region"], "de-txl");
    }

    #[test]
    fn test_underscore_identity_variant() {
        let config = CompositionConfig {
            volume_separator: '_',
            volume_key: VolumeKey::Identity,
            ..Default::default()
        };
        let rsp = function(config).run_function(&composite_request(composite("de-txl")));

        assert!(rsp.results.is_empty());
        let vol = body(&rsp, "xservers-test-ws_volume");
        assert_eq!(vol["metadata"]["name"], "test-ws_volume");
        assert!(rsp.desired.resources.contains_key(DATACENTER_KEY));
        assert!(!rsp.desired.resources.contains_key(VOLUME_KEY));
    }

    #[test]
    fn test_readiness_propagated_from_observed() {
        let f = function(CompositionConfig::default());
        let first = f.run_function(&composite_request(composite("de-txl")));

        let mut req = composite_request(composite("de-txl"));
        req.observed.resources.insert(
            DATACENTER_KEY.into(),
            ready_resource(&first.desired.resources[DATACENTER_KEY], "True"),
        );
        req.observed.resources.insert(
            VOLUME_KEY.into(),
            ready_resource(&first.desired.resources[VOLUME_KEY], "False"),
        );

        let rsp = f.run_function(&req);
        assert_eq!(rsp.desired.resources[DATACENTER_KEY].ready, Ready::True);
        assert_eq!(rsp.desired.resources[VOLUME_KEY].ready, Ready::Unspecified);
    }

    #[test]
    fn test_observed_without_conditions_is_not_ready() {
        let f = function(CompositionConfig::default());
        let first = f.run_function(&composite_request(composite("de-txl")));

        let mut req = composite_request(composite("de-txl"));
        req.observed.resources = first.desired.resources.clone();

        let rsp = f.run_function(&req);
        for resource in rsp.desired.resources.values() {
            assert_eq!(resource.ready, Ready::Unspecified);
        }
    }

    #[test]
    fn test_unrelated_desired_entries_survive() {
        let mut req = composite_request(composite("de-txl"));
        let mut other = request::wire_resource(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "data": { "k": "v" }
        }))
        .unwrap();
        other.ready = Ready::True;
        req.desired.resources.insert("other-function-cm".into(), other.clone());

        let rsp = function(CompositionConfig::default()).run_function(&req);

        assert!(rsp.results.is_empty());
        assert_eq!(rsp.desired.resources.len(), 3);
        assert_eq!(rsp.desired.resources["other-function-cm"], other);
    }

    #[test]
    fn test_unrelated_connection_details_survive() {
        let mut req = composite_request(composite("de-txl"));
        let mut secret = request::wire_resource(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": { "name": "db-credentials" }
        }))
        .unwrap();
        secret
            .connection_details
            .insert("password".into(), "c2VjcmV0".into());
        req.desired.resources.insert("other".into(), secret.clone());

        let rsp = function(CompositionConfig::default()).run_function(&req);

        assert!(rsp.results.is_empty());
        assert_eq!(rsp.desired.resources["other"], secret);
        assert!(rsp.desired.resources[DATACENTER_KEY]
            .connection_details
            .is_empty());
    }

    #[test]
    fn test_own_entries_are_overwritten() {
        let mut req = composite_request(composite("de-txl"));
        let stale = request::wire_resource(json!({
            "apiVersion": "compute.ionoscloud.io/v1alpha1",
            "kind": "Datacenter",
            "metadata": { "name": "stale" }
        }))
        .unwrap();
        req.desired.resources.insert(DATACENTER_KEY.into(), stale);

        let rsp = function(CompositionConfig::default()).run_function(&req);
        assert_eq!(body(&rsp, DATACENTER_KEY)["metadata"]["name"], "test-ws-datacenter");
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let f = function(CompositionConfig::default());
        let first = f.run_function(&composite_request(composite("de-txl")));
        let again = f.run_function(&composite_request(composite("de-txl")));
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&again).unwrap()
        );

        let mut req = composite_request(composite("de-txl"));
        req.observed.resources = first
            .desired
            .resources
            .iter()
            .map(|(k, r)| (k.clone(), ready_resource(r, "True")))
            .collect();
        let second = f.run_function(&req);

        for (key, resource) in &first.desired.resources {
            assert_eq!(second.desired.resources[key].resource, resource.resource);
            assert_eq!(second.desired.resources[key].ready, Ready::True);
        }
    }

    #[test]
    fn test_unregistered_kind_is_fatal() {
        let f = StorageFunction::new(CompositionConfig::default(), Arc::new(Scheme::new()));
        let rsp = f.run_function(&composite_request(composite("de-txl")));

        assert!(rsp.is_fatal());
        assert_eq!(
            rsp.results[0].message,
            "cannot convert Datacenter to an unstructured composed resource: kind is not registered in the scheme"
        );
        assert!(rsp.desired.resources.is_empty());
    }

    #[test]
    fn test_partial_scheme_emits_nothing() {
        let scheme = Scheme::new().register::<Datacenter>();
        let f = StorageFunction::new(CompositionConfig::default(), Arc::new(scheme));
        let rsp = f.run_function(&composite_request(composite("de-txl")));

        assert!(rsp.is_fatal());
        assert!(rsp.results[0].message.starts_with("cannot convert Volume"));
        assert!(rsp.desired.resources.is_empty());
    }

    #[test]
    fn test_malformed_pipeline_entry_fails_assembly() {
        let mut req = composite_request(composite("de-txl"));
        req.desired.resources.insert(
            "other-function-broken".into(),
            request::wire_resource(json!({ "spec": {} })).unwrap(),
        );

        let rsp = function(CompositionConfig::default()).run_function(&req);

        assert!(rsp.is_fatal());
        assert!(rsp.results[0]
            .message
            .starts_with("cannot set desired composed resources in response"));
        assert_eq!(rsp.desired.resources.len(), 1);
        assert!(rsp.conditions.is_empty());
    }

    #[test]
    fn test_missing_composite_is_fatal() {
        let rsp =
            function(CompositionConfig::default()).run_function(&RunFunctionRequest::default());
        assert!(rsp.is_fatal());
        assert!(rsp.results[0].message.contains("observed composite resource"));
    }

    #[test]
    fn test_config_validation() {
        assert!(CompositionConfig::default().validate().is_ok());

        let config = CompositionConfig {
            volume_separator: '.',
            ..Default::default()
        };
        assert_matches!(config.validate(), Err(Error::Configuration(_)));

        let config = CompositionConfig {
            resource_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_volume_key_parse() {
        assert_eq!("name".parse::<VolumeKey>().unwrap(), VolumeKey::Name);
        assert_eq!("Identity".parse::<VolumeKey>().unwrap(), VolumeKey::Identity);
        assert!("id".parse::<VolumeKey>().is_err());
        assert_eq!(VolumeKey::Identity.to_string(), "identity");
    }
}
