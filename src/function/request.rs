//! Request accessors
//!
//! Pull the composite and the composed resource maps out of a
//! [`RunFunctionRequest`].

use serde_json::Value;

use super::composed::{DesiredComposed, DesiredMap, ObservedComposed, ObservedMap, ResourceName};
use super::proto::{Resource, RunFunctionRequest};
use super::unstructured::Unstructured;
use crate::error::{Error, Result};

/// The composite resource the runtime observed
pub fn observed_composite(req: &RunFunctionRequest) -> Result<Unstructured> {
    let composite = req.observed.composite.as_ref().ok_or_else(|| Error::Request {
        what: "observed composite resource".to_string(),
        reason: "request carries no observed composite".to_string(),
    })?;
    Ok(Unstructured::from_object(composite.resource.clone()))
}

/// Composed resources the runtime observed
pub fn observed_composed(req: &RunFunctionRequest) -> ObservedMap {
    req.observed
        .resources
        .iter()
        .map(|(name, r)| {
            (
                ResourceName::from(name.as_str()),
                ObservedComposed {
                    resource: Unstructured::from_object(r.resource.clone()),
                    connection_details: r.connection_details.clone(),
                },
            )
        })
        .collect()
}

/// Composed resources desired by earlier functions in the pipeline
pub fn desired_composed(req: &RunFunctionRequest) -> DesiredMap {
    req.desired
        .resources
        .iter()
        .map(|(name, r)| {
            (
                ResourceName::from(name.as_str()),
                DesiredComposed {
                    resource: Unstructured::from_object(r.resource.clone()),
                    connection_details: r.connection_details.clone(),
                    ready: r.ready,
                },
            )
        })
        .collect()
}

/// Build a request around a composite document, as the runtime would send it
pub fn for_composite(tag: impl Into<String>, composite: Unstructured) -> RunFunctionRequest {
    let mut req = RunFunctionRequest::default();
    req.meta.tag = tag.into();
    req.observed.composite = Some(Resource {
        resource: composite.into_object(),
        ..Default::default()
    });
    req
}

/// Wrap a JSON document as a wire resource; non-objects are rejected
pub fn wire_resource(document: Value) -> Result<Resource> {
    let resource = Unstructured::from_value(document).ok_or_else(|| Error::Request {
        what: "resource".to_string(),
        reason: "resource document is not an object".to_string(),
    })?;
    Ok(Resource {
        resource: resource.into_object(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::proto::Ready;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_missing_composite() {
        let err = observed_composite(&RunFunctionRequest::default()).unwrap_err();
        assert_matches!(err, Error::Request { .. });
        assert_eq!(
            err.to_string(),
            "cannot get observed composite resource from request: request carries no observed composite"
        );
    }

    #[test]
    fn test_composed_maps() {
        let composite = Unstructured::from_value(json!({ "kind": "XSeCaStorage" })).unwrap();
        let mut req = for_composite("t1", composite);
        req.observed.resources.insert(
            "xservers-a".into(),
            wire_resource(json!({ "kind": "Datacenter" })).unwrap(),
        );
        let mut desired = wire_resource(json!({ "kind": "Volume" })).unwrap();
        desired.ready = Ready::True;
        desired
            .connection_details
            .insert("endpoint".into(), "ZGMx".into());
        req.desired.resources.insert("xservers-b".into(), desired);

        assert_eq!(observed_composite(&req).unwrap().get_kind(), "XSeCaStorage");

        let observed = observed_composed(&req);
        assert_eq!(observed[&ResourceName::from("xservers-a")].resource.get_kind(), "Datacenter");

        let desired = desired_composed(&req);
        let entry = &desired[&ResourceName::from("xservers-b")];
        assert_eq!(entry.ready, Ready::True);
        assert_eq!(entry.connection_details["endpoint"], "ZGMx");
    }

    #[test]
    fn test_wire_resource_rejects_non_objects() {
        assert_matches!(wire_resource(json!([1, 2])), Err(Error::Request { .. }));
    }
}
