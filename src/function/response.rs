//! Response builders
//!
//! Start a [`RunFunctionResponse`] from its request, then append results,
//! conditions and the desired composed resources.

use std::time::Duration;

use super::composed::DesiredMap;
use super::proto::{
    FunctionCondition, FunctionResult, Resource, RunFunctionRequest, RunFunctionResponse,
    ResponseMeta, Severity, Status, Target,
};
use crate::error::{Error, Result};

/// Freshness interval used unless configured otherwise
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Start a response to the given request. The tag, desired state and
/// pipeline context are carried over so earlier functions' output survives.
pub fn to(req: &RunFunctionRequest, ttl: Duration) -> RunFunctionResponse {
    RunFunctionResponse {
        meta: ResponseMeta {
            tag: req.meta.tag.clone(),
            ttl,
        },
        desired: req.desired.clone(),
        results: Vec::new(),
        context: req.context.clone(),
        conditions: Vec::new(),
    }
}

fn push_result(rsp: &mut RunFunctionResponse, severity: Severity, message: String) {
    rsp.results.push(FunctionResult {
        severity,
        message,
        reason: None,
        target: Some(Target::Composite),
    });
}

/// Report a failure that stops the composition
pub fn fatal(rsp: &mut RunFunctionResponse, err: &Error) {
    push_result(rsp, Severity::Fatal, err.to_string());
}

/// Report a problem the composition can proceed past
pub fn warning(rsp: &mut RunFunctionResponse, message: impl Into<String>) {
    push_result(rsp, Severity::Warning, message.into());
}

/// Report an informational event
pub fn normal(rsp: &mut RunFunctionResponse, message: impl Into<String>) {
    push_result(rsp, Severity::Normal, message.into());
}

/// Set a True condition on the composite
pub fn condition_true<'a>(
    rsp: &'a mut RunFunctionResponse,
    condition_type: &str,
    reason: &str,
) -> ConditionBuilder<'a> {
    push_condition(rsp, condition_type, Status::True, reason)
}

/// Set a False condition on the composite
pub fn condition_false<'a>(
    rsp: &'a mut RunFunctionResponse,
    condition_type: &str,
    reason: &str,
) -> ConditionBuilder<'a> {
    push_condition(rsp, condition_type, Status::False, reason)
}

fn push_condition<'a>(
    rsp: &'a mut RunFunctionResponse,
    condition_type: &str,
    status: Status,
    reason: &str,
) -> ConditionBuilder<'a> {
    rsp.conditions.push(FunctionCondition {
        r#type: condition_type.to_string(),
        status,
        reason: reason.to_string(),
        message: None,
        target: Some(Target::Composite),
    });
    let index = rsp.conditions.len() - 1;
    ConditionBuilder {
        condition: &mut rsp.conditions[index],
    }
}

/// Refines a condition just added to a response
pub struct ConditionBuilder<'a> {
    condition: &'a mut FunctionCondition,
}

impl<'a> ConditionBuilder<'a> {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.condition.message = Some(message.into());
        self
    }

    /// Surface the condition on the claim as well as the composite
    pub fn target_composite_and_claim(mut self) -> Self {
        self.condition.target = Some(Target::CompositeAndClaim);
        self
    }
}

/// Replace the response's desired composed resources
pub fn set_desired_composed(rsp: &mut RunFunctionResponse, desired: &DesiredMap) -> Result<()> {
    let mut resources = std::collections::BTreeMap::new();
    for (name, composed) in desired {
        let body = &composed.resource;
        if body.get_api_version().is_empty() || body.get_kind().is_empty() {
            return Err(Error::ResponseAssembly(format!(
                "composed resource {} has no apiVersion or kind",
                name
            )));
        }
        resources.insert(
            name.to_string(),
            Resource {
                resource: body.as_object().clone(),
                connection_details: composed.connection_details.clone(),
                ready: composed.ready,
            },
        );
    }
    rsp.desired.resources = resources;
    Ok(())
}
