//! Unstructured resource documents
//!
//! Composite and composed resources arrive as loosely-typed JSON objects.
//! [`Unstructured`] wraps one and offers typed accessors over dotted field
//! paths; each accessor either yields a value of the requested kind or says
//! precisely which segment was missing or mistyped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::crd::Condition;
use crate::error::{Error, Result};

// =============================================================================
// Field Errors
// =============================================================================

/// Failure of a single field accessor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The path, up to and including the first absent segment, does not exist
    #[error("{path}: no such field")]
    NoSuchField { path: String },

    /// The path exists but holds a value of another kind
    #[error("{path}: not {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },
}

/// A primitive that can be read out of a document field
pub trait FieldValue: Sized {
    /// Kind name used in mismatch messages, with its article
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FieldValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FieldValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_value(value: &Value) -> Option<Self> {
        // Wire documents carry every number as a double
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }
}

// =============================================================================
// Unstructured
// =============================================================================

/// A resource document held as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unstructured(Map<String, Value>);

impl Unstructured {
    /// Wrap a JSON object
    pub fn from_object(object: Map<String, Value>) -> Self {
        Self(object)
    }

    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self(object)),
            _ => None,
        }
    }

    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_object(self) -> Map<String, Value> {
        self.0
    }

    /// Resolve a dotted path to the value it names
    pub fn get_value(&self, path: &str) -> std::result::Result<&Value, FieldError> {
        let mut object = &self.0;
        let mut walked = String::with_capacity(path.len());
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let value = object.get(segment).ok_or_else(|| FieldError::NoSuchField {
                path: walked.clone(),
            })?;

            if segments.peek().is_none() {
                return Ok(value);
            }

            object = value.as_object().ok_or_else(|| FieldError::WrongType {
                path: walked.clone(),
                expected: "an object",
            })?;
        }

        Err(FieldError::NoSuchField {
            path: path.to_string(),
        })
    }

    /// Read a field of a specific primitive kind
    pub fn get<T: FieldValue>(&self, path: &str) -> std::result::Result<T, FieldError> {
        let value = self.get_value(path)?;
        T::from_value(value).ok_or_else(|| FieldError::WrongType {
            path: path.to_string(),
            expected: T::EXPECTED,
        })
    }

    /// Read a required field, naming the path and this resource's kind on failure
    pub fn required<T: FieldValue>(&self, path: &str) -> Result<T> {
        self.get(path)
            .map_err(|e| Error::field(path, self.get_kind(), e))
    }

    pub fn get_string(&self, path: &str) -> std::result::Result<String, FieldError> {
        self.get(path)
    }

    pub fn get_integer(&self, path: &str) -> std::result::Result<i64, FieldError> {
        self.get(path)
    }

    /// Kind of this resource, empty if unset
    pub fn get_kind(&self) -> &str {
        self.0.get("kind").and_then(Value::as_str).unwrap_or_default()
    }

    /// API version of this resource, empty if unset
    pub fn get_api_version(&self) -> &str {
        self.0
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// metadata.name, empty if unset
    pub fn get_name(&self) -> &str {
        self.get_value("metadata.name")
            .ok()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Condition of the given type from status.conditions, Unknown if absent
    pub fn get_condition(&self, condition_type: &str) -> Condition {
        self.get_value("status.conditions")
            .ok()
            .and_then(Value::as_array)
            .and_then(|conditions| {
                conditions
                    .iter()
                    .filter_map(|c| serde_json::from_value::<Condition>(c.clone()).ok())
                    .find(|c| c.r#type == condition_type)
            })
            .unwrap_or_else(|| Condition::unknown(condition_type))
    }
}

impl From<Map<String, Value>> for Unstructured {
    fn from(object: Map<String, Value>) -> Self {
        Self(object)
    }
}
