//! Error types for the storage composition function
//!
//! Every failure the transform can hit is a variant here. Inside a function
//! run they are never propagated across the service boundary: the runner
//! turns them into a single fatal result on an otherwise well-formed response.

use axum::http::StatusCode;
use thiserror::Error;

use crate::function::unstructured::FieldError;

/// Unified error type for the function
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Composite Field Errors
    // =========================================================================
    #[error("cannot read {path} field of {kind}: {source}")]
    MissingField {
        path: String,
        kind: String,
        source: FieldError,
    },

    #[error("cannot read {path} field of {kind}: {source}")]
    TypeMismatchField {
        path: String,
        kind: String,
        source: FieldError,
    },

    // =========================================================================
    // Composed Resource Errors
    // =========================================================================
    #[error("cannot convert {kind} to an unstructured composed resource: {reason}")]
    Conversion { kind: String, reason: String },

    #[error("cannot set desired composed resources in response: {0}")]
    ResponseAssembly(String),

    #[error("cannot get {what} from request: {reason}")]
    Request { what: String, reason: String },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an accessor failure with the field path and the resource kind it
    /// was read from
    pub fn field(path: impl Into<String>, kind: impl Into<String>, source: FieldError) -> Self {
        let path = path.into();
        let kind = kind.into();
        match source {
            FieldError::NoSuchField { .. } => Error::MissingField { path, kind, source },
            FieldError::WrongType { .. } => Error::TypeMismatchField { path, kind, source },
        }
    }

    /// HTTP status used when the error escapes to the API layer
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::JsonParse(_) | Error::YamlParse(_) => StatusCode::BAD_REQUEST,
            Error::Request { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            e if e.is_field_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error was caused by the composite resource's declaration
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField { .. } | Error::TypeMismatchField { .. }
        )
    }
}

/// Result type alias for the function
pub type Result<T> = std::result::Result<T, Error>;
