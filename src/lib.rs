//! SeCa Storage Function - Composition Function for Storage Workspaces
//!
//! Turns an `XSeCaStorage` composite into the IONOS Cloud resources that
//! back it and reports their readiness to the composition runtime.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        Composition Runtime (external)                        │
//! └──────────────────────────────────┬──────────────────────────────────────────┘
//!                                    │ RunFunctionRequest / RunFunctionResponse
//! ┌──────────────────────────────────┴──────────────────────────────────────────┐
//! │                               Function API                                   │
//! │             POST /v1/run-function      /health      /ready                   │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                            Storage Function                                  │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐  │
//! │  │   Validate   │──▶│    Derive    │──▶│    Merge     │──▶│  Readiness   │  │
//! │  │ (Unstructured│   │ (Datacenter, │   │ (desired map │   │  (observed   │  │
//! │  │   fields)    │   │   Volume)    │   │    copy)     │   │  conditions) │  │
//! │  └──────────────┘   └──────┬───────┘   └──────────────┘   └──────────────┘  │
//! │                            │                                                 │
//! │                    ┌───────┴───────┐                                         │
//! │                    │    Scheme     │                                         │
//! │                    └───────────────┘                                         │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`function`]: The composition transform and its wire model
//! - [`crd`]: Custom Resource Definitions
//! - [`api`]: HTTP server exposing the function
//! - [`metrics`]: Prometheus metrics for function runs
//! - [`error`]: Error types and handling

pub mod api;
pub mod crd;
pub mod error;
pub mod function;
pub mod metrics;

// Re-export commonly used types
pub use api::{ApiServer, ApiServerConfig, RestRouter};

pub use crd::{
    Condition, ConditionStatus, Datacenter, DatacenterSpec, Selector, Volume, VolumeSpec,
    XSeCaStorage, XSeCaStorageSpec,
};

pub use error::{Error, Result};

pub use function::{
    CompositionConfig, RunFunctionRequest, RunFunctionResponse, Scheme, StorageFunction,
    Unstructured, VolumeKey, WorkspaceIntent,
};

pub use metrics::FunctionMetrics;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
