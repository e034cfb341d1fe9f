#![deny(missing_docs)]

//! # API UI Core
//!
//! Ingests an OpenAPI 2.0 or 3.0.0 document and synthesizes a normalized
//! "API UI Model": metadata, server location, a catalog of data models and
//! one dynamic UI component per operation.
//!
//! ```no_run
//! # async fn run() {
//! use apiui_core::{integrate, IngestConfig};
//!
//! if let Some(integration) = integrate("openapi.yaml", &IngestConfig::default()).await {
//!     println!("{} components", integration.model.dynamic_components.len());
//! }
//! # }
//! ```

/// Shared error types.
pub mod error;

/// Ingestion settings.
pub mod config;

/// Typed, non-fatal reporting channel.
pub mod diagnostics;

/// Output model definitions.
pub mod model;

/// Document retrieval.
pub mod loader;

/// OpenAPI parsing and synthesis.
pub mod oas;

/// Integration entry points.
pub mod ingest;

pub use config::IngestConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{AppError, AppResult};
pub use ingest::{
    integrate, integrate_str, integrate_with_cancel, synthesize, try_integrate,
    try_integrate_with_cancel, Integration,
};
pub use loader::Locator;
pub use model::{
    ApiUiModel, ComponentType, Control, ControlElement, DataModel, DynamicComponent, HttpMethod,
    ParamLocation, PropertyDescriptor,
};
pub use oas::{Document, NormalizedSpec, SpecVersion};
