#![deny(missing_docs)]

//! # OpenAPI Processing Module
//!
//! - **shims**: Lenient deserialization layer over the raw document tree.
//! - **validation**: Structural checks run before version dispatch.
//! - **document**: Parsing, version detection and normalization.
//! - **metadata**: `info` and server projection.
//! - **refs**: Single-level `$ref` stripping.
//! - **models**: Schema objects -> data model catalog.
//! - **controls**: Parameters / properties -> input controls.
//! - **components**: Operations -> dynamic components.

pub mod components;
pub mod controls;
pub mod document;
pub mod metadata;
pub mod models;
pub mod refs;
pub mod shims;
pub mod validation;

pub use components::synthesize_components;
pub use controls::{choose_widget, control_for_parameter, control_for_property};
pub use document::{detect_version, parse_document, Document, NormalizedSpec, SpecVersion};
pub use metadata::{extract_metadata, extract_server_v2, extract_server_v3, ApiMetadata, ServerMetadata};
pub use models::{synthesize_models, RefScope};
pub use validation::validate_document;
