#![deny(missing_docs)]

//! # Document Loading
//!
//! Parses raw text into a document tree, detects the specification version
//! and normalizes both versions into one [`NormalizedSpec`] record. All
//! synthesis downstream reads the normalized record only.

use crate::error::{AppError, AppResult};
use crate::oas::metadata::{
    extract_metadata, extract_server_v2, extract_server_v3, ApiMetadata, ServerMetadata,
};
use crate::oas::refs::{
    V2_PARAMETER_PREFIX, V2_SCHEMA_PREFIX, V3_PARAMETER_PREFIX, V3_REQUEST_BODY_PREFIX,
    V3_SCHEMA_PREFIX,
};
use crate::oas::shims::{scalar_to_string, ShimOpenApi, ShimPathItem, ShimSchemaMap, ShimSwagger};
use indexmap::IndexMap;
use serde_json::Value;

/// Version token of supported Swagger documents.
pub const SWAGGER_2: &str = "2.0";
/// Version token of supported OpenAPI documents.
pub const OPENAPI_3: &str = "3.0.0";

/// The supported specification versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    /// `swagger: "2.0"`
    Swagger2,
    /// `openapi: "3.0.0"`
    OpenApi3,
}

/// Which operation field feeds a component's description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    /// Operation `summary`.
    Summary,
    /// Operation `description`.
    Description,
}

impl SpecVersion {
    /// The raw version token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Swagger2 => SWAGGER_2,
            Self::OpenApi3 => OPENAPI_3,
        }
    }

    /// Prefix of local schema references.
    pub fn schema_prefix(&self) -> &'static str {
        match self {
            Self::Swagger2 => V2_SCHEMA_PREFIX,
            Self::OpenApi3 => V3_SCHEMA_PREFIX,
        }
    }

    /// Prefix of shared parameter references.
    pub fn parameter_prefix(&self) -> &'static str {
        match self {
            Self::Swagger2 => V2_PARAMETER_PREFIX,
            Self::OpenApi3 => V3_PARAMETER_PREFIX,
        }
    }

    /// Prefix of shared request body references (3.0 only).
    pub fn request_body_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Swagger2 => None,
            Self::OpenApi3 => Some(V3_REQUEST_BODY_PREFIX),
        }
    }

    /// Field used for component descriptions.
    pub fn description_source(&self) -> DescriptionSource {
        match self {
            Self::Swagger2 => DescriptionSource::Summary,
            Self::OpenApi3 => DescriptionSource::Description,
        }
    }
}

/// A parsed document tagged with its version.
#[derive(Debug, Clone)]
pub enum Document {
    /// Swagger 2.0.
    Swagger2(ShimSwagger),
    /// OpenAPI 3.0.
    OpenApi3(ShimOpenApi),
}

/// Version-independent view of a document.
#[derive(Debug, Clone)]
pub struct NormalizedSpec {
    /// Source version.
    pub version: SpecVersion,
    /// `info` projection.
    pub metadata: ApiMetadata,
    /// Server location.
    pub server: ServerMetadata,
    /// Named schema objects; `None` when the section is missing entirely.
    pub schemas: Option<ShimSchemaMap>,
    /// Path items in declaration order.
    pub paths: IndexMap<String, Option<ShimPathItem>>,
    /// Shared parameters (`parameters` / `components.parameters`).
    pub shared_parameters: IndexMap<String, Value>,
    /// Shared request bodies (`components.requestBodies`).
    pub shared_request_bodies: IndexMap<String, Value>,
}

/// Parses YAML or JSON text into a document tree.
pub fn parse_document(content: &str) -> AppResult<Value> {
    serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))
}

/// Reads the version marker of a document tree.
///
/// Unquoted YAML `swagger: 2.0` arrives as a number and is read as `"2.0"`.
pub fn detect_version(root: &Value) -> AppResult<SpecVersion> {
    let swagger = root.get("swagger").and_then(scalar_to_string);
    let openapi = root.get("openapi").and_then(scalar_to_string);

    match (swagger.as_deref(), openapi.as_deref()) {
        (Some(SWAGGER_2), None) => Ok(SpecVersion::Swagger2),
        (None, Some(OPENAPI_3)) => Ok(SpecVersion::OpenApi3),
        (swagger, openapi) => Err(AppError::UnsupportedVersion(
            openapi.or(swagger).map(str::to_string),
        )),
    }
}

impl Document {
    /// Detects the version and deserializes the matching shim.
    pub fn from_value(root: Value) -> AppResult<Self> {
        let version = detect_version(&root)?;
        let document = match version {
            SpecVersion::Swagger2 => Self::Swagger2(
                serde_json::from_value(root)
                    .map_err(|e| AppError::Parse(format!("Failed to read Swagger 2.0 document: {}", e)))?,
            ),
            SpecVersion::OpenApi3 => Self::OpenApi3(
                serde_json::from_value(root)
                    .map_err(|e| AppError::Parse(format!("Failed to read OpenAPI 3.0 document: {}", e)))?,
            ),
        };
        Ok(document)
    }

    /// The version this document was detected as.
    pub fn version(&self) -> SpecVersion {
        match self {
            Self::Swagger2(_) => SpecVersion::Swagger2,
            Self::OpenApi3(_) => SpecVersion::OpenApi3,
        }
    }

    /// Runs the version-specific extraction and yields the common record.
    pub fn normalize(self) -> AppResult<NormalizedSpec> {
        match self {
            Self::Swagger2(swagger) => normalize_v2(swagger),
            Self::OpenApi3(openapi) => normalize_v3(openapi),
        }
    }
}

fn normalize_v2(swagger: ShimSwagger) -> AppResult<NormalizedSpec> {
    let server = extract_server_v2(&swagger)?;
    let metadata = extract_metadata(swagger.info.as_ref());

    Ok(NormalizedSpec {
        version: SpecVersion::Swagger2,
        metadata,
        server,
        schemas: swagger.definitions,
        paths: swagger.paths.unwrap_or_default(),
        shared_parameters: swagger.parameters.unwrap_or_default(),
        shared_request_bodies: IndexMap::new(),
    })
}

fn normalize_v3(openapi: ShimOpenApi) -> AppResult<NormalizedSpec> {
    let server = extract_server_v3(&openapi)?;
    let metadata = extract_metadata(openapi.info.as_ref());
    let components = openapi.components.unwrap_or_default();

    Ok(NormalizedSpec {
        version: SpecVersion::OpenApi3,
        metadata,
        server,
        schemas: components.schemas,
        paths: openapi.paths.unwrap_or_default(),
        shared_parameters: components.parameters.unwrap_or_default(),
        shared_request_bodies: components.request_bodies.unwrap_or_default(),
    })
}
