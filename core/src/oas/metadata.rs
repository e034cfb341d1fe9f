#![deny(missing_docs)]

//! # Metadata Extraction
//!
//! Projects the `info` object and the version-specific server sections onto
//! uniform fields. No fallback values: a missing `info` field stays absent.

use crate::error::{AppError, AppResult};
use crate::oas::shims::{ShimInfo, ShimOpenApi, ShimSwagger};

/// Document metadata common to both versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiMetadata {
    /// `info.version`.
    pub api_version: Option<String>,
    /// `info.title`.
    pub title: Option<String>,
    /// `info.description`.
    pub description: Option<String>,
}

/// Location of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerMetadata {
    /// Absolute or templated URL.
    pub url: String,
    /// Server description (3.0 only).
    pub description: Option<String>,
}

/// Direct projection of the `info` object.
pub fn extract_metadata(info: Option<&ShimInfo>) -> ApiMetadata {
    let Some(info) = info else {
        return ApiMetadata::default();
    };
    ApiMetadata {
        api_version: info.version.clone(),
        title: info.title.clone(),
        description: info.description.clone(),
    }
}

/// Builds `scheme://host` + `basePath` from a Swagger 2.0 document.
///
/// Always takes the first declared scheme; multi-scheme documents are not
/// disambiguated. A missing `basePath` contributes nothing.
pub fn extract_server_v2(swagger: &ShimSwagger) -> AppResult<ServerMetadata> {
    let scheme = swagger
        .schemes
        .as_ref()
        .and_then(|schemes| schemes.first())
        .ok_or_else(|| {
            AppError::Structure("Swagger 2.0 document declares no 'schemes'".into())
        })?;
    let host = swagger
        .host
        .as_deref()
        .ok_or_else(|| AppError::Structure("Swagger 2.0 document declares no 'host'".into()))?;
    let base_path = swagger.base_path.as_deref().unwrap_or_default();

    Ok(ServerMetadata {
        url: format!("{}://{}{}", scheme, host, base_path),
        description: None,
    })
}

/// Takes the first declared server of an OpenAPI 3.0 document verbatim.
pub fn extract_server_v3(openapi: &ShimOpenApi) -> AppResult<ServerMetadata> {
    let server = openapi
        .servers
        .as_ref()
        .and_then(|servers| servers.first())
        .ok_or_else(|| {
            AppError::Structure("OpenAPI 3.0 document declares no 'servers'".into())
        })?;
    let url = server
        .url
        .clone()
        .ok_or_else(|| AppError::Structure("First server entry has no 'url'".into()))?;

    Ok(ServerMetadata {
        url,
        description: server.description.clone(),
    })
}
