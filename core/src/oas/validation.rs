#![deny(missing_docs)]

//! # OpenAPI Validation
//!
//! Structural checks enforced on the raw document tree before version
//! dispatch. A failure here means the document is not an OpenAPI document
//! this crate can read, and no model is produced.
//!
//! Checks:
//! - Root is an object carrying exactly one version marker.
//! - `info` is an object with string `title` and `version`.
//! - `paths` is an object; path keys start with `/`; path items are objects.
//! - 2.0: `host` has no scheme or sub-path, `basePath` starts with `/`,
//!   `schemes` only lists transfer protocols, `definitions` is an object.
//! - 3.0: `servers` entries are objects with a string `url`, component
//!   keys match `^[a-zA-Z0-9._-]+$`.

use crate::error::{AppError, AppResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const COMPONENT_KEY_PATTERN: &str = r"^[a-zA-Z0-9._-]+$";
const SWAGGER_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];
const COMPONENT_SECTIONS: [&str; 3] = ["schemas", "parameters", "requestBodies"];

/// Validates the structure of a parsed document tree.
pub fn validate_document(root: &Value) -> AppResult<()> {
    let root = root
        .as_object()
        .ok_or_else(|| invalid("document root must be an object"))?;

    match (root.contains_key("swagger"), root.contains_key("openapi")) {
        (true, true) => {
            return Err(invalid(
                "document declares both 'swagger' and 'openapi' version markers",
            ))
        }
        (false, false) => return Err(invalid("document declares no version marker")),
        _ => {}
    }

    validate_info(root)?;
    validate_paths(root)?;

    if root.contains_key("swagger") {
        validate_swagger_root(root)
    } else {
        validate_openapi_root(root)
    }
}

fn validate_info(root: &Map<String, Value>) -> AppResult<()> {
    let info = root
        .get("info")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("missing required 'info' object"))?;

    for field in ["title", "version"] {
        match info.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(invalid(format!("'info.{}' must be a string", field))),
            None => return Err(invalid(format!("missing required 'info.{}'", field))),
        }
    }
    Ok(())
}

fn validate_paths(root: &Map<String, Value>) -> AppResult<()> {
    let paths = root
        .get("paths")
        .ok_or_else(|| invalid("missing required 'paths' object"))?
        .as_object()
        .ok_or_else(|| invalid("'paths' must be an object"))?;

    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        if !path.starts_with('/') {
            return Err(invalid(format!("path '{}' must start with '/'", path)));
        }
        if !item.is_object() {
            return Err(invalid(format!("path item '{}' must be an object", path)));
        }
    }
    Ok(())
}

fn validate_swagger_root(root: &Map<String, Value>) -> AppResult<()> {
    if let Some(host) = root.get("host") {
        let host = host
            .as_str()
            .ok_or_else(|| invalid("'host' must be a string"))?;
        if host.contains("://") || host.contains('/') {
            return Err(invalid(format!(
                "'host' must not include a scheme or sub-path: '{}'",
                host
            )));
        }
    }

    if let Some(base_path) = root.get("basePath") {
        let base_path = base_path
            .as_str()
            .ok_or_else(|| invalid("'basePath' must be a string"))?;
        if !base_path.starts_with('/') {
            return Err(invalid(format!(
                "'basePath' must start with '/': '{}'",
                base_path
            )));
        }
    }

    if let Some(schemes) = root.get("schemes") {
        let schemes = schemes
            .as_array()
            .ok_or_else(|| invalid("'schemes' must be an array"))?;
        for scheme in schemes {
            match scheme.as_str() {
                Some(s) if SWAGGER_SCHEMES.contains(&s) => {}
                _ => return Err(invalid(format!("unsupported scheme {}", scheme))),
            }
        }
    }

    if let Some(definitions) = root.get("definitions") {
        if !definitions.is_object() {
            return Err(invalid("'definitions' must be an object"));
        }
    }

    Ok(())
}

fn validate_openapi_root(root: &Map<String, Value>) -> AppResult<()> {
    if let Some(servers) = root.get("servers") {
        let servers = servers
            .as_array()
            .ok_or_else(|| invalid("'servers' must be an array"))?;
        for (index, server) in servers.iter().enumerate() {
            if !server.get("url").is_some_and(Value::is_string) {
                return Err(invalid(format!("server #{} is missing a string 'url'", index)));
            }
        }
    }

    if let Some(components) = root.get("components") {
        let components = components
            .as_object()
            .ok_or_else(|| invalid("'components' must be an object"))?;
        validate_component_keys(components)?;
    }

    Ok(())
}

/// Validates that component names only use the characters OpenAPI 3 allows.
pub(crate) fn validate_component_keys(components: &Map<String, Value>) -> AppResult<()> {
    let pattern = component_key_regex()?;

    for section in COMPONENT_SECTIONS {
        let Some(entries) = components.get(section) else {
            continue;
        };
        let entries = entries
            .as_object()
            .ok_or_else(|| invalid(format!("'components.{}' must be an object", section)))?;
        for key in entries.keys() {
            if !pattern.is_match(key) {
                return Err(invalid(format!(
                    "component key '{}' in '{}' must match {}",
                    key, section, COMPONENT_KEY_PATTERN
                )));
            }
        }
    }
    Ok(())
}

fn component_key_regex() -> AppResult<&'static Regex> {
    static COMPONENT_KEY_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    COMPONENT_KEY_RE
        .get_or_init(|| Regex::new(COMPONENT_KEY_PATTERN))
        .as_ref()
        .map_err(|e| AppError::General(format!("Invalid component key pattern: {}", e)))
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Validation(message.into())
}
