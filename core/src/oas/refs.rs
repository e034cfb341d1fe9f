//! # Reference Resolution
//!
//! Helper functions to turn local `$ref` pointers into the identifiers used
//! by the model catalog. Only one level is ever resolved.

use percent_encoding::percent_decode_str;

/// Schema prefix of Swagger 2.0 documents.
pub const V2_SCHEMA_PREFIX: &str = "#/definitions/";
/// Schema prefix of OpenAPI 3.0 documents.
pub const V3_SCHEMA_PREFIX: &str = "#/components/schemas/";
/// Shared parameter prefix of Swagger 2.0 documents.
pub const V2_PARAMETER_PREFIX: &str = "#/parameters/";
/// Shared parameter prefix of OpenAPI 3.0 documents.
pub const V3_PARAMETER_PREFIX: &str = "#/components/parameters/";
/// Shared request body prefix of OpenAPI 3.0 documents.
pub const V3_REQUEST_BODY_PREFIX: &str = "#/components/requestBodies/";

/// Strips `prefix` from a reference and decodes the remaining pointer segment.
///
/// Returns `None` when the reference lives outside `prefix` or points deeper
/// than a direct child (e.g. `#/definitions/Pet/properties/id`).
///
/// e.g. `#/components/schemas/Widget` -> `Widget`
pub fn strip_ref_prefix(reference: &str, prefix: &str) -> Option<String> {
    let segment = reference.strip_prefix(prefix)?;
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(segment))
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    // Fragment pointers are percent-decoded before `~` unescaping.
    percent_decode_str(segment)
        .decode_utf8_lossy()
        .replace("~1", "/")
        .replace("~0", "~")
}
