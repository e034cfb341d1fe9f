#![deny(missing_docs)]

//! # Document Shims
//!
//! Lenient structures acting as an Intermediate Deserialization Layer between
//! the raw document tree and the synthesis pipeline. They map directly to the
//! Swagger 2.0 / OpenAPI 3.0 objects this crate reads and nothing more.
//!
//! Maps are `IndexMap`s so declaration order survives deserialization.
//! Schema and parameter slots are `Option`s so a `null` entry is skipped
//! instead of failing the whole document. Schema slots are also
//! [`Lenient`], so a schema these structs cannot read (tuple-form `items`,
//! a non-map property) is kept raw and only degrades its own slot.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A slot that is read as `T` when possible and kept raw otherwise.
///
/// Only JSON objects are read as `T`; sequences and scalars stay raw so a
/// struct is never filled positionally from an array.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    /// The slot was read as `T`.
    Read(T),
    /// The slot could not be read as `T`.
    Unreadable(Value),
}

impl<T> Lenient<T> {
    /// The read value, if any.
    pub fn readable(&self) -> Option<&T> {
        match self {
            Self::Read(value) => Some(value),
            Self::Unreadable(_) => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        if !raw.is_object() {
            return Ok(Self::Unreadable(raw));
        }
        match serde_json::from_value(raw.clone()) {
            Ok(value) => Ok(Self::Read(value)),
            Err(_) => Ok(Self::Unreadable(raw)),
        }
    }
}

/// A schema slot of a map or property list.
pub type ShimSchemaSlot = Lenient<ShimSchema>;

/// A path item: operation keys (`get`, `post`, ...) mixed with shared fields.
///
/// Kept as raw values; operations are read one at a time so a malformed
/// operation only degrades its own component.
pub type ShimPathItem = IndexMap<String, Value>;

/// Map of named schema objects (`definitions` / `components.schemas`).
pub type ShimSchemaMap = IndexMap<String, Option<ShimSchemaSlot>>;

/// Root of a Swagger 2.0 document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimSwagger {
    /// Metadata about the API.
    #[serde(default)]
    pub info: Option<ShimInfo>,
    /// Host (name or IP) serving the API.
    #[serde(default, deserialize_with = "lenient_string")]
    pub host: Option<String>,
    /// Base path relative to the host.
    #[serde(rename = "basePath", default, deserialize_with = "lenient_string")]
    pub base_path: Option<String>,
    /// Transfer protocols of the API.
    #[serde(default)]
    pub schemes: Option<Vec<String>>,
    /// Named schema objects.
    #[serde(default)]
    pub definitions: Option<ShimSchemaMap>,
    /// Shared parameter objects.
    #[serde(default)]
    pub parameters: Option<IndexMap<String, Value>>,
    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: Option<IndexMap<String, Option<ShimPathItem>>>,
}

/// Root of an OpenAPI 3.0 document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimOpenApi {
    /// Metadata about the API.
    #[serde(default)]
    pub info: Option<ShimInfo>,
    /// Server entries; the first one is used.
    #[serde(default)]
    pub servers: Option<Vec<ShimServer>>,
    /// Reusable definitions.
    #[serde(default)]
    pub components: Option<ShimComponents>,
    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: Option<IndexMap<String, Option<ShimPathItem>>>,
}

/// Components object (OAS 3.x) holding reusable definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimComponents {
    /// Named schema objects.
    #[serde(default)]
    pub schemas: Option<ShimSchemaMap>,
    /// Shared parameter objects.
    #[serde(default)]
    pub parameters: Option<IndexMap<String, Value>>,
    /// Shared request body objects.
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: Option<IndexMap<String, Value>>,
}

/// The `info` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimInfo {
    /// API title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// API description.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// API version (not the specification version).
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

/// A server entry (OAS 3.x).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimServer {
    /// Server URL, possibly templated.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    /// Server description.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// A schema object, reduced to the keywords synthesis reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimSchema {
    /// `$ref` pointer.
    #[serde(rename = "$ref", default, deserialize_with = "lenient_string")]
    pub reference: Option<String>,
    /// `type`; a string, or an array of strings in some documents.
    #[serde(rename = "type", default)]
    pub ty: Option<Value>,
    /// `format`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub format: Option<String>,
    /// `description`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// `example`.
    #[serde(default)]
    pub example: Option<Value>,
    /// `enum`.
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<Value>>,
    /// `items` of an array schema; tuple-form items stay unreadable.
    #[serde(default)]
    pub items: Option<Box<ShimSchemaSlot>>,
    /// Declared properties.
    #[serde(default)]
    pub properties: Option<IndexMap<String, Option<ShimSchemaSlot>>>,
}

impl ShimSchema {
    /// Primitive type name. For array-valued `type` the first non-`null` entry wins.
    pub fn primitive_type(&self) -> Option<String> {
        match self.ty.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Array(types) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null")
                .map(str::to_string),
            _ => None,
        }
    }

    /// Returns true when `type` resolves to `array`.
    pub fn is_array(&self) -> bool {
        self.primitive_type().as_deref() == Some("array")
    }
}

/// An operation object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimOperation {
    /// Short summary (read under 2.0).
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    /// Long description (read under 3.0).
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Operation parameters; `Some(vec![])` still counts as declared.
    #[serde(default)]
    pub parameters: Option<Vec<Option<ShimParameter>>>,
    /// Request body (3.0).
    #[serde(rename = "requestBody", default)]
    pub request_body: Option<ShimRequestBody>,
}

/// A parameter object, or a reference to a shared one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimParameter {
    /// `$ref` to a shared parameter.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    /// Parameter name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Location (`in`).
    #[serde(rename = "in", default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    /// Value schema (3.0, and 2.0 body parameters).
    #[serde(default)]
    pub schema: Option<ShimSchemaSlot>,
    /// Inline `type` (2.0 non-body parameters).
    #[serde(rename = "type", default)]
    pub ty: Option<Value>,
    /// Inline `format` (2.0).
    #[serde(default, deserialize_with = "lenient_string")]
    pub format: Option<String>,
    /// Inline `enum` (2.0).
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<Value>>,
    /// Inline `items` (2.0 array parameters).
    #[serde(default)]
    pub items: Option<Box<ShimSchemaSlot>>,
    /// Inline example (`x-example`, the 2.0 convention).
    #[serde(rename = "x-example", default)]
    pub example: Option<Value>,
}

impl ShimParameter {
    /// The schema describing the parameter's value.
    ///
    /// 3.0 parameters carry it under `schema`; 2.0 non-body parameters carry
    /// the same keywords inline on the parameter itself.
    pub fn value_schema(&self) -> ShimSchema {
        if let Some(schema) = self.schema.as_ref().and_then(Lenient::readable) {
            return schema.clone();
        }
        ShimSchema {
            ty: self.ty.clone(),
            format: self.format.clone(),
            example: self.example.clone(),
            enum_values: self.enum_values.clone(),
            items: self.items.clone(),
            ..ShimSchema::default()
        }
    }
}

/// A request body object (3.0), or a reference to a shared one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimRequestBody {
    /// `$ref` to a shared request body.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    /// Media types keyed by content type.
    #[serde(default)]
    pub content: Option<IndexMap<String, Option<ShimMediaType>>>,
}

impl ShimRequestBody {
    /// Schema of the JSON media type: `application/json` first, else the
    /// first media type whose name mentions `json`.
    pub fn json_schema(&self) -> Option<&ShimSchema> {
        let content = self.content.as_ref()?;
        let media = content
            .get("application/json")
            .or_else(|| {
                content
                    .iter()
                    .find(|(key, _)| key.contains("json"))
                    .map(|(_, media)| media)
            })?
            .as_ref()?;
        media.schema.as_ref()?.readable()
    }
}

/// A media type object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShimMediaType {
    /// Payload schema.
    #[serde(default)]
    pub schema: Option<ShimSchemaSlot>,
}

/// Accepts strings, numbers and booleans; anything else reads as absent.
///
/// Hand-written YAML often leaves scalars like `version: 1.0` unquoted.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(scalar_to_string))
}

/// Renders a scalar JSON value as a string.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
