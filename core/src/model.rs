#![deny(missing_docs)]

//! # API UI Model
//!
//! The normalized, version-independent description synthesized from an
//! OpenAPI document. Field names serialize exactly as the UI layer binds
//! them (`serverURL`, `apiModels`, `dynamicComponents`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Root output artifact of an integration request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUiModel {
    /// Raw version token from the source document ("2.0" or "3.0.0").
    pub specification_version: String,
    /// `info.version`.
    pub api_version: Option<String>,
    /// `info.title`.
    pub title: Option<String>,
    /// `info.description`.
    pub description: Option<String>,
    /// Absolute or templated server location.
    #[serde(rename = "serverURL")]
    pub server_url: String,
    /// Description of the first declared server (OpenAPI 3 only).
    pub server_description: Option<String>,
    /// One descriptor per named schema object, in declaration order.
    pub api_models: Vec<DataModel>,
    /// One component per (path, method) pair, in declaration order.
    pub dynamic_components: Vec<DynamicComponent>,
    /// Filled in later by the layout editor; always empty here.
    pub api_layout: Vec<Value>,
}

impl ApiUiModel {
    /// Looks up a data model by its identifier.
    pub fn model(&self, ty: &str) -> Option<&DataModel> {
        find_model(&self.api_models, ty)
    }

    /// Returns the components synthesized for `path`, in method declaration order.
    pub fn components_for<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a DynamicComponent> + 'a {
        self.dynamic_components
            .iter()
            .filter(move |component| component.path == path)
    }
}

/// Finds the model whose identifier equals `ty`.
pub(crate) fn find_model<'a>(models: &'a [DataModel], ty: &str) -> Option<&'a DataModel> {
    models.iter().find(|model| model.ty == ty)
}

/// A data model synthesized from one named schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    /// The schema's key name; unique within `apiModels`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Schema description.
    pub description: Option<String>,
    /// Declared properties, in declaration order. Never omitted.
    pub properties: Vec<PropertyDescriptor>,
}

/// A single typed property of a [`DataModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: String,
    /// Primitive type (`string`, `integer`, `array`, ...).
    #[serde(rename = "type")]
    pub ty: Option<String>,
    /// Type format (`int64`, `date-time`, ...).
    pub format: Option<String>,
    /// Example value from the schema.
    pub placeholder: Option<Value>,
    /// Whether an enumeration constraint is declared.
    pub is_enum: bool,
    /// The enumerated values; present only when `is_enum` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Item type of an array property: a model identifier or a primitive type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_type: Option<String>,
}

/// One synthesized UI component per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicComponent {
    /// Raw path template.
    pub path: String,
    /// Mapped HTTP method; `None` for verbs outside the supported set.
    pub http_method: Option<HttpMethod>,
    /// `summary` (2.0) or `description` (3.0) of the operation.
    pub description: Option<String>,
    /// Component kind; only POST operations become forms.
    #[serde(rename = "type")]
    pub ty: Option<ComponentType>,
    /// Input controls driving the operation.
    pub controls: Vec<Control>,
}

impl DynamicComponent {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            http_method: None,
            description: None,
            ty: None,
            controls: Vec::new(),
        }
    }
}

/// The closed set of HTTP methods a component can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Maps a path-item key (lowercase, as OpenAPI declares it) to a method.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// The uppercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a dynamic component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// An input form submitting the operation.
    Form,
}

/// An input widget for one parameter or request-body property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Parameter or property name.
    pub label: String,
    /// Widget kind.
    pub element: ControlElement,
    /// Parameter location; `None` for body-derived controls.
    #[serde(rename = "in")]
    pub location: Option<ParamLocation>,
    /// Value type.
    #[serde(rename = "type")]
    pub ty: Option<String>,
    /// Value format.
    pub format: Option<String>,
    /// Example value shown as a hint.
    pub placeholder: Option<Value>,
    /// Current value; always unset on synthesis.
    pub value: Option<Value>,
    /// Choice set of a dropdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

/// Widget kinds a control can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlElement {
    /// Free text / numeric input.
    Input,
    /// Selection from an enumerated list.
    Dropdown,
    /// Binary toggle for boolean enumerations.
    Switch,
}

/// Where an operation parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// URL query string.
    Query,
    /// Path template segment.
    Path,
    /// Request header.
    Header,
    /// Request body (2.0 body parameters).
    Body,
    /// Form field (2.0 `formData`).
    FormData,
    /// Cookie (3.0).
    Cookie,
}

impl ParamLocation {
    /// Parses the `in` field of a parameter object.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "query" => Some(Self::Query),
            "path" => Some(Self::Path),
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            "formData" => Some(Self::FormData),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_serializes_ui_field_names() {
        let model = ApiUiModel {
            specification_version: "3.0.0".into(),
            api_version: Some("1.0.0".into()),
            title: Some("Pets".into()),
            description: None,
            server_url: "https://api.example.com/v1".into(),
            server_description: None,
            api_models: vec![],
            dynamic_components: vec![DynamicComponent {
                path: "/pets".into(),
                http_method: Some(HttpMethod::Post),
                description: None,
                ty: Some(ComponentType::Form),
                controls: vec![],
            }],
            api_layout: vec![],
        };

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["specificationVersion"], json!("3.0.0"));
        assert_eq!(value["serverURL"], json!("https://api.example.com/v1"));
        assert_eq!(value["serverDescription"], Value::Null);
        assert_eq!(value["apiLayout"], json!([]));
        assert_eq!(value["dynamicComponents"][0]["httpMethod"], json!("POST"));
        assert_eq!(value["dynamicComponents"][0]["type"], json!("form"));
    }

    #[test]
    fn test_control_omits_values_unless_dropdown() {
        let control = Control {
            label: "active".into(),
            element: ControlElement::Switch,
            location: Some(ParamLocation::Query),
            ty: Some("boolean".into()),
            format: None,
            placeholder: None,
            value: None,
            values: None,
        };
        let value = serde_json::to_value(&control).unwrap();
        assert_eq!(value["element"], json!("switch"));
        assert_eq!(value["in"], json!("query"));
        assert!(value.get("values").is_none());
        assert_eq!(value["value"], Value::Null);
    }

    #[test]
    fn test_http_method_from_key() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_key("patch"), None);
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }

    #[test]
    fn test_param_location_form_data() {
        assert_eq!(ParamLocation::parse("formData"), Some(ParamLocation::FormData));
        assert_eq!(ParamLocation::parse("matrix"), None);
        assert_eq!(
            serde_json::to_value(ParamLocation::FormData).unwrap(),
            json!("formData")
        );
    }
}
