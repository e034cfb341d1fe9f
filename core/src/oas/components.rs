#![deny(missing_docs)]

//! # Component Synthesis
//!
//! Builds one [`DynamicComponent`] per (path, method) pair of a normalized
//! document. Method policy:
//!
//! | key      | tag    | type   | controls                                  |
//! |----------|--------|--------|-------------------------------------------|
//! | `get`    | GET    | -      | none                                      |
//! | `post`   | POST   | form   | `parameters`, else `requestBody` schema   |
//! | `put`    | PUT    | -      | none                                      |
//! | `delete` | DELETE | -      | none                                      |
//! | other    | -      | -      | none, reported as unsupported             |

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{find_model, ComponentType, Control, DataModel, DynamicComponent, HttpMethod};
use crate::oas::controls::{control_for_parameter, control_for_property};
use crate::oas::document::{DescriptionSource, NormalizedSpec};
use crate::oas::models::{synthesize_properties, RefScope};
use crate::oas::refs::strip_ref_prefix;
use crate::oas::shims::{scalar_to_string, ShimOperation, ShimParameter, ShimRequestBody};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Path item keys that are shared fields rather than operations.
const PATH_ITEM_FIELDS: [&str; 5] = ["parameters", "summary", "description", "servers", "$ref"];

/// Builds the component list for every operation of `spec`.
///
/// `models` is the catalog produced by model synthesis; `None` means the
/// document has no schema section, which only matters to request bodies.
pub fn synthesize_components(
    spec: &NormalizedSpec,
    models: Option<&[DataModel]>,
    diagnostics: &mut Diagnostics,
) -> Vec<DynamicComponent> {
    let mut components = Vec::new();

    for (path, item) in &spec.paths {
        let Some(item) = item else {
            continue;
        };

        for (key, raw) in item {
            if is_path_item_field(key) {
                continue;
            }
            components.push(build_component(spec, path, key, raw, models, diagnostics));
        }
    }

    components
}

fn is_path_item_field(key: &str) -> bool {
    key.starts_with("x-") || PATH_ITEM_FIELDS.contains(&key)
}

fn build_component(
    spec: &NormalizedSpec,
    path: &str,
    key: &str,
    raw: &Value,
    models: Option<&[DataModel]>,
    diagnostics: &mut Diagnostics,
) -> DynamicComponent {
    let mut component = DynamicComponent::new(path);

    let description_key = match spec.version.description_source() {
        DescriptionSource::Summary => "summary",
        DescriptionSource::Description => "description",
    };
    component.description = raw.get(description_key).and_then(scalar_to_string);

    match HttpMethod::from_key(key) {
        Some(HttpMethod::Post) => {
            component.http_method = Some(HttpMethod::Post);
            component.ty = Some(ComponentType::Form);
            match serde_json::from_value::<ShimOperation>(raw.clone()) {
                Ok(operation) => {
                    component.controls = post_controls(spec, path, &operation, models, diagnostics);
                }
                Err(e) => diagnostics.push(Diagnostic::MalformedOperation {
                    path: path.to_string(),
                    method: key.to_string(),
                    reason: e.to_string(),
                }),
            }
        }
        // GET, PUT and DELETE carry no controls yet.
        Some(method) => component.http_method = Some(method),
        None => diagnostics.push(Diagnostic::UnsupportedMethod {
            path: path.to_string(),
            method: key.to_string(),
        }),
    }

    component
}

/// `parameters` wins over `requestBody` when both are declared; no merge.
fn post_controls(
    spec: &NormalizedSpec,
    path: &str,
    operation: &ShimOperation,
    models: Option<&[DataModel]>,
    diagnostics: &mut Diagnostics,
) -> Vec<Control> {
    if let Some(parameters) = &operation.parameters {
        let prefix = spec.version.schema_prefix();
        return parameters
            .iter()
            .flatten()
            .filter_map(|parameter| resolve_parameter(spec, path, parameter, diagnostics))
            .map(|parameter| control_for_parameter(&parameter, prefix))
            .collect();
    }

    if let Some(body) = &operation.request_body {
        return body_controls(spec, path, body, models, diagnostics);
    }

    diagnostics.push(Diagnostic::MissingRequestSchema {
        path: path.to_string(),
    });
    Vec::new()
}

fn resolve_parameter(
    spec: &NormalizedSpec,
    path: &str,
    parameter: &ShimParameter,
    diagnostics: &mut Diagnostics,
) -> Option<ShimParameter> {
    let Some(reference) = &parameter.reference else {
        return Some(parameter.clone());
    };
    resolve_shared(
        reference,
        spec.version.parameter_prefix(),
        &spec.shared_parameters,
        path,
        diagnostics,
    )
}

fn body_controls(
    spec: &NormalizedSpec,
    path: &str,
    body: &ShimRequestBody,
    models: Option<&[DataModel]>,
    diagnostics: &mut Diagnostics,
) -> Vec<Control> {
    let resolved;
    let body = match (&body.reference, spec.version.request_body_prefix()) {
        (None, _) => body,
        (Some(reference), Some(prefix)) => {
            match resolve_shared::<ShimRequestBody>(
                reference,
                prefix,
                &spec.shared_request_bodies,
                path,
                diagnostics,
            ) {
                Some(shared) => {
                    resolved = shared;
                    &resolved
                }
                None => return Vec::new(),
            }
        }
        (Some(reference), None) => {
            unresolved(path, reference, diagnostics);
            return Vec::new();
        }
    };

    let Some(schema) = body.json_schema() else {
        diagnostics.push(Diagnostic::MissingRequestSchema {
            path: path.to_string(),
        });
        return Vec::new();
    };

    let prefix = spec.version.schema_prefix();

    if let Some(reference) = &schema.reference {
        let Some(models) = models else {
            diagnostics.push(Diagnostic::MissingModelCatalog {
                path: path.to_string(),
            });
            return Vec::new();
        };
        let model = strip_ref_prefix(reference, prefix).and_then(|key| find_model(models, &key));
        let Some(model) = model else {
            unresolved(path, reference, diagnostics);
            return Vec::new();
        };
        return model.properties.iter().map(control_for_property).collect();
    }

    if schema.properties.is_some() {
        let scope = RefScope::new(prefix, spec.schemas.as_ref());
        let owner = format!("POST {}", path);
        return synthesize_properties(&owner, schema, scope, diagnostics)
            .iter()
            .map(control_for_property)
            .collect();
    }

    diagnostics.push(Diagnostic::MissingRequestSchema {
        path: path.to_string(),
    });
    Vec::new()
}

/// Resolves a reference to a shared object one level deep.
fn resolve_shared<T: DeserializeOwned>(
    reference: &str,
    prefix: &str,
    shared: &indexmap::IndexMap<String, Value>,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Option<T> {
    let resolved = strip_ref_prefix(reference, prefix)
        .and_then(|name| shared.get(&name))
        .and_then(|value| serde_json::from_value::<T>(value.clone()).ok());
    if resolved.is_none() {
        unresolved(path, reference, diagnostics);
    }
    resolved
}

fn unresolved(path: &str, reference: &str, diagnostics: &mut Diagnostics) {
    diagnostics.push(Diagnostic::UnresolvedReference {
        location: format!("POST {}", path),
        reference: reference.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ControlElement, ParamLocation};
    use crate::oas::document::{parse_document, Document};
    use crate::oas::models::synthesize_models;
    use serde_json::json;

    fn run(yaml: &str) -> (Vec<DynamicComponent>, Diagnostics) {
        let spec = Document::from_value(parse_document(yaml).unwrap())
            .unwrap()
            .normalize()
            .unwrap();
        let mut diagnostics = Diagnostics::new();
        let models = synthesize_models(
            spec.schemas.as_ref(),
            spec.version.schema_prefix(),
            &mut diagnostics,
        );
        let components = synthesize_components(&spec, models.as_deref(), &mut diagnostics);
        (components, diagnostics)
    }

    const V3_HEADER: &str = r#"
openapi: 3.0.0
info: { title: Test API, version: 1.0.0 }
servers: [{ url: 'https://api.example.com' }]
"#;

    #[test]
    fn test_one_component_per_method_in_declaration_order() {
        let yaml = format!(
            r#"{}
paths:
  /pets:
    summary: shared summary
    parameters: []
    x-owner: team-a
    get: {{ description: List pets }}
    post: {{ description: Add pet, parameters: [] }}
  /pets/{{id}}:
    delete: {{ description: Remove pet }}
    put: {{ description: Replace pet }}
"#,
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);

        let pairs: Vec<_> = components
            .iter()
            .map(|c| (c.path.as_str(), c.http_method))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("/pets", Some(HttpMethod::Get)),
                ("/pets", Some(HttpMethod::Post)),
                ("/pets/{id}", Some(HttpMethod::Delete)),
                ("/pets/{id}", Some(HttpMethod::Put)),
            ]
        );
        assert_eq!(components[0].description.as_deref(), Some("List pets"));
        assert!(components[0].ty.is_none());
        assert_eq!(components[1].ty, Some(ComponentType::Form));
        assert!(components.iter().all(|c| c.controls.is_empty()));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_post_parameters_win_over_request_body() {
        let yaml = format!(
            r#"{}
paths:
  /orders:
    post:
      parameters:
        - name: dryRun
          in: query
          schema: {{ type: boolean, enum: [true, false] }}
        - name: color
          in: header
          schema: {{ type: string, enum: [red, green, blue] }}
      requestBody:
        content:
          application/json:
            schema: {{ $ref: '#/components/schemas/Order' }}
components:
  schemas:
    Order:
      properties:
        quantity: {{ type: integer }}
"#,
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        let controls = &components[0].controls;

        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].label, "dryRun");
        assert_eq!(controls[0].element, ControlElement::Switch);
        assert_eq!(controls[1].element, ControlElement::Dropdown);
        assert_eq!(
            controls[1].values,
            Some(vec![json!("red"), json!("green"), json!("blue")])
        );
        assert_eq!(controls[1].location, Some(ParamLocation::Header));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_post_request_body_uses_model_properties() {
        let yaml = format!(
            r#"{}
paths:
  /orders:
    post:
      requestBody:
        content:
          application/json:
            schema: {{ $ref: '#/components/schemas/Order' }}
components:
  schemas:
    Order:
      properties:
        quantity: {{ type: integer, format: int32, example: 3 }}
        express: {{ type: boolean, enum: [false, true] }}
"#,
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        let controls = &components[0].controls;

        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].label, "quantity");
        assert!(controls[0].location.is_none());
        assert_eq!(controls[0].placeholder, Some(json!(3)));
        assert_eq!(controls[1].element, ControlElement::Switch);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_post_without_inputs_is_reported() {
        let yaml = format!(
            "{}\npaths:\n  /ping:\n    post: {{ description: Ping }}\n",
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        assert_eq!(components.len(), 1);
        assert!(components[0].controls.is_empty());
        assert_eq!(
            diagnostics.as_slice(),
            &[Diagnostic::MissingRequestSchema {
                path: "/ping".into()
            }]
        );
    }

    #[test]
    fn test_request_body_without_schema_section() {
        let yaml = format!(
            r#"{}
paths:
  /orders:
    post:
      requestBody:
        content:
          application/json:
            schema: {{ $ref: '#/components/schemas/Order' }}
"#,
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        assert!(components[0].controls.is_empty());
        assert!(matches!(
            diagnostics.as_slice(),
            [Diagnostic::MissingModelCatalog { .. }]
        ));
    }

    #[test]
    fn test_unsupported_method_still_emits_component() {
        let yaml = format!(
            "{}\npaths:\n  /pets:\n    patch: {{ description: Patch pet }}\n    options: {{}}\n",
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        assert_eq!(components.len(), 2);
        assert!(components.iter().all(|c| c.http_method.is_none()));
        assert_eq!(components[0].description.as_deref(), Some("Patch pet"));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_malformed_operation_is_isolated() {
        let yaml = format!(
            "{}\npaths:\n  /a:\n    post: 42\n  /b:\n    get: {{ description: fine }}\n",
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].http_method, Some(HttpMethod::Post));
        assert!(components[0].controls.is_empty());
        assert_eq!(components[1].description.as_deref(), Some("fine"));
        assert!(matches!(
            diagnostics.as_slice(),
            [Diagnostic::MalformedOperation { .. }]
        ));
    }

    #[test]
    fn test_shared_parameter_and_request_body_refs() {
        let yaml = format!(
            r#"{}
paths:
  /search:
    post:
      parameters:
        - $ref: '#/components/parameters/Limit'
        - $ref: '#/components/parameters/Missing'
  /items:
    post:
      requestBody: {{ $ref: '#/components/requestBodies/NewItem' }}
components:
  parameters:
    Limit:
      name: limit
      in: query
      schema: {{ type: integer }}
  requestBodies:
    NewItem:
      content:
        application/json:
          schema:
            type: object
            properties:
              title: {{ type: string }}
  schemas: {{}}
"#,
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);
        assert_eq!(components[0].controls.len(), 1);
        assert_eq!(components[0].controls[0].label, "limit");
        assert_eq!(components[1].controls.len(), 1);
        assert_eq!(components[1].controls[0].label, "title");
        assert_eq!(
            diagnostics.as_slice(),
            &[Diagnostic::UnresolvedReference {
                location: "POST /search".into(),
                reference: "#/components/parameters/Missing".into(),
            }]
        );
    }

    #[test]
    fn test_v2_description_comes_from_summary() {
        let yaml = r#"
swagger: '2.0'
info: { title: Petstore, version: 1.0.0 }
host: petstore.swagger.io
schemes: [https]
paths:
  /pet:
    post:
      summary: Add a new pet
      description: Long text
      parameters:
        - name: body
          in: body
          schema: { $ref: '#/definitions/Pet' }
definitions:
  Pet:
    properties:
      name: { type: string }
"#;
        let (components, diagnostics) = run(yaml);
        assert_eq!(components[0].description.as_deref(), Some("Add a new pet"));
        assert_eq!(components[0].controls.len(), 1);
        assert_eq!(components[0].controls[0].ty.as_deref(), Some("Pet"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_malformed_parameters_only_degrade_post_controls() {
        let yaml = format!(
            r#"{}
paths:
  /pets:
    get:
      description: List pets
      parameters: not-a-list
    post:
      description: Add pet
      parameters: not-a-list
"#,
            V3_HEADER
        );
        let (components, diagnostics) = run(&yaml);

        assert_eq!(components[0].description.as_deref(), Some("List pets"));
        assert_eq!(components[1].description.as_deref(), Some("Add pet"));
        assert_eq!(components[1].ty, Some(ComponentType::Form));
        assert!(components[1].controls.is_empty());
        assert!(matches!(
            diagnostics.as_slice(),
            [Diagnostic::MalformedOperation { method, .. }] if method == "post"
        ));
    }
}
