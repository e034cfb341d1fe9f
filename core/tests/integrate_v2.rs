use apiui_core::{
    integrate_str, ControlElement, Diagnostic, HttpMethod, IngestConfig, ParamLocation,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const PETSTORE_V2: &str = r##"{
  "swagger": "2.0",
  "info": {
    "description": "This is a sample server Petstore server.",
    "version": "1.0.6",
    "title": "Swagger Petstore"
  },
  "host": "petstore.swagger.io",
  "basePath": "/v2",
  "schemes": ["https", "http"],
  "paths": {
    "/pet": {
      "post": {
        "summary": "Add a new pet to the store",
        "description": "ignored under 2.0",
        "parameters": [
          {
            "in": "body",
            "name": "body",
            "required": true,
            "schema": { "$ref": "#/definitions/Pet" }
          }
        ]
      },
      "put": {
        "summary": "Update an existing pet"
      }
    },
    "/pet/findByStatus": {
      "get": {
        "summary": "Finds Pets by status",
        "parameters": [
          {
            "name": "status",
            "in": "query",
            "type": "array",
            "items": { "type": "string", "enum": ["available", "pending", "sold"] }
          }
        ]
      }
    },
    "/pet/{petId}": {
      "post": {
        "summary": "Updates a pet in the store with form data",
        "parameters": [
          { "name": "petId", "in": "path", "type": "integer", "format": "int64" },
          { "name": "name", "in": "formData", "type": "string", "x-example": "doggie" },
          { "name": "status", "in": "formData", "type": "string", "enum": ["available", "pending", "sold"] },
          { "name": "vaccinated", "in": "formData", "type": "boolean", "enum": [false, true] },
          { "$ref": "#/parameters/traceId" }
        ]
      },
      "delete": {
        "summary": "Deletes a pet"
      },
      "patch": {
        "summary": "Partially updates a pet"
      }
    },
    "/store/inventory": {
      "post": {
        "summary": "Nothing to submit"
      }
    }
  },
  "parameters": {
    "traceId": { "name": "X-Trace-Id", "in": "header", "type": "string" }
  },
  "definitions": {
    "Category": {
      "type": "object",
      "properties": {
        "id": { "type": "integer", "format": "int64" },
        "name": { "type": "string" }
      }
    },
    "Tag": {
      "type": "object",
      "properties": {
        "id": { "type": "integer", "format": "int64" },
        "name": { "type": "string" }
      }
    },
    "Pet": {
      "type": "object",
      "required": ["name", "photoUrls"],
      "properties": {
        "id": { "type": "integer", "format": "int64" },
        "category": { "$ref": "#/definitions/Category" },
        "name": { "type": "string", "example": "doggie" },
        "photoUrls": { "type": "array", "items": { "type": "string" } },
        "tags": { "type": "array", "items": { "$ref": "#/definitions/Tag" } },
        "status": {
          "type": "string",
          "description": "pet status in the store",
          "enum": ["available", "pending", "sold"]
        }
      }
    },
    "Empty": null
  }
}"##;

#[test]
fn test_v2_metadata_and_server() {
    let integration = integrate_str(PETSTORE_V2, &IngestConfig::default()).unwrap();
    let model = integration.model;

    assert_eq!(model.specification_version, "2.0");
    assert_eq!(model.title.as_deref(), Some("Swagger Petstore"));
    assert_eq!(model.api_version.as_deref(), Some("1.0.6"));
    assert_eq!(
        model.description.as_deref(),
        Some("This is a sample server Petstore server.")
    );
    assert_eq!(model.server_url, "https://petstore.swagger.io/v2");
    assert!(model.server_description.is_none());
    assert!(model.api_layout.is_empty());
}

#[test]
fn test_v2_models_follow_definitions() {
    let integration = integrate_str(PETSTORE_V2, &IngestConfig::default()).unwrap();
    let model = integration.model;

    let types: Vec<_> = model.api_models.iter().map(|m| m.ty.as_str()).collect();
    assert_eq!(types, vec!["Category", "Tag", "Pet"]);

    let pet = model.model("Pet").unwrap();
    let names: Vec<_> = pet.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "category", "name", "photoUrls", "tags", "status"]
    );

    let tags = &pet.properties[4];
    assert_eq!(tags.ty.as_deref(), Some("array"));
    assert_eq!(tags.array_type.as_deref(), Some("Tag"));
    assert_eq!(pet.properties[3].array_type.as_deref(), Some("string"));
    assert!(pet.properties[1].ty.is_none());

    let status = &pet.properties[5];
    assert!(status.is_enum);
    assert_eq!(
        status.enum_values,
        Some(vec![json!("available"), json!("pending"), json!("sold")])
    );
    assert_eq!(pet.properties[2].placeholder, Some(json!("doggie")));
}

#[test]
fn test_v2_components_and_controls() {
    let integration = integrate_str(PETSTORE_V2, &IngestConfig::default()).unwrap();
    let components = &integration.model.dynamic_components;

    let pairs: Vec<_> = components
        .iter()
        .map(|c| (c.path.as_str(), c.http_method))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("/pet", Some(HttpMethod::Post)),
            ("/pet", Some(HttpMethod::Put)),
            ("/pet/findByStatus", Some(HttpMethod::Get)),
            ("/pet/{petId}", Some(HttpMethod::Post)),
            ("/pet/{petId}", Some(HttpMethod::Delete)),
            ("/pet/{petId}", None),
            ("/store/inventory", Some(HttpMethod::Post)),
        ]
    );

    assert_eq!(
        components[0].description.as_deref(),
        Some("Add a new pet to the store")
    );
    assert_eq!(components[0].controls.len(), 1);
    assert_eq!(components[0].controls[0].location, Some(ParamLocation::Body));

    assert!(components[2].controls.is_empty());

    let form = &components[3].controls;
    let labels: Vec<_> = form.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["petId", "name", "status", "vaccinated", "X-Trace-Id"]
    );
    assert_eq!(form[0].element, ControlElement::Input);
    assert_eq!(form[0].format.as_deref(), Some("int64"));
    assert_eq!(form[1].placeholder, Some(json!("doggie")));
    assert_eq!(form[2].element, ControlElement::Dropdown);
    assert_eq!(form[3].element, ControlElement::Switch);
    assert!(form[3].values.is_none());
    assert_eq!(form[4].location, Some(ParamLocation::Header));
}

#[test]
fn test_v2_diagnostics() {
    let integration = integrate_str(PETSTORE_V2, &IngestConfig::default()).unwrap();

    assert!(integration.is_degraded());
    assert_eq!(
        integration.diagnostics,
        vec![
            Diagnostic::UnsupportedMethod {
                path: "/pet/{petId}".into(),
                method: "patch".into(),
            },
            Diagnostic::MissingRequestSchema {
                path: "/store/inventory".into(),
            },
        ]
    );
}

#[test]
fn test_v2_missing_schemes_yields_no_model() {
    let document = PETSTORE_V2.replace(r#""schemes": ["https", "http"],"#, "");
    assert!(integrate_str(&document, &IngestConfig::default()).is_err());
}

#[test]
fn test_v2_tuple_items_degrade_only_their_property() {
    let document = r#"
swagger: '2.0'
info: { title: Shapes, version: 1.0.0 }
host: shapes.example.com
schemes: [https]
paths:
  /a:
    get: { summary: Read shapes }
definitions:
  Good:
    properties:
      id: { type: integer }
  Point:
    properties:
      coords:
        type: array
        items:
          - { type: number }
          - { type: number }
"#;
    let integration = integrate_str(document, &IngestConfig::default()).unwrap();
    let model = &integration.model;

    let types: Vec<_> = model.api_models.iter().map(|m| m.ty.as_str()).collect();
    assert_eq!(types, vec!["Good", "Point"]);
    assert!(model.model("Point").unwrap().properties[0].array_type.is_none());
    assert_eq!(model.dynamic_components.len(), 1);
    assert_eq!(
        model.dynamic_components[0].description.as_deref(),
        Some("Read shapes")
    );
    assert!(matches!(
        integration.diagnostics.as_slice(),
        [Diagnostic::UnresolvedReference { location, .. }] if location == "Point.coords"
    ));
}
