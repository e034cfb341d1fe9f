//! # Control Factory
//!
//! Builds input controls from operation parameters and model properties.
//! Both entry points share one widget rule, evaluated per control.

use crate::model::{Control, ControlElement, ParamLocation, PropertyDescriptor};
use crate::oas::refs::strip_ref_prefix;
use crate::oas::shims::ShimParameter;
use serde_json::Value;

/// Builds a control from an operation parameter.
///
/// Type, format and placeholder come from the parameter's value schema. A
/// value schema that only references a model (2.0 body parameters) takes
/// the model identifier as its type.
pub fn control_for_parameter(parameter: &ShimParameter, schema_prefix: &str) -> Control {
    let schema = parameter.value_schema();
    let ty = schema.primitive_type().or_else(|| {
        schema
            .reference
            .as_deref()
            .and_then(|reference| strip_ref_prefix(reference, schema_prefix))
    });
    let (element, values) = choose_widget(schema.enum_values.as_deref());

    Control {
        label: parameter.name.clone().unwrap_or_default(),
        element,
        location: parameter.location.as_deref().and_then(ParamLocation::parse),
        ty,
        format: schema.format,
        placeholder: schema.example,
        value: None,
        values,
    }
}

/// Builds a control from a model property (request-body path).
pub fn control_for_property(property: &PropertyDescriptor) -> Control {
    let (element, values) = choose_widget(property.enum_values.as_deref());

    Control {
        label: property.name.clone(),
        element,
        location: None,
        ty: property.ty.clone(),
        format: property.format.clone(),
        placeholder: property.placeholder.clone(),
        value: None,
        values,
    }
}

/// Widget rule:
/// - all-boolean enumeration -> `switch`, no values;
/// - any other non-empty enumeration -> `dropdown` with the literal values;
/// - no (or an empty) enumeration -> `input`.
pub fn choose_widget(enum_values: Option<&[Value]>) -> (ControlElement, Option<Vec<Value>>) {
    match enum_values {
        Some(values) if !values.is_empty() => {
            if values.iter().all(Value::is_boolean) {
                (ControlElement::Switch, None)
            } else {
                (ControlElement::Dropdown, Some(values.to_vec()))
            }
        }
        _ => (ControlElement::Input, None),
    }
}
