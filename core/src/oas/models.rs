#![deny(missing_docs)]

//! # Model Synthesis
//!
//! Turns the named schema objects of a document into the data model catalog.
//!
//! - Null entries are skipped.
//! - Properties keep declaration order.
//! - Array items are resolved one level: a local `$ref` becomes the model
//!   identifier, an inline item contributes its primitive type. Anything
//!   deeper is reported as an unresolved reference.
//! - Unreadable slots are reported and degrade only themselves: a schema is
//!   left out of the catalog, a property keeps only its name, an item leaves
//!   `arrayType` unset.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{DataModel, PropertyDescriptor};
use crate::oas::refs::strip_ref_prefix;
use crate::oas::shims::{Lenient, ShimSchema, ShimSchemaMap, ShimSchemaSlot};

/// Pseudo reference reported for slots that could not be read.
const UNREADABLE_SCHEMA: &str = "unreadable schema";

/// Where schema references point to, and what they may resolve against.
#[derive(Debug, Clone, Copy)]
pub struct RefScope<'a> {
    /// Local schema prefix (`#/definitions/` or `#/components/schemas/`).
    pub prefix: &'a str,
    /// Declared schema objects; `None` when the section is missing.
    pub known: Option<&'a ShimSchemaMap>,
}

impl<'a> RefScope<'a> {
    /// Creates a scope.
    pub fn new(prefix: &'a str, known: Option<&'a ShimSchemaMap>) -> Self {
        Self { prefix, known }
    }

    fn is_declared(&self, name: &str) -> bool {
        self.known
            .and_then(|schemas| schemas.get(name))
            .and_then(Option::as_ref)
            .and_then(Lenient::readable)
            .is_some()
    }
}

/// Builds one [`DataModel`] per declared schema object.
///
/// Returns `None` when the schema section itself is absent, so callers can
/// tell "no schemas defined" apart from "schema section missing".
pub fn synthesize_models(
    schemas: Option<&ShimSchemaMap>,
    prefix: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<DataModel>> {
    let schemas = schemas?;
    let scope = RefScope::new(prefix, Some(schemas));

    let models = schemas
        .iter()
        .filter_map(|(name, slot)| {
            let schema = read_slot(slot.as_ref()?, name, diagnostics)?;
            Some(DataModel {
                ty: name.clone(),
                description: schema.description.clone(),
                properties: synthesize_properties(name, schema, scope, diagnostics),
            })
        })
        .collect();

    Some(models)
}

/// Builds the property descriptors of one schema object.
///
/// `owner` prefixes diagnostic locations (`Pet.tags`).
pub fn synthesize_properties(
    owner: &str,
    schema: &ShimSchema,
    scope: RefScope<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<PropertyDescriptor> {
    let Some(properties) = &schema.properties else {
        return Vec::new();
    };

    properties
        .iter()
        .filter_map(|(name, slot)| {
            let location = format!("{}.{}", owner, name);
            let descriptor = match read_slot(slot.as_ref()?, &location, diagnostics) {
                Some(property) => synthesize_property(name, property, &location, scope, diagnostics),
                None => unreadable_property(name),
            };
            Some(descriptor)
        })
        .collect()
}

/// The schema held by `slot`, reporting it at `location` when unreadable.
fn read_slot<'s>(
    slot: &'s ShimSchemaSlot,
    location: &str,
    diagnostics: &mut Diagnostics,
) -> Option<&'s ShimSchema> {
    let schema = slot.readable();
    if schema.is_none() {
        diagnostics.push(Diagnostic::UnresolvedReference {
            location: location.to_string(),
            reference: UNREADABLE_SCHEMA.into(),
        });
    }
    schema
}

fn unreadable_property(name: &str) -> PropertyDescriptor {
    PropertyDescriptor {
        name: name.to_string(),
        ty: None,
        format: None,
        placeholder: None,
        is_enum: false,
        enum_values: None,
        array_type: None,
    }
}

fn synthesize_property(
    name: &str,
    property: &ShimSchema,
    location: &str,
    scope: RefScope<'_>,
    diagnostics: &mut Diagnostics,
) -> PropertyDescriptor {
    let array_type = if property.is_array() {
        resolve_array_type(property.items.as_deref(), location, scope, diagnostics)
    } else {
        None
    };

    PropertyDescriptor {
        name: name.to_string(),
        ty: property.primitive_type(),
        format: property.format.clone(),
        placeholder: property.example.clone(),
        is_enum: property.enum_values.is_some(),
        enum_values: property.enum_values.clone(),
        array_type,
    }
}

/// Resolves the item type of an array property, one level deep.
fn resolve_array_type(
    items: Option<&ShimSchemaSlot>,
    location: &str,
    scope: RefScope<'_>,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    let items = read_slot(items?, location, diagnostics)?;

    if let Some(reference) = &items.reference {
        let Some(name) = strip_ref_prefix(reference, scope.prefix) else {
            diagnostics.push(Diagnostic::UnresolvedReference {
                location: location.to_string(),
                reference: reference.clone(),
            });
            return None;
        };
        if !scope.is_declared(&name) {
            diagnostics.push(Diagnostic::UnresolvedReference {
                location: location.to_string(),
                reference: reference.clone(),
            });
        }
        return Some(name);
    }

    if items.is_array() {
        diagnostics.push(Diagnostic::UnresolvedReference {
            location: location.to_string(),
            reference: "nested array items".into(),
        });
    } else if let Some(nested) = first_nested_reference(items) {
        diagnostics.push(Diagnostic::UnresolvedReference {
            location: location.to_string(),
            reference: nested.to_string(),
        });
    }

    items.primitive_type()
}

/// First `$ref` among the properties of an inline object item.
fn first_nested_reference(items: &ShimSchema) -> Option<&str> {
    items
        .properties
        .as_ref()?
        .values()
        .flatten()
        .filter_map(Lenient::readable)
        .find_map(|property| {
            property
                .reference
                .as_deref()
                .or_else(|| property.items.as_deref()?.readable()?.reference.as_deref())
        })
}
